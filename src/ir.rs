use crate::config::GenerateOptions;
use crate::schema::{ColumnId, Schema, Table};
use crate::sql::ident::{Casing, display_identifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

#[derive(Debug, Clone)]
pub struct GraphIR {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Stable node id, never the table name.
    pub id: String,
    pub label: String,
    pub columns: Vec<ColumnIR>,
}

#[derive(Debug, Clone)]
pub struct ColumnIR {
    pub name: String,
    pub typ: String,
    pub is_pk: bool,
    pub is_fk: bool,
    pub nullable: bool,
    pub identity: bool,
    pub unique: bool,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Optional relationship: the first referencing column is nullable.
    pub dashed: bool,
    pub cardinality: Cardinality,
}

impl GraphIR {
    pub fn from_schema(schema: &Schema, options: &GenerateOptions) -> Self {
        let casing = Casing::from_upper(options.use_upper_case);

        let nodes: Vec<Node> = schema
            .tables()
            .map(|(id, table)| {
                let columns: Vec<ColumnIR> = if options.show_columns {
                    schema
                        .columns_of(id)
                        .map(|c| ColumnIR {
                            name: display_identifier(&c.name, casing),
                            typ: casing.apply(&c.data_type),
                            is_pk: c.is_pk(),
                            is_fk: c.is_fk(),
                            nullable: c.nullable,
                            identity: c.identity,
                            unique: c.unique,
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                Node {
                    id: table.label.clone(),
                    label: display_identifier(&table.name, casing),
                    columns,
                }
            })
            .collect();

        let edges: Vec<Edge> = schema
            .tables()
            .flat_map(move |(_, table)| {
                table
                    .foreign_keys
                    .values()
                    .filter_map(move |columns| foreign_key_edge(schema, table, columns))
            })
            .collect();

        GraphIR { nodes, edges }
    }
}

fn foreign_key_edge(schema: &Schema, table: &Table, columns: &[ColumnId]) -> Option<Edge> {
    let first = schema.column(*columns.first()?);
    let target = schema.referenced_table(first)?;

    // One-to-one when the foreign key is the whole primary key of its table
    // and the referenced key has as many columns.
    let is_whole_pk = columns.iter().all(|&id| schema.column(id).is_pk())
        && columns.len() == table.primary_key.len();
    let cardinality = if is_whole_pk && table.primary_key.len() == target.primary_key.len() {
        Cardinality::OneToOne
    } else {
        Cardinality::OneToMany
    };

    Some(Edge {
        from: table.label.clone(),
        to: target.label.clone(),
        dashed: first.nullable,
        cardinality,
    })
}
