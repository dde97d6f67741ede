//! In-memory catalog model: tables, columns and their constraints.
//!
//! Tables and columns live in one arena owned by [`Schema`]. Every cross
//! reference (a column's table, a foreign key's target column) is an index
//! into that arena.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Database and schema a model was imported from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub database: String,
    pub schema: String,
}

impl Scope {
    pub fn new(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
        }
    }

    /// No database or no schema chosen.
    pub fn is_empty(&self) -> bool {
        self.database.is_empty() || self.schema.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(usize);

/// Constraint name to ordered member columns, in first-seen order.
pub type ConstraintMap = IndexMap<String, Vec<ColumnId>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub comment: Option<String>,
    /// Opaque diagram node id (`n1`, `n2`, ...).
    pub label: String,
    pub columns: Vec<ColumnId>,
    pub uniques: ConstraintMap,
    /// Primary key members in key-sequence order.
    pub primary_key: Vec<ColumnId>,
    pub foreign_keys: ConstraintMap,
}

/// Membership of a column in its table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMember {
    pub constraint: String,
    /// 1-based position declared by the catalog.
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub table: TableId,
    pub name: String,
    pub comment: Option<String>,
    pub nullable: bool,
    pub data_type: String,
    pub identity: bool,
    pub unique: bool,
    pub primary_key: Option<KeyMember>,
    /// Referenced column when this column is part of a foreign key.
    pub fkof: Option<ColumnId>,
}

impl Column {
    pub fn is_pk(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn is_fk(&self) -> bool {
        self.fkof.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub scope: Scope,
    tables: Vec<Table>,
    columns: Vec<Column>,
    by_name: HashMap<String, TableId>,
}

/// Treat empty and the literal text `None` as "no comment".
pub fn normalize_comment(comment: Option<&str>) -> Option<String> {
    match comment {
        None | Some("") | Some("None") => None,
        Some(text) => Some(text.to_string()),
    }
}

impl Schema {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Tables in import order.
    pub fn tables(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables.iter().enumerate().map(|(i, t)| (TableId(i), t))
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.0]
    }

    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.by_name.get(name).copied()
    }

    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.table_id(name).map(|id| self.table(id))
    }

    /// Columns of a table in declared order.
    pub fn columns_of(&self, table: TableId) -> impl Iterator<Item = &Column> {
        self.table(table).columns.iter().map(move |&id| self.column(id))
    }

    pub fn column_id(&self, table: TableId, name: &str) -> Option<ColumnId> {
        self.table(table)
            .columns
            .iter()
            .copied()
            .find(|&id| self.column(id).name == name)
    }

    pub fn find_column(&self, table: &str, column: &str) -> Option<&Column> {
        let table = self.table_id(table)?;
        self.column_id(table, column).map(|id| self.column(id))
    }

    /// Table that owns the column referenced by `column.fkof`.
    pub fn referenced_table(&self, column: &Column) -> Option<&Table> {
        column.fkof.map(|id| self.table(self.column(id).table))
    }

    // Construction. Only the importer and tests build models; once a model is
    // handed to a generator it is read-only.

    /// Add a table. A name seen before keeps its first table.
    pub fn add_table(&mut self, name: &str, comment: Option<String>) -> TableId {
        if let Some(id) = self.table_id(name) {
            return id;
        }
        let id = TableId(self.tables.len());
        self.tables.push(Table {
            name: name.to_string(),
            comment,
            label: format!("n{}", id.0 + 1),
            columns: Vec::new(),
            uniques: IndexMap::new(),
            primary_key: Vec::new(),
            foreign_keys: IndexMap::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Append a column to a table. A name seen before keeps its first column.
    pub fn add_column(
        &mut self,
        table: TableId,
        name: &str,
        comment: Option<String>,
        data_type: String,
        nullable: bool,
        identity: bool,
    ) -> ColumnId {
        if let Some(id) = self.column_id(table, name) {
            return id;
        }
        let id = ColumnId(self.columns.len());
        self.columns.push(Column {
            table,
            name: name.to_string(),
            comment,
            nullable,
            data_type,
            identity,
            unique: false,
            primary_key: None,
            fkof: None,
        });
        self.tables[table.0].columns.push(id);
        id
    }

    pub fn add_unique(&mut self, constraint: &str, column: ColumnId) {
        let table = self.columns[column.0].table;
        self.columns[column.0].unique = true;
        self.tables[table.0]
            .uniques
            .entry(constraint.to_string())
            .or_default()
            .push(column);
    }

    /// Add a primary key member at its key-sequence position.
    pub fn add_primary_key(&mut self, constraint: &str, column: ColumnId, sequence: u32) {
        let table = self.columns[column.0].table;
        if self.columns[column.0].primary_key.is_some() {
            return;
        }
        self.columns[column.0].primary_key = Some(KeyMember {
            constraint: constraint.to_string(),
            sequence,
        });

        let columns = &self.columns;
        let key = &mut self.tables[table.0].primary_key;
        let pos = key.partition_point(|id| {
            columns[id.0]
                .primary_key
                .as_ref()
                .is_some_and(|member| member.sequence <= sequence)
        });
        key.insert(pos, column);
    }

    /// Record `column` as a member of foreign key `constraint` referencing `target`.
    pub fn add_foreign_key(&mut self, constraint: &str, column: ColumnId, target: ColumnId) {
        let table = self.columns[column.0].table;
        self.columns[column.0].fkof = Some(target);
        self.tables[table.0]
            .foreign_keys
            .entry(constraint.to_string())
            .or_default()
            .push(column);
    }
}
