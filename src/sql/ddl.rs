//! DDL script generation from a catalog model.

use super::ident::{Casing, format_identifier};
use crate::schema::{Column, ColumnId, Schema, Table, TableId};

/// Generate a script that recreates the schema: header, one CREATE TABLE per
/// table, then every foreign key as an ALTER TABLE once all tables exist.
///
/// An empty selection yields an empty script.
pub fn generate(schema: &Schema, casing: Casing) -> String {
    if schema.scope.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    let database = format_identifier(&schema.scope.database, casing);
    let name = format_identifier(&schema.scope.schema, casing);
    output.push_str(&format!("{} {};\n", casing.apply("use database"), database));
    output.push_str(&format!(
        "{} {}.{};\n\n",
        casing.apply("create or replace schema"),
        database,
        name
    ));

    for (id, _) in schema.tables() {
        serialize_table(&mut output, schema, id, casing);
    }

    for (_, table) in schema.tables() {
        for (constraint, columns) in &table.foreign_keys {
            serialize_foreign_key(&mut output, schema, table, constraint, columns, casing);
        }
    }

    log::debug!("generated {} bytes of DDL for {} tables", output.len(), schema.len());
    output
}

fn serialize_table(output: &mut String, schema: &Schema, id: TableId, casing: Casing) {
    let table = schema.table(id);
    output.push_str(&format!(
        "{} {} (",
        casing.apply("create or replace table"),
        format_identifier(&table.name, casing)
    ));

    for (i, column) in schema.columns_of(id).enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_column(output, table, column, casing);
    }

    for (constraint, columns) in &table.uniques {
        output.push_str(&format!(
            ",\n  {} {}\n    {} ({})",
            casing.apply("constraint"),
            format_identifier(constraint, casing),
            casing.apply("unique"),
            column_list(schema, columns, casing)
        ));
    }

    if let Some(first) = table.primary_key.first() {
        let constraint = schema
            .column(*first)
            .primary_key
            .as_ref()
            .map(|member| member.constraint.as_str())
            .unwrap_or_default();
        output.push_str(&format!(
            ",\n  {} {}\n    {} ({})",
            casing.apply("constraint"),
            format_identifier(constraint, casing),
            casing.apply("primary key"),
            column_list(schema, &table.primary_key, casing)
        ));
    }

    output.push_str("\n)");
    if let Some(comment) = &table.comment {
        output.push_str(&format!(
            " {} = '{}'",
            casing.apply("comment"),
            escape_literal(comment)
        ));
    }
    output.push_str(";\n\n");
}

fn serialize_column(output: &mut String, table: &Table, column: &Column, casing: Casing) {
    output.push_str(&format!(
        "\n  {} {}",
        format_identifier(&column.name, casing),
        casing.apply(&column.data_type)
    ));

    // A lone primary key column is spelled out as not null even when the
    // catalog reports it nullable.
    let sole_pk = column.is_pk() && table.primary_key.len() == 1;
    if !column.nullable || sole_pk {
        output.push_str(&format!(" {}", casing.apply("not null")));
    }
    if column.identity {
        output.push_str(&format!(" {}", casing.apply("identity")));
    }
    if let Some(comment) = &column.comment {
        output.push_str(&format!(
            " {} '{}'",
            casing.apply("comment"),
            escape_literal(comment)
        ));
    }
}

fn serialize_foreign_key(
    output: &mut String,
    schema: &Schema,
    table: &Table,
    constraint: &str,
    columns: &[ColumnId],
    casing: Casing,
) {
    let Some(target) = columns
        .first()
        .and_then(|&id| schema.referenced_table(schema.column(id)))
    else {
        return;
    };
    let referenced: Vec<ColumnId> = columns
        .iter()
        .filter_map(|&id| schema.column(id).fkof)
        .collect();

    output.push_str(&format!(
        "{} {}\n",
        casing.apply("alter table"),
        format_identifier(&table.name, casing)
    ));
    output.push_str(&format!(
        "  {} {}\n",
        casing.apply("add constraint"),
        format_identifier(constraint, casing)
    ));
    output.push_str(&format!(
        "  {} ({})\n",
        casing.apply("add foreign key"),
        column_list(schema, columns, casing)
    ));
    output.push_str(&format!(
        "  {} {} ({});\n\n",
        casing.apply("references"),
        format_identifier(&target.name, casing),
        column_list(schema, &referenced, casing)
    ));
}

fn column_list(schema: &Schema, columns: &[ColumnId], casing: Casing) -> String {
    columns
        .iter()
        .map(|&id| format_identifier(&schema.column(id).name, casing))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_literal(s: &str) -> String {
    s.replace('\'', "''")
}
