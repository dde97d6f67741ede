//! Catalog metadata import.
//!
//! Rows come from a [`MetadataSource`], one method per catalog query. The
//! importer runs the queries in dependency order and builds a [`Schema`].

use crate::schema::{Schema, Scope, normalize_comment};
use crate::sql::ident::{Casing, format_identifier};
use crate::sql::types::{DataTypeError, normalize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by a metadata source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Metadata query failed: {0}")]
    Source(SourceError),
    #[error("Malformed data type for {table}.{column}: {source}")]
    MalformedTypeDescriptor {
        table: String,
        column: String,
        #[source]
        source: DataTypeError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Non-empty for identity columns.
    #[serde(default)]
    pub autoincrement: Option<String>,
    /// JSON type descriptor, e.g. `{"type":"FIXED","precision":38,"scale":0,"nullable":false}`.
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueKeyRow {
    pub table_name: String,
    pub column_name: String,
    pub constraint_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyRow {
    pub table_name: String,
    pub column_name: String,
    pub constraint_name: String,
    pub key_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedKeyRow {
    pub pk_schema_name: String,
    pub pk_table_name: String,
    pub pk_column_name: String,
    pub fk_schema_name: String,
    pub fk_table_name: String,
    pub fk_column_name: String,
    pub fk_name: String,
}

/// Catalog introspection queries, in the order the importer runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    Tables,
    Columns,
    UniqueKeys,
    PrimaryKeys,
    ImportedKeys,
}

impl CatalogQuery {
    pub const ALL: [CatalogQuery; 5] = [
        Self::Tables,
        Self::Columns,
        Self::UniqueKeys,
        Self::PrimaryKeys,
        Self::ImportedKeys,
    ];

    fn object(self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Columns => "columns",
            Self::UniqueKeys => "unique keys",
            Self::PrimaryKeys => "primary keys",
            Self::ImportedKeys => "imported keys",
        }
    }

    /// SQL text that lists this object kind for `scope`.
    pub fn sql(self, scope: &Scope) -> String {
        format!(
            "show {} in schema {}.{}",
            self.object(),
            format_identifier(&scope.database, Casing::Lower),
            format_identifier(&scope.schema, Casing::Lower)
        )
    }
}

/// Supplier of catalog rows for one database schema.
pub trait MetadataSource {
    /// List the tables of the schema
    fn tables(&mut self, scope: &Scope) -> Result<Vec<TableRow>, SourceError>;

    /// List the columns of every table in the schema
    fn columns(&mut self, scope: &Scope) -> Result<Vec<ColumnRow>, SourceError>;

    /// List unique constraint members
    fn unique_keys(&mut self, scope: &Scope) -> Result<Vec<UniqueKeyRow>, SourceError>;

    /// List primary key members
    fn primary_keys(&mut self, scope: &Scope) -> Result<Vec<PrimaryKeyRow>, SourceError>;

    /// List foreign key members with the columns they reference
    fn imported_keys(&mut self, scope: &Scope) -> Result<Vec<ImportedKeyRow>, SourceError>;
}

/// Build the model of `scope` from `source`.
///
/// An empty selection returns an empty model without querying the source.
/// Rows naming tables or columns that were not imported are skipped, and so
/// are foreign keys that cross schemas.
pub fn import_schema<S: MetadataSource + ?Sized>(
    source: &mut S,
    scope: &Scope,
) -> Result<Schema, ImportError> {
    let mut schema = Schema::new(scope.clone());
    if scope.is_empty() {
        log::debug!("no database or schema selected, skipping import");
        return Ok(schema);
    }

    for row in source.tables(scope).map_err(ImportError::Source)? {
        schema.add_table(&row.name, normalize_comment(row.comment.as_deref()));
    }
    log::debug!("imported {} tables from {}.{}", schema.len(), scope.database, scope.schema);

    let mut imported = 0;
    for row in source.columns(scope).map_err(ImportError::Source)? {
        let Some(table) = schema.table_id(&row.table_name) else {
            log::trace!("skipping column of unknown table {}", row.table_name);
            continue;
        };
        let (data_type, nullable) =
            normalize(&row.data_type).map_err(|source| ImportError::MalformedTypeDescriptor {
                table: row.table_name.clone(),
                column: row.column_name.clone(),
                source,
            })?;
        let identity = row.autoincrement.as_deref().is_some_and(|a| !a.is_empty());
        schema.add_column(
            table,
            &row.column_name,
            normalize_comment(row.comment.as_deref()),
            data_type,
            nullable,
            identity,
        );
        imported += 1;
    }
    log::debug!("imported {} columns", imported);

    for row in source.unique_keys(scope).map_err(ImportError::Source)? {
        match resolve(&schema, &row.table_name, &row.column_name) {
            Some(column) => schema.add_unique(&row.constraint_name, column),
            None => log::trace!(
                "skipping unique key {} on {}.{}",
                row.constraint_name,
                row.table_name,
                row.column_name
            ),
        }
    }

    for row in source.primary_keys(scope).map_err(ImportError::Source)? {
        match resolve(&schema, &row.table_name, &row.column_name) {
            Some(column) => schema.add_primary_key(&row.constraint_name, column, row.key_sequence),
            None => log::trace!(
                "skipping primary key {} on {}.{}",
                row.constraint_name,
                row.table_name,
                row.column_name
            ),
        }
    }

    for row in source.imported_keys(scope).map_err(ImportError::Source)? {
        if row.pk_schema_name != row.fk_schema_name {
            log::debug!(
                "skipping cross-schema foreign key {} ({} -> {})",
                row.fk_name,
                row.fk_schema_name,
                row.pk_schema_name
            );
            continue;
        }
        let target = resolve(&schema, &row.pk_table_name, &row.pk_column_name);
        let column = resolve(&schema, &row.fk_table_name, &row.fk_column_name);
        match (column, target) {
            (Some(column), Some(target)) => schema.add_foreign_key(&row.fk_name, column, target),
            _ => log::trace!(
                "skipping foreign key {} ({}.{} -> {}.{})",
                row.fk_name,
                row.fk_table_name,
                row.fk_column_name,
                row.pk_table_name,
                row.pk_column_name
            ),
        }
    }

    Ok(schema)
}

fn resolve(schema: &Schema, table: &str, column: &str) -> Option<crate::schema::ColumnId> {
    let table = schema.table_id(table)?;
    schema.column_id(table, column)
}

/// Schema names worth offering for import.
pub fn visible_schemas<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::into)
        .filter(|name| name != "INFORMATION_SCHEMA")
        .collect()
}

/// Index of `preferred` in `names`, or 0.
pub fn preferred_index(names: &[String], preferred: &str) -> usize {
    names.iter().position(|name| name == preferred).unwrap_or(0)
}
