//! Catalog metadata captured as JSON.
//!
//! A snapshot holds the rows of every catalog query for one schema and serves
//! them back as a [`MetadataSource`].

use crate::import::{
    ColumnRow, ImportedKeyRow, MetadataSource, PrimaryKeyRow, SourceError, TableRow, UniqueKeyRow,
    preferred_index, visible_schemas,
};
use crate::schema::Scope;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Schema picked when a snapshot names none.
pub const DEFAULT_SCHEMA: &str = "PUBLIC";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    /// Schema names listed by the catalog for `database`.
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(default)]
    pub tables: Vec<TableRow>,
    #[serde(default)]
    pub columns: Vec<ColumnRow>,
    #[serde(default)]
    pub unique_keys: Vec<UniqueKeyRow>,
    #[serde(default)]
    pub primary_keys: Vec<PrimaryKeyRow>,
    #[serde(default)]
    pub imported_keys: Vec<ImportedKeyRow>,
}

impl Snapshot {
    /// Decode a snapshot. The document must be a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("snapshot must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Database and schema the rows were captured from.
    pub fn scope(&self) -> Scope {
        Scope::new(self.database.clone(), self.schema.clone())
    }

    /// Schema to import when none is named: `PUBLIC` when listed, otherwise
    /// the first listed schema other than `INFORMATION_SCHEMA`.
    pub fn default_schema(&self) -> Option<String> {
        let names = visible_schemas(self.schemas.iter().cloned());
        names.get(preferred_index(&names, DEFAULT_SCHEMA)).cloned()
    }
}

impl MetadataSource for Snapshot {
    fn tables(&mut self, _scope: &Scope) -> Result<Vec<TableRow>, SourceError> {
        Ok(self.tables.clone())
    }

    fn columns(&mut self, _scope: &Scope) -> Result<Vec<ColumnRow>, SourceError> {
        Ok(self.columns.clone())
    }

    fn unique_keys(&mut self, _scope: &Scope) -> Result<Vec<UniqueKeyRow>, SourceError> {
        Ok(self.unique_keys.clone())
    }

    fn primary_keys(&mut self, _scope: &Scope) -> Result<Vec<PrimaryKeyRow>, SourceError> {
        Ok(self.primary_keys.clone())
    }

    fn imported_keys(&mut self, _scope: &Scope) -> Result<Vec<ImportedKeyRow>, SourceError> {
        Ok(self.imported_keys.clone())
    }
}
