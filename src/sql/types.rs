//! Catalog data type descriptor to canonical SQL type.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataTypeError {
    #[error("Malformed type descriptor: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Type descriptor for {kind} has a scale but no precision")]
    MissingPrecision { kind: String },
}

/// Structured type descriptor as reported in a catalog column's `data_type` field.
///
/// Unknown fields (`byteLength`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub nullable: bool,
    #[serde(default)]
    pub fixed: Option<bool>,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
}

impl TypeDescriptor {
    /// Decode a descriptor from its JSON text.
    pub fn parse(json: &str) -> Result<Self, DataTypeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Canonical lowercase type name with its parameters.
    pub fn canonical(&self) -> Result<String, DataTypeError> {
        let mut typ = match (self.kind.as_str(), self.fixed) {
            ("FIXED", _) => "NUMBER".to_string(),
            ("TEXT", Some(true)) => "CHAR".to_string(),
            ("TEXT", Some(false)) => "VARCHAR".to_string(),
            (kind, _) => kind.to_string(),
        };

        if let Some(length) = self.length {
            typ = format!("{}({})", typ, length);
        } else if let Some(scale) = self.scale {
            let precision = self.precision.ok_or_else(|| DataTypeError::MissingPrecision {
                kind: self.kind.clone(),
            })?;

            if precision == 0 {
                typ = format!("{}({})", typ, scale);
                if typ == "TIMESTAMP_NTZ(9)" {
                    typ = "TIMESTAMP".to_string();
                }
            } else if scale == 0 {
                typ = format!("{}({})", typ, precision);
                if typ == "NUMBER(38)" {
                    typ = "INT".to_string();
                } else if typ.starts_with("NUMBER(") {
                    typ = format!("INT({})", precision);
                }
            } else {
                typ = format!("{}({},{})", typ, precision, scale);
            }
        }

        Ok(typ.to_lowercase())
    }
}

/// Decode a JSON descriptor and return its canonical type with the nullability flag.
pub fn normalize(json: &str) -> Result<(String, bool), DataTypeError> {
    let descriptor = TypeDescriptor::parse(json)?;
    Ok((descriptor.canonical()?, descriptor.nullable))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(json: &str) -> String {
        TypeDescriptor::parse(json).unwrap().canonical().unwrap()
    }

    #[test]
    fn test_fixed_types() {
        assert_eq!(
            canonical(r#"{"type":"FIXED","precision":38,"scale":0,"nullable":false}"#),
            "int"
        );
        assert_eq!(
            canonical(r#"{"type":"FIXED","precision":10,"scale":0,"nullable":false}"#),
            "int(10)"
        );
        assert_eq!(
            canonical(r#"{"type":"FIXED","precision":10,"scale":2,"nullable":true}"#),
            "number(10,2)"
        );
    }

    #[test]
    fn test_text_types() {
        assert_eq!(
            canonical(r#"{"type":"TEXT","fixed":true,"length":5,"nullable":false}"#),
            "char(5)"
        );
        assert_eq!(
            canonical(
                r#"{"type":"TEXT","length":16777216,"byteLength":16777216,"nullable":true,"fixed":false}"#
            ),
            "varchar(16777216)"
        );
        assert_eq!(canonical(r#"{"type":"TEXT","length":10,"nullable":true}"#), "text(10)");
    }

    #[test]
    fn test_timestamp_types() {
        assert_eq!(
            canonical(r#"{"type":"TIMESTAMP_NTZ","precision":0,"scale":9,"nullable":true}"#),
            "timestamp"
        );
        assert_eq!(
            canonical(r#"{"type":"TIMESTAMP_LTZ","precision":0,"scale":9,"nullable":true}"#),
            "timestamp_ltz(9)"
        );
        assert_eq!(
            canonical(r#"{"type":"TIMESTAMP_NTZ","precision":0,"scale":3,"nullable":true}"#),
            "timestamp_ntz(3)"
        );
    }

    #[test]
    fn test_plain_types() {
        assert_eq!(canonical(r#"{"type":"BOOLEAN","nullable":true}"#), "boolean");
        assert_eq!(canonical(r#"{"type":"DATE","nullable":false}"#), "date");
        assert_eq!(canonical(r#"{"type":"REAL","nullable":true}"#), "real");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let json = r#"{"type":"FIXED","precision":12,"scale":4,"nullable":false}"#;
        assert_eq!(normalize(json).unwrap(), normalize(json).unwrap());
        assert_eq!(normalize(json).unwrap(), ("number(12,4)".to_string(), false));
    }

    #[test]
    fn test_malformed_descriptor() {
        assert!(matches!(
            TypeDescriptor::parse(r#"{"nullable":true}"#),
            Err(DataTypeError::Decode(_))
        ));
        assert!(matches!(normalize("not json"), Err(DataTypeError::Decode(_))));
        assert!(matches!(
            normalize(r#"{"type":"FIXED","scale":2,"nullable":true}"#),
            Err(DataTypeError::MissingPrecision { .. })
        ));
    }
}
