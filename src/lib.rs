pub mod config;
pub mod dot;
pub mod import;
pub mod ir;
pub mod schema;
pub mod snapshot;
pub mod sql;
pub mod theme;

use wasm_bindgen::prelude::*;

use config::GenerateOptions;
use dot::DotRenderer;
use ir::GraphIR;
use schema::Schema;
use snapshot::Snapshot;
use theme::UnknownTheme;

pub use import::{ImportError, MetadataSource, import_schema};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render the DDL script for a model.
pub fn render_script(schema: &Schema, options: &GenerateOptions) -> String {
    sql::generate_ddl(schema, options.casing())
}

/// Render the DOT diagram for a model. An empty selection renders nothing.
pub fn render_diagram(schema: &Schema, options: &GenerateOptions) -> Result<String, UnknownTheme> {
    let theme = options.theme()?;
    if schema.scope.is_empty() {
        return Ok(String::new());
    }

    let ir = GraphIR::from_schema(schema, options);
    let dot = DotRenderer::new(theme, options.show_columns, options.show_types).render(&ir);
    log::debug!(
        "generated diagram with {} nodes and {} edges",
        ir.nodes.len(),
        ir.edges.len()
    );
    Ok(dot)
}

fn import_snapshot(json: &str) -> Result<Schema, String> {
    let mut snapshot = Snapshot::from_json(json).map_err(|e| e.to_string())?;
    let scope = snapshot.scope();
    import_schema(&mut snapshot, &scope).map_err(|e| e.to_string())
}

/// Render the DDL script for a JSON metadata snapshot
#[wasm_bindgen(js_name = "snapshotToScript")]
pub fn snapshot_to_script(snapshot: &str, upper_case: bool) -> Result<String, String> {
    let schema = import_snapshot(snapshot)?;
    let options = GenerateOptions {
        use_upper_case: upper_case,
        ..GenerateOptions::default()
    };
    Ok(render_script(&schema, &options))
}

/// Render the DOT diagram for a JSON metadata snapshot
#[wasm_bindgen(js_name = "snapshotToDot")]
pub fn snapshot_to_dot(
    snapshot: &str,
    theme: Option<String>,
    show_columns: bool,
    show_types: bool,
    upper_case: bool,
) -> Result<String, String> {
    let schema = import_snapshot(snapshot)?;
    let defaults = GenerateOptions::default();
    let options = GenerateOptions {
        use_upper_case: upper_case,
        show_columns,
        show_types,
        theme: theme.unwrap_or(defaults.theme),
    };
    render_diagram(&schema, &options).map_err(|e| e.to_string())
}

/// Preset theme names
#[wasm_bindgen(js_name = "themeNames")]
pub fn theme_names() -> Vec<String> {
    theme::Theme::names().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "database": "SALES",
        "schema": "PUBLIC",
        "tables": [
            {"name": "ORDERS", "comment": ""},
            {"name": "CUSTOMERS", "comment": "None"}
        ],
        "columns": [
            {"table_name": "ORDERS", "column_name": "ID", "comment": "",
             "autoincrement": "START 1 INCREMENT 1",
             "data_type": "{\"type\":\"FIXED\",\"precision\":38,\"scale\":0,\"nullable\":false}"},
            {"table_name": "ORDERS", "column_name": "CUSTOMER_ID", "comment": "",
             "autoincrement": "",
             "data_type": "{\"type\":\"FIXED\",\"precision\":38,\"scale\":0,\"nullable\":false}"},
            {"table_name": "CUSTOMERS", "column_name": "ID", "comment": "",
             "autoincrement": "",
             "data_type": "{\"type\":\"FIXED\",\"precision\":38,\"scale\":0,\"nullable\":false}"}
        ],
        "unique_keys": [],
        "primary_keys": [
            {"table_name": "ORDERS", "column_name": "ID",
             "constraint_name": "PK_ORDERS", "key_sequence": 1},
            {"table_name": "CUSTOMERS", "column_name": "ID",
             "constraint_name": "PK_CUSTOMERS", "key_sequence": 1}
        ],
        "imported_keys": [
            {"pk_schema_name": "PUBLIC", "pk_table_name": "CUSTOMERS", "pk_column_name": "ID",
             "fk_schema_name": "PUBLIC", "fk_table_name": "ORDERS", "fk_column_name": "CUSTOMER_ID",
             "fk_name": "FK_ORDERS_CUSTOMERS"}
        ]
    }"#;

    #[test]
    fn test_orders_customers_script() {
        let script = snapshot_to_script(SNAPSHOT, true).unwrap();

        assert_eq!(script.matches("CREATE OR REPLACE TABLE").count(), 2);
        assert!(script.contains("  ID INT NOT NULL IDENTITY,"));
        let fk = "ALTER TABLE ORDERS\n  ADD CONSTRAINT FK_ORDERS_CUSTOMERS\n  ADD FOREIGN KEY (CUSTOMER_ID)\n  REFERENCES CUSTOMERS (ID);\n";
        assert!(script.ends_with(&format!("{}\n", fk)));
        assert!(script.find("CREATE OR REPLACE TABLE CUSTOMERS").unwrap() < script.find(fk).unwrap());
        assert!(!script.contains("COMMENT"));
    }

    #[test]
    fn test_orders_customers_diagram() {
        let dot = snapshot_to_dot(SNAPSHOT, None, false, false, false).unwrap();

        assert!(dot.starts_with("digraph {\n"));
        assert_eq!(dot.matches(" [\n").count(), 2);
        assert_eq!(dot.matches(" -> ").count(), 1);
        assert!(dot.contains(r##"  n1 -> n2 [ penwidth="1" color="#696969" arrowtail="crow" ]"##));
        assert!(!dot.contains("dashed"));
        assert!(!dot.contains("ORDERS ->"));
    }

    #[test]
    fn test_empty_selection_renders_nothing() {
        let json = r#"{"database": "", "schema": "PUBLIC",
            "tables": [{"name": "T", "comment": null}]}"#;
        assert_eq!(snapshot_to_script(json, false).unwrap(), "");
        assert_eq!(snapshot_to_dot(json, None, true, true, false).unwrap(), "");
    }

    #[test]
    fn test_unknown_theme_is_reported() {
        let err = snapshot_to_dot(SNAPSHOT, Some("Neon".into()), false, false, false).unwrap_err();
        assert_eq!(err, "Unknown theme: Neon");
    }

    #[test]
    fn test_invalid_snapshot_is_reported() {
        assert!(snapshot_to_script("[]", false).is_err());
        assert!(snapshot_to_script(r#"["DB","PUBLIC"]"#, true).is_err());
        assert!(import_snapshot("null").is_err());
    }

    #[test]
    fn test_generators_share_one_model() {
        let schema = import_snapshot(SNAPSHOT).unwrap();
        let options = GenerateOptions {
            show_columns: true,
            show_types: true,
            ..GenerateOptions::default()
        };
        let script = render_script(&schema, &options);
        let dot = render_diagram(&schema, &options).unwrap();

        assert_eq!(render_script(&schema, &options), script);
        assert_eq!(render_diagram(&schema, &options).unwrap(), dot);
        assert!(dot.contains("<i>customer_id</i>&nbsp;"));
        assert_eq!(theme_names().len(), 3);
    }
}
