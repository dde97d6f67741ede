use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use schemerd::config::{DiagramSettings, GenerateOptions, Settings};
use schemerd::import::CatalogQuery;
use schemerd::schema::Scope;
use schemerd::snapshot::Snapshot;
use schemerd::sql::Casing;
use schemerd::theme::Theme;
use schemerd::{import_schema, render_diagram, render_script};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "schemerd")]
#[command(about = "Render catalog metadata as a DDL script or a Graphviz ER diagram")]
#[command(version)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CREATE script for a metadata snapshot
    Script {
        #[command(flatten)]
        input: Input,
    },

    /// Print the DOT diagram for a metadata snapshot
    Diagram {
        #[command(flatten)]
        input: Input,

        /// Diagram theme
        #[arg(short, long)]
        theme: Option<String>,

        /// Show column names in table shapes
        #[arg(long, overrides_with = "no_columns")]
        columns: bool,

        /// Hide column names
        #[arg(long, overrides_with = "columns")]
        no_columns: bool,

        /// Show column data types (with --columns)
        #[arg(long, overrides_with = "no_types")]
        types: bool,

        /// Hide column data types
        #[arg(long, overrides_with = "types")]
        no_types: bool,
    },

    /// Print the catalog queries that produce a snapshot's rows
    Queries {
        /// Database name
        #[arg(long)]
        database: String,

        /// Schema name
        #[arg(long, default_value = "PUBLIC")]
        schema: String,
    },

    /// List diagram themes
    Themes,
}

#[derive(Args)]
struct Input {
    /// JSON metadata snapshot
    snapshot: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the snapshot's database name
    #[arg(long)]
    database: Option<String>,

    /// Override the snapshot's schema name
    #[arg(long)]
    schema: Option<String>,

    /// Letter case of keywords, identifiers and types: upper or lower
    #[arg(short, long, value_parser = parse_casing)]
    casing: Option<Casing>,
}

fn parse_casing(s: &str) -> Result<Casing, String> {
    Casing::from_str(s).ok_or_else(|| format!("unknown casing '{}', expected upper or lower", s))
}

fn upper_case(casing: Option<Casing>) -> Option<bool> {
    casing.map(|casing| casing == Casing::Upper)
}

/// `Some(true)` for `--flag`, `Some(false)` for `--no-flag`, `None` when neither is given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Script { input } => {
            let overrides = Settings {
                upper_case: upper_case(input.casing),
                ..Settings::default()
            };
            let options = settings.overridden_by(overrides).options();
            let schema = load(&input)?;
            write_output(input.output.as_deref(), &render_script(&schema, &options))
        }
        Commands::Diagram {
            input,
            theme,
            columns,
            no_columns,
            types,
            no_types,
        } => {
            let overrides = Settings {
                upper_case: upper_case(input.casing),
                diagram: DiagramSettings {
                    theme,
                    show_columns: toggle(columns, no_columns),
                    show_types: toggle(types, no_types),
                },
            };
            let options = settings.overridden_by(overrides).options();
            let schema = load(&input)?;
            let dot = render_diagram(&schema, &options)?;
            write_output(input.output.as_deref(), &dot)
        }
        Commands::Queries { database, schema } => {
            let scope = Scope::new(database, schema);
            for query in CatalogQuery::ALL {
                println!("{};", query.sql(&scope));
            }
            Ok(())
        }
        Commands::Themes => {
            let default = GenerateOptions::default().theme;
            for name in Theme::names() {
                let marker = if name == default { " (default)" } else { "" };
                println!("{}{}", name, marker);
            }
            Ok(())
        }
    }
}

fn load(input: &Input) -> Result<schemerd::schema::Schema> {
    let text = fs::read_to_string(&input.snapshot)
        .with_context(|| format!("Failed to read {}", input.snapshot.display()))?;
    let mut snapshot = Snapshot::from_json(&text)
        .with_context(|| format!("Failed to parse {}", input.snapshot.display()))?;

    if let Some(database) = &input.database {
        snapshot.database = database.clone();
    }
    if let Some(schema) = &input.schema {
        snapshot.schema = schema.clone();
    }
    if snapshot.schema.is_empty() {
        if let Some(schema) = snapshot.default_schema() {
            log::info!("no schema named, using {}", schema);
            snapshot.schema = schema;
        }
    }

    let scope = snapshot.scope();
    if scope.is_empty() {
        log::warn!("no database or schema selected");
    }
    let schema = import_schema(&mut snapshot, &scope)
        .with_context(|| format!("Failed to import {}.{}", scope.database, scope.schema))?;
    if !scope.is_empty() && schema.is_empty() {
        log::warn!("found no tables in {}.{}", scope.database, scope.schema);
    }
    Ok(schema)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
