//! Generation options and the settings file that can supply them.

use crate::sql::ident::Casing;
use crate::theme::{Theme, UnknownTheme};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Options shared by the script and diagram generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub use_upper_case: bool,
    pub show_columns: bool,
    pub show_types: bool,
    pub theme: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            use_upper_case: false,
            show_columns: false,
            show_types: false,
            theme: Theme::default().name.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn casing(&self) -> Casing {
        Casing::from_upper(self.use_upper_case)
    }

    pub fn theme(&self) -> Result<Theme, UnknownTheme> {
        Theme::from_name(&self.theme)
    }
}

/// Contents of a TOML settings file. Every key is optional.
///
/// ```toml
/// upper_case = true
///
/// [diagram]
/// theme = "Blue Navy"
/// show_columns = true
/// show_types = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub upper_case: Option<bool>,
    #[serde(default)]
    pub diagram: DiagramSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramSettings {
    pub theme: Option<String>,
    pub show_columns: Option<bool>,
    pub show_types: Option<bool>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of these settings. Keys it sets win.
    pub fn overridden_by(self, overrides: Settings) -> Settings {
        Settings {
            upper_case: overrides.upper_case.or(self.upper_case),
            diagram: DiagramSettings {
                theme: overrides.diagram.theme.or(self.diagram.theme),
                show_columns: overrides.diagram.show_columns.or(self.diagram.show_columns),
                show_types: overrides.diagram.show_types.or(self.diagram.show_types),
            },
        }
    }

    /// Options from this file, defaults for anything it leaves out.
    pub fn options(&self) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        GenerateOptions {
            use_upper_case: self.upper_case.unwrap_or(defaults.use_upper_case),
            show_columns: self.diagram.show_columns.unwrap_or(defaults.show_columns),
            show_types: self.diagram.show_types.unwrap_or(defaults.show_types),
            theme: self.diagram.theme.clone().unwrap_or(defaults.theme),
        }
    }
}
