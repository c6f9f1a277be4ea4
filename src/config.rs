//! Preferences for a menuconfig session, each with a built-in default.
//!
//! Settings come from `menuconfig.toml` in the working directory when it exists and parses;
//! otherwise every field falls back to its default.

use facet::Facet;
use std::fs;
use std::path::Path;

/// Name of the optional preferences file in the working directory.
pub const CONFIG_FILE: &str = "menuconfig.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from menuconfig.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "CLAUDE.md".to_string())]
    /// Document name looked up at the project root and under `~/.claude`.
    pub file_name: String,
    #[facet(default = "menuconfig.bak".to_string())]
    /// Suffix appended to the document name for the pre-save backup.
    pub backup_suffix: String,
    #[facet(default = "dracula".to_string())]
    /// Syntax highlighting theme for the preview.
    pub theme: String,
    #[facet(default = false)]
    /// Start with every section expanded instead of only the top level.
    pub expand_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_name: "CLAUDE.md".to_string(),
            backup_suffix: "menuconfig.bak".to_string(),
            theme: "dracula".to_string(),
            expand_all: false,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from menuconfig.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
            tracing::warn!(path = %path.display(), "ignoring unparseable config");
        }
        Self::default()
    }
}
