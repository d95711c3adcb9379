use anyhow::Context;
use folio_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Element names the editor treats specially
    #[serde(default)]
    pub editor: EditorConfig,

    /// Write single-line JSON instead of pretty-printed JSON
    #[serde(default)]
    pub compact: bool,
}

impl Config {
    /// Load config from `explicit`, or from the default file in `cwd`.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            Ok(config)
        } else if explicit.is_some() {
            Err(anyhow::anyhow!("Config file not found: {}", config_path.display()))
        } else {
            Ok(Config::default())
        }
    }
}
