use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Context, Result};

use crate::width::IntWidth;

pub const DEFAULT_CONFIG_FILE: &str = "varcodec.toml";
pub const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024; // 16MB

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub default_width: IntWidth,
    pub log_filter: String,
    pub hex_separator: String,
    pub max_input_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_width: IntWidth::U64,
            log_filter: "varcodec=warn".to_string(),
            hex_separator: " ".to_string(),
            max_input_bytes: MAX_INPUT_BYTES,
        }
    }
}

impl CodecConfig {
    /// Read `config_path` (or `varcodec.toml`) when it exists, defaults otherwise.
    /// An explicitly named file that is missing is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)
                .with_context(|| format!("reading config {}", config_file))?;
            let config: CodecConfig = toml::from_str(&content)
                .with_context(|| format!("parsing config {}", config_file))?;
            Ok(config)
        } else if config_path.is_some() {
            anyhow::bail!("config file not found: {}", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path.as_ref(), content)
            .with_context(|| format!("writing config {}", config_path.as_ref().display()))?;
        Ok(())
    }
}
