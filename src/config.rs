//! Tool configuration
//!
//! Uses RON (Rusty Object Notation) for a small, human-editable settings file.
//! Only session-independent settings live here; parameter values are never stored.

use crate::params::Primitive;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file (relative to the working directory)
pub const CONFIG_PATH: &str = "texgen.ron";

/// Settings read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Directory used by quick save and as the save dialog's starting point
    pub export_dir: PathBuf,
    /// Tab shown when the window opens
    pub start_tab: Primitive,
    /// `env_logger` filter, overrides RUST_LOG when set
    pub log_filter: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("exports"),
            start_tab: Primitive::SquareOutline,
            log_filter: None,
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load settings from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ToolConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load settings from a RON string
pub fn load_config_from_str(s: &str) -> Result<ToolConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

/// Load settings, falling back to defaults.
///
/// A missing file is normal and yields defaults with no error. A file that
/// exists but fails to read or parse yields defaults plus the error, so the
/// caller can report it once logging is up.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> (ToolConfig, Option<ConfigError>) {
    let path = path.as_ref();
    if !path.exists() {
        return (ToolConfig::default(), None);
    }
    match load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (ToolConfig::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = load_config_from_str("(start_tab: Particle)").unwrap();
        assert_eq!(config.start_tab, Primitive::Particle);
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"(export_dir: "out/sprites", start_tab: CircleOutline, log_filter: Some("texgen=debug"))"#,
        )
        .unwrap();
        assert_eq!(config.export_dir, PathBuf::from("out/sprites"));
        assert_eq!(config.start_tab, Primitive::CircleOutline);
        assert_eq!(config.log_filter.as_deref(), Some("texgen=debug"));
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            load_config_from_str("(start_tab: Hexagon)"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let (config, err) = load_or_default("definitely/not/here/texgen.ron");
        assert_eq!(config, ToolConfig::default());
        assert!(err.is_none());
    }
}
