//! Configuration file loading

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tabalign_core::{AlignAlgorithm, PasteOptions};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Treat the first pasted line as column names
    pub has_header: bool,
    /// Field separator; `\t` or `tab` for tab
    pub delimiter: String,
    pub algorithm: AlignAlgorithm,
    /// Diff deadline in milliseconds, 0 disables it
    pub timeout_ms: u64,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Hide matching rows in the result view
    pub show_only_differences: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: "\t".to_string(),
            algorithm: AlignAlgorithm::default(),
            timeout_ms: 0,
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/tabalign/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tabalign").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. The default path is optional;
    /// if it is present but broken, defaults are used and a warning logged.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(%err, "ignoring config file");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        parse_delimiter(&self.delimiter)
    }

    pub fn paste_options(&self) -> Result<PasteOptions, ConfigError> {
        Ok(PasteOptions::default()
            .with_header(self.has_header)
            .with_delimiter(self.delimiter_byte()?))
    }
}

/// Accept a single ASCII character, or the spellings `\t` and `tab`.
pub fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
        v => Err(ConfigError::InvalidDelimiter(v.to_string())),
    }
}
