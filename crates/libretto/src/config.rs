//! Registry configuration.
//!
//! Load order (later wins):
//! 1. Compiled defaults
//! 2. A TOML file, when one is given
//! 3. Environment variables (`LIBRETTO_*`)
//!
//! # Example Config
//!
//! ```toml
//! [server]
//! name = "weather"
//! version = "1.2.0"
//! instructions = "Ask for the weather by city name."
//!
//! [protocol]
//! version = "2024-11-05"
//!
//! [codec]
//! mode = "compact"
//!
//! [listing]
//! page_size = 50
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::EncodeMode;
use crate::types::protocol::{Implementation, PROTOCOL_VERSION};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Information about where config values came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Server identity reported by `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_name")]
    pub name: String,

    #[serde(default = "ServerConfig::default_version")]
    pub version: String,

    /// Instructions for the LLM, sent with the initialize result.
    #[serde(default)]
    pub instructions: Option<String>,
}

impl ServerConfig {
    fn default_name() -> String {
        "libretto".to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    pub fn implementation(&self) -> Implementation {
        Implementation::new(&self.name, &self.version)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            version: Self::default_version(),
            instructions: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProtocolConfig {
    /// MCP protocol version advertised by `initialize`.
    /// Default: 2024-11-05
    #[serde(default = "ProtocolConfig::default_version")]
    pub version: String,
}

impl ProtocolConfig {
    fn default_version() -> String {
        PROTOCOL_VERSION.to_string()
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CodecConfig {
    /// Omission policy for encoded results.
    #[serde(default)]
    pub mode: EncodeMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    /// Entries per `*/list` page. Unset means a single page.
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Complete registry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub protocol: ProtocolConfig,

    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub listing: ListingConfig,
}

impl RegistryConfig {
    /// Parse a TOML document. Missing sections keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    /// Load a TOML file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&contents, path)
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();

        let mut config = match config_path {
            Some(path) => {
                let config = Self::load_from(path)?;
                sources.files.push(path.to_path_buf());
                config
            }
            None => Self::default(),
        };

        sources.env_overrides = config.apply_env_overrides()?;

        Ok((config, sources))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `LIBRETTO_*` overrides from the process environment.
    ///
    /// Returns the names of the variables that were applied.
    pub fn apply_env_overrides(&mut self) -> Result<Vec<String>, ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<Vec<String>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();

        if let Some(v) = lookup("LIBRETTO_SERVER_NAME") {
            self.server.name = v;
            applied.push("LIBRETTO_SERVER_NAME".to_string());
        }
        if let Some(v) = lookup("LIBRETTO_SERVER_VERSION") {
            self.server.version = v;
            applied.push("LIBRETTO_SERVER_VERSION".to_string());
        }
        if let Some(v) = lookup("LIBRETTO_ENCODE_MODE") {
            self.codec.mode = v.parse().map_err(|message| ConfigError::Invalid {
                key: "LIBRETTO_ENCODE_MODE".to_string(),
                message,
            })?;
            applied.push("LIBRETTO_ENCODE_MODE".to_string());
        }
        if let Some(v) = lookup("LIBRETTO_PAGE_SIZE") {
            let size = v.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "LIBRETTO_PAGE_SIZE".to_string(),
                message: e.to_string(),
            })?;
            self.listing.page_size = Some(size);
            applied.push("LIBRETTO_PAGE_SIZE".to_string());
        }

        self.validate()?;
        Ok(applied)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == Some(0) {
            return Err(ConfigError::Invalid {
                key: "listing.page_size".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.server.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "server.name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
