//! # Configuration
//!
//! YAML configuration, read from the first of:
//!
//! 1. the path given with `--config`,
//! 2. `/etc/cms/config.yaml`,
//! 3. `./config.yaml`.
//!
//! ```yaml
//! port: 8080
//! adminAssets: ./web
//! maxBodyBytes: 2097152
//! types:
//!   - name: users
//!     id: id
//!     schema: '{"type":"object","required":["id","name"]}'
//! provider:
//!   name: memory
//!   initialData:
//!     - type: users
//!       id: "1"
//!       data: {id: "1", name: seed}
//! ```
//!
//! The `PORT` environment variable overrides `port`.

use std::path::{Path, PathBuf};

use cms_core::{Object, TypeDef};
use serde::Deserialize;
use thiserror::Error;

use crate::state::DEFAULT_MAX_BODY_BYTES;

/// Locations searched when no explicit path is given.
pub const SEARCH_PATHS: &[&str] = &["/etc/cms/config.yaml", "config.yaml"];

/// Errors while locating or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found (searched {searched:?})")]
    NotFound { searched: Vec<PathBuf> },

    #[error("unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {name} value {value:?}: {reason}")]
    Env {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_admin_assets")]
    pub admin_assets: PathBuf,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    pub provider: ProviderConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_admin_assets() -> PathBuf {
    PathBuf::from("./web")
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Storage backend selection, tagged by `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Process memory, optionally seeded.
    Memory {
        #[serde(default, rename = "initialData")]
        initial_data: Vec<SeedRecord>,
    },
    /// An S3-compatible bucket. `gcs` selects the same backend for Google
    /// Cloud Storage's interoperability endpoint.
    #[serde(alias = "gcs")]
    S3(S3ProviderConfig),
}

/// One object preloaded into the memory provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    /// Derived from `data` via the type's id field when omitted.
    #[serde(default)]
    pub id: Option<String>,
    pub data: Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ProviderConfig {
    pub bucket: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse one file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &text)
    }

    /// Load `explicit` if given, otherwise the first existing search path.
    /// Returns the path that was used.
    pub fn discover(explicit: Option<&Path>) -> Result<(PathBuf, Self), ConfigError> {
        if let Some(path) = explicit {
            return Ok((path.to_path_buf(), Self::load(path)?));
        }
        let candidates: Vec<PathBuf> = SEARCH_PATHS.iter().map(PathBuf::from).collect();
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Ok((path.clone(), Self::load(path)?)),
            None => Err(ConfigError::NotFound {
                searched: candidates,
            }),
        }
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("PORT") {
            self.port = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    name: "PORT",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}
