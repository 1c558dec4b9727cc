//! Backend selection for the shared secret store

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BACKEND_ENV: &str = "KEYSTASH_BACKEND";
pub const FILE_ENV: &str = "KEYSTASH_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
    #[error("The file backend requires a file path")]
    MissingFilePath,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Platform credential store
    #[default]
    Keychain,
    /// Plaintext JSON file, development only
    File,
    /// Process-local map, testing only
    Memory,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keychain" => Ok(Self::Keychain),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Read `KEYSTASH_BACKEND` (default `keychain`) and `KEYSTASH_FILE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup(BACKEND_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => BackendKind::default(),
        };
        let file_path = lookup(FILE_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let config = Self { backend, file_path };
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file, e.g. `{"backend": "file", "file_path": "secrets.json"}`
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), backend = ?config.backend, "Loaded store config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendKind::File && self.file_path.is_none() {
            return Err(ConfigError::MissingFilePath);
        }
        Ok(())
    }
}
