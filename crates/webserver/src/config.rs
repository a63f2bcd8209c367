//! Persisted configuration holding the public access token

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Single configuration record stored as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedConfig {
    /// Token used for public access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seedr_token: Option<String>,
    /// Keys we do not manage, kept as-is on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersistedConfig {
    /// Non-empty token, if any
    pub fn token(&self) -> Option<&str> {
        self.seedr_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Reads and writes the configuration file
///
/// There is no file locking; callers that write serialize among themselves.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration
    ///
    /// Never fails: a missing file yields the default record, and an
    /// unreadable or malformed file is logged and treated as missing.
    pub fn load(&self) -> PersistedConfig {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PersistedConfig::default(),
            Err(e) => {
                tracing::warn!("Error loading config {}: {}", self.path.display(), e);
                return PersistedConfig::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Error parsing config {}: {}", self.path.display(), e);
            PersistedConfig::default()
        })
    }

    /// Overwrite the configuration file
    ///
    /// # Returns
    /// * `true` if the file was written, `false` otherwise (the error is logged)
    pub fn save(&self, config: &PersistedConfig) -> bool {
        match self.try_save(config) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving config {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Set the token in the stored record, keeping everything else
    pub fn store_token(&self, token: &str) -> bool {
        let mut config = self.load();
        config.seedr_token = Some(token.to_string());
        let saved = self.save(&config);
        if saved {
            tracing::info!("Token saved to {}", self.path.display());
        }
        saved
    }

    fn try_save(&self, config: &PersistedConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, contents)
    }
}
