//! Runtime settings read from the environment

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Seedr account credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Where the public token is persisted
    pub config_file: PathBuf,
    /// Credentials for public access, when both email and password are set
    pub credentials: Option<Credentials>,
    /// Pre-issued token, used when the config file has none
    pub env_token: Option<String>,
    pub seedr_api_url: String,
    pub seedr_timeout: Duration,
    /// Cookie signing secret; random per process when unset
    pub session_secret: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            credentials: None,
            env_token: None,
            seedr_api_url: seedr::DEFAULT_API_URL.to_string(),
            seedr_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_secret: None,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function
    ///
    /// Empty values count as unset. Unparsable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let credentials = match (get("SEEDR_EMAIL"), get("SEEDR_PASSWORD")) {
            (Some(email), Some(password)) => Some(Credentials { email, password }),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("SEEDR_EMAIL and SEEDR_PASSWORD must both be set; ignoring credentials");
                None
            }
            (None, None) => None,
        };

        let port = get("PORT")
            .map(|raw| {
                raw.parse().unwrap_or_else(|_| {
                    tracing::warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                    DEFAULT_PORT
                })
            })
            .unwrap_or(defaults.port);

        let seedr_timeout = get("SEEDR_TIMEOUT_SECS")
            .map(|raw| match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!("Invalid SEEDR_TIMEOUT_SECS {:?}, using {}", raw, DEFAULT_TIMEOUT_SECS);
                    defaults.seedr_timeout
                }
            })
            .unwrap_or(defaults.seedr_timeout);

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            config_file: get("CONFIG_FILE").map(PathBuf::from).unwrap_or(defaults.config_file),
            credentials,
            env_token: get("SEEDR_TOKEN"),
            seedr_api_url: get("SEEDR_API_URL").unwrap_or(defaults.seedr_api_url),
            seedr_timeout,
            session_secret: get("SESSION_SECRET"),
        }
    }
}
