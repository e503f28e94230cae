use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storefront_types::StorefrontError;

/// Environment variable prefix; nested keys use `__` (e.g. `STOREFRONT_LOG__LEVEL`).
pub const ENV_PREFIX: &str = "STOREFRONT_";

fn default_api_url() -> String {
    "https://api.escuelajs.co".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_level() -> String {
    "info".to_string()
}

/// Logging configuration consumed by the binary's subscriber setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive (defaults to `info`). `RUST_LOG` wins when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API, without the `/api/v1` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds (defaults to 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Where the bearer token is persisted (defaults to `~/.storefront/token.json`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            token_path: None,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    /// Loads defaults, then the optional YAML file, then `STOREFRONT_*` env vars.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if any source fails to parse.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// Checks values that figment cannot validate structurally.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Config`] if the API URL is not http(s) or the timeout is zero.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(StorefrontError::Config(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured token path, or `~/.storefront/token.json`.
    #[must_use]
    pub fn token_path_or_default(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".storefront").join("token.json")
        })
    }
}
