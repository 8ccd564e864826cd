//! # rf-config
//!
//! Layered runtime settings: built-in defaults, then an optional
//! `rusty-forum.toml`, then `RUSTY_FORUM__SECTION__KEY` environment variables.
//! A `.env` file in the working directory is loaded first if present.

use config::{Config, Environment, File, Map};
use secrecy::SecretString;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const ENV_PREFIX: &str = "RUSTY_FORUM";
pub const DEFAULT_CONFIG_FILE: &str = "rusty-forum.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound for a whole request, store calls included.
    pub request_timeout_secs: u64,
    /// Set the `Secure` flag on the session cookie. Leave off for plain-HTTP development.
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Settings {
    /// Loads `.env`, then the default config file (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("loaded environment from {}", path.display());
        }
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)), None)
    }

    /// Loads from an optional file and either the real environment (`env = None`)
    /// or an explicit variable map.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.request_timeout_secs", 30_i64)?
            .set_default("server.secure_cookies", false)?
            .set_default("database.url", "sqlite://rusty_forum.db")?
            .set_default("database.max_connections", 10_i64)?
            .set_default("database.acquire_timeout_secs", 5_i64)?
            .set_default("log.filter", "info,rusty_forum=debug,tower_http=debug")?
            .set_default("log.format", "pretty")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::load_from(None, env(&[])).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.address().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(settings.database.url.expose_secret(), "sqlite://rusty_forum.db");
        assert_eq!(settings.log.format, LogFormat::Pretty);
        assert!(!settings.server.secure_cookies);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::load_from(
            None,
            env(&[
                ("RUSTY_FORUM__SERVER__PORT", "8080"),
                ("RUSTY_FORUM__DATABASE__URL", "sqlite::memory:"),
                ("RUSTY_FORUM__LOG__FORMAT", "json"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url.expose_secret(), "sqlite::memory:");
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_zero_port_and_unknown_format() {
        let err = Settings::load_from(None, env(&[("RUSTY_FORUM__SERVER__PORT", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::load_from(None, env(&[("RUSTY_FORUM__LOG__FORMAT", "xml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn database_url_is_redacted_in_debug_output() {
        let settings = Settings::load_from(
            None,
            env(&[("RUSTY_FORUM__DATABASE__URL", "sqlite://secret-path.db")]),
        )
        .unwrap();
        assert!(!format!("{settings:?}").contains("secret-path"));
    }
}
