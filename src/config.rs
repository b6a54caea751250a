//! Configuration module for Keygate.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Salt used when none is configured. Startup warns when it is still in effect.
pub const DEFAULT_SALT: &str = "default_salt_change_in_production";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub keys: KeysConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which key store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database at `database.url`.
    Sqlite,
    /// Process memory; keys are lost on restart.
    Memory,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// API key hashing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysConfig {
    /// Process-wide secret mixed into every key hash.
    pub salt: String,
}

impl KeysConfig {
    /// Whether the built-in development salt is still in use.
    pub fn uses_default_salt(&self) -> bool {
        self.salt == DEFAULT_SALT
    }
}

/// Administrative endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Mount the key management endpoints.
    pub enabled: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset.
    pub filter: String,
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (KEYGATE_*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with KEYGATE_ prefix
            .add_source(
                Environment::with_prefix("KEYGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.backend", "sqlite")?
            .set_default("database.url", "sqlite://apikeys.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("keys.salt", DEFAULT_SALT)?
            .set_default("admin.enabled", true)?
            .set_default("logging.filter", "keygate=info,tower_http=info")?
            .set_default("logging.format", "json")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.salt.is_empty() {
            return Err(ConfigError::Message("keys.salt must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Message(format!(
                "logging.filter is not a valid directive: {}",
                e
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let mut builder = Config::defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_default_config() {
        let config = build(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.keys.uses_default_salt());
        assert!(config.admin.enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "keygate=info,tower_http=info");
    }

    #[test]
    fn test_logging_overrides() {
        let config = build(&[
            ("logging.format", "pretty"),
            ("logging.filter", "keygate=debug"),
        ])
        .unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.filter, "keygate=debug");
    }

    #[test]
    fn test_invalid_log_filter_rejected() {
        assert!(build(&[("logging.filter", "keygate=loud")]).is_err());
    }

    #[test]
    fn test_custom_salt() {
        let config = build(&[("keys.salt", "s3cr3t")]).unwrap();
        assert_eq!(config.keys.salt, "s3cr3t");
        assert!(!config.keys.uses_default_salt());
    }

    #[test]
    fn test_memory_backend() {
        let config = build(&[("database.backend", "memory")]).unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(build(&[("database.backend", "postgres")]).is_err());
    }

    #[test]
    fn test_empty_salt_rejected() {
        assert!(build(&[("keys.salt", "")]).is_err());
    }
}
