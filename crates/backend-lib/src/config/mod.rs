// ============================
// accounts-backend-lib/src/config/mod.rs
// ============================
//! Configuration management.
//!
//! Sources are layered with `figment`: built-in defaults, then a TOML file
//! (`accounts.toml` unless a path is given), then `ACCOUNTS_` environment
//! variables. Nested keys use `__`, e.g. `ACCOUNTS_SERVER__PORT=9000`.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::auth::MIN_PASSWORD_LENGTH;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "accounts.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ACCOUNTS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub hasher: HasherSettings,
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// Minimum registration password length, in characters
    pub min_password_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding `accounts.json` for the file backend
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Scrypt,
    Argon2,
}

/// Password hashing parameters. Only the selected algorithm's parameters
/// affect new hashes; stored hashes carry their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HasherSettings {
    pub algorithm: HashAlgorithm,
    pub scrypt_log_n: u8,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            hasher: HasherSettings::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("data"),
        }
    }
}

impl Default for HasherSettings {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Scrypt,
            scrypt_log_n: 15,
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
        }
    }
}

impl ServerSettings {
    /// Resolve `host:port` to a socket address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| ConfigError::Invalid(format!("server address {}: {e}", self.host)))?
            .next()
            .ok_or_else(|| ConfigError::Invalid(format!("server address {} did not resolve", self.host)))
    }
}

impl Settings {
    /// Load settings from defaults, the config file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let settings: Settings = Self::figment(file).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// The layered provider chain, exposed for inspection
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {LOG_LEVELS:?}, got {}",
                self.log_level
            )));
        }

        if self.min_password_length == 0 {
            return Err(ConfigError::Invalid(
                "min_password_length must be at least 1".to_string(),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }

        if self.storage.backend == StorageBackend::File && self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.path is required for the file backend".to_string(),
            ));
        }

        if !(1..=20).contains(&self.hasher.scrypt_log_n) {
            return Err(ConfigError::Invalid(
                "hasher.scrypt_log_n must be between 1 and 20".to_string(),
            ));
        }

        if self.hasher.argon2_memory_kib < 8 || self.hasher.argon2_iterations == 0 {
            return Err(ConfigError::Invalid(
                "hasher.argon2_memory_kib must be >= 8 and argon2_iterations >= 1".to_string(),
            ));
        }

        Ok(())
    }
}
