//! # pr-config
//!
//! Layered settings for the Power Routine binary:
//! built-in defaults, then an optional `config/power-routine.*` file, then
//! `PR__`-prefixed environment variables (`PR__SERVER__PORT=9000`).
//! A `.env` file in the working directory is loaded first if present.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config/power-routine";
pub const ENV_PREFIX: &str = "PR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
struct RawIdentitySettings {
    session_salt: Option<String>,
    max_name_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    server: ServerSettings,
    identity: RawIdentitySettings,
    uploads: UploadSettings,
}

#[derive(Debug)]
pub struct IdentitySettings {
    pub session_salt: SecretString,
    pub max_name_len: usize,
}

#[derive(Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub identity: IdentitySettings,
    pub uploads: UploadSettings,
}

impl Settings {
    /// Reads the optional config file and the environment. `.env` is
    /// loaded by the binary before this runs.
    pub fn load() -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
            .build()?;
        Self::from_config(config)
    }

    /// Builds settings from an already assembled `config::Config`.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let raw: RawSettings = config.try_deserialize()?;

        if raw.identity.max_name_len == 0 {
            return Err(ConfigError::Invalid("identity.max_name_len must be positive".into()));
        }
        if raw.uploads.max_image_bytes == 0 {
            return Err(ConfigError::Invalid("uploads.max_image_bytes must be positive".into()));
        }

        let session_salt = match raw.identity.session_salt.filter(|s| !s.trim().is_empty()) {
            Some(salt) => SecretString::from(salt),
            None => {
                log::info!("no identity.session_salt configured; guest handles rotate on restart");
                SecretString::from(uuid::Uuid::new_v4().to_string())
            }
        };

        Ok(Self {
            server: raw.server,
            identity: IdentitySettings {
                session_salt,
                max_name_len: raw.identity.max_name_len,
            },
            uploads: raw.uploads,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

/// A builder preloaded with the built-in defaults.
pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("identity.max_name_len", 40)?
        .set_default("uploads.max_image_bytes", 5 * 1024 * 1024)?)
}
