//! Process configuration loaded via OrthoConfig.
//!
//! Database credentials come from `DB_USERNAME`, `DB_PASSWORD`, `DB_HOST`
//! and `DB_NAME` (plus optional `DB_PORT` and `DB_MAX_CONNECTIONS`); the
//! listener address comes from `KODERS_BIND_ADDR`.

use std::ffi::OsString;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::PoolConfig;

/// Address the HTTP server binds to when `KODERS_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const PROGRAM_NAME: &str = "koders";

/// Configuration failures detected before the server starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("missing required setting {variable}")]
    Missing { variable: &'static str },
    /// The settings do not form a valid connection URL.
    #[error("invalid database URL: {message}")]
    InvalidUrl { message: String },
    /// The bind address could not be parsed.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// OrthoConfig could not merge the configuration layers.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
}

impl ConfigError {
    fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    fn load(error: &impl std::fmt::Display) -> Self {
        Self::Load {
            message: error.to_string(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    /// Database name.
    pub name: Option<String>,
    /// Overrides any port given in `host`.
    pub port: Option<u16>,
    /// Upper bound on pooled connections.
    pub max_connections: Option<u32>,
}

impl DatabaseSettings {
    /// Load settings from the environment and configuration files, ignoring
    /// command-line arguments.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a layer holds malformed values.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| ConfigError::load(&err))
    }

    /// Build the PostgreSQL connection URL with percent-encoded credentials.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] for an absent credential and
    /// [`ConfigError::InvalidUrl`] when the host cannot form a URL.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let username = required(self.username.as_deref(), "DB_USERNAME")?;
        let password = required(self.password.as_deref(), "DB_PASSWORD")?;
        let host = required(self.host.as_deref(), "DB_HOST")?;
        let name = required(self.name.as_deref(), "DB_NAME")?;

        let mut url = Url::parse(&format!("postgres://{host}"))
            .map_err(|err| ConfigError::invalid_url(err.to_string()))?;
        url.set_username(username)
            .map_err(|()| ConfigError::invalid_url("host does not accept credentials"))?;
        url.set_password(Some(password))
            .map_err(|()| ConfigError::invalid_url("host does not accept credentials"))?;
        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|()| ConfigError::invalid_url("host does not accept a port"))?;
        }
        url.set_path(&format!("/{name}"));
        Ok(url.into())
    }

    /// Pool configuration for these settings.
    ///
    /// # Errors
    /// Propagates [`DatabaseSettings::connection_url`] failures.
    pub fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let config = PoolConfig::new(self.connection_url()?);
        Ok(match self.max_connections {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }
}

fn required<'a>(value: Option<&'a str>, variable: &'static str) -> Result<&'a str, ConfigError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing { variable })
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KODERS")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
}

impl ServerSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a layer holds malformed values.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| ConfigError::load(&err))
    }

    /// Parsed bind address, defaulting to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }
}
