//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CALENDAR_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the calendar server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALENDAR")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the server keeps its data in
    /// memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Email of a superuser created at startup if absent.
    pub create_superuser_email: Option<String>,
    /// Password for the startup superuser.
    pub create_superuser_password: Option<String>,
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("superuser email and password must be configured together")]
    PartialSuperuser,
}

/// Credentials for the account bootstrapped at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperuserSettings {
    pub email: String,
    pub password: String,
}

impl AppSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Return superuser credentials when both halves are configured.
    pub fn superuser(&self) -> Result<Option<SuperuserSettings>, SettingsError> {
        match (&self.create_superuser_email, &self.create_superuser_password) {
            (Some(email), Some(password)) => Ok(Some(SuperuserSettings {
                email: email.clone(),
                password: password.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(SettingsError::PartialSuperuser),
        }
    }
}
