//! Builders for HTTP state and startup account bootstrap.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use calendar_backend::config::SuperuserSettings;
use calendar_backend::domain::ports::UserAccounts;
use calendar_backend::domain::{Email, ErrorCode, Password};
use calendar_backend::inbound::http::state::HttpState;
use calendar_backend::outbound::memory::InMemoryStore;
use calendar_backend::outbound::persistence::{
    DieselEventRepository, DieselTokenRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build handler state over Diesel repositories when a pool is configured,
/// otherwise over a fresh in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => HttpState::from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTokenRepository::new(pool.clone())),
            Arc::new(DieselEventRepository::new(pool.clone())),
            clock,
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_repositories(store.clone(), store.clone(), store, clock)
        }
    }
}

/// Errors raised while creating the startup superuser.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("invalid superuser email: {0}")]
    Email(String),
    #[error("invalid superuser password: {0}")]
    Password(String),
    #[error("failed to create superuser: {0}")]
    Create(String),
}

/// Create the configured superuser unless the email is already registered.
///
/// Returns `true` when a new account was created.
pub(crate) async fn bootstrap_superuser(
    accounts: &dyn UserAccounts,
    settings: &SuperuserSettings,
) -> Result<bool, BootstrapError> {
    let email =
        Email::new(&settings.email).map_err(|err| BootstrapError::Email(err.to_string()))?;
    let password = Password::new(&settings.password)
        .map_err(|err| BootstrapError::Password(err.to_string()))?;

    match accounts.create_superuser(email, password).await {
        Ok(user) => {
            info!(user_id = %user.id(), "superuser created");
            Ok(true)
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            info!("superuser already exists");
            Ok(false)
        }
        Err(err) => Err(BootstrapError::Create(err.message().to_owned())),
    }
}
