//! Driving port for account management and token authentication.
//!
//! Inbound adapters call it to register users, exchange credentials for a
//! token, and resolve a presented token to the requesting user.

use async_trait::async_trait;

use crate::domain::{AuthToken, Email, Error, LoginCredentials, Password, User, UserId, UserName};

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: Email,
    pub password: Password,
    pub name: UserName,
}

/// Profile fields a user may change; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<UserName>,
    pub password: Option<Password>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an active, unprivileged account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Create an account with staff and superuser privileges.
    async fn create_superuser(&self, email: Email, password: Password) -> Result<User, Error>;

    /// Verify credentials and return the user's API token.
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Resolve a presented token to an active user.
    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error>;

    async fn profile(&self, user: &UserId) -> Result<User, Error>;

    async fn update_profile(&self, user: &UserId, changes: ProfileChanges) -> Result<User, Error>;

    /// Delete the account and every event it created.
    async fn delete_account(&self, user: &UserId) -> Result<(), Error>;
}
