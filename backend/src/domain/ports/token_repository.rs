//! Driven port for API token storage. Each user holds at most one token.

use async_trait::async_trait;

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token repository adapters.
    pub enum TokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "token repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Return the user's existing token, storing `candidate` when they have
    /// none yet.
    async fn get_or_insert(
        &self,
        user: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenRepositoryError>;

    /// Resolve a token to its owner.
    async fn find_user_id(&self, token: &AuthToken)
    -> Result<Option<UserId>, TokenRepositoryError>;
}
