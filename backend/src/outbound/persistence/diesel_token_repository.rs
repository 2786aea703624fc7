//! PostgreSQL-backed `TokenRepository` implementation using Diesel ORM.
//!
//! `auth_tokens.user_id` is unique, so a concurrent first login cannot
//! create two tokens for one user: the losing insert is ignored and the
//! stored key is read back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TokenRepository, TokenRepositoryError};
use crate::domain::{AuthToken, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewAuthTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Diesel-backed implementation of the `TokenRepository` port.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TokenRepositoryError {
    map_basic_pool_error(error, TokenRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TokenRepositoryError {
    map_basic_diesel_error(
        error,
        TokenRepositoryError::query,
        TokenRepositoryError::connection,
    )
}

fn parse_stored(key: &str) -> Result<AuthToken, TokenRepositoryError> {
    AuthToken::parse(key)
        .map_err(|err| TokenRepositoryError::query(format!("stored token is malformed: {err}")))
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn get_or_insert(
        &self,
        user: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(auth_tokens::table)
            .values(&NewAuthTokenRow {
                key: candidate.as_str(),
                user_id: *user.as_uuid(),
            })
            .on_conflict(auth_tokens::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let key: String = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user.as_uuid()))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        parse_stored(&key)
    }

    async fn find_user_id(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserId>, TokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owner: Option<uuid::Uuid> = auth_tokens::table
            .find(token.as_str())
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(owner.map(UserId::from_uuid))
    }
}
