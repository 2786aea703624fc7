//! Account service: registration, token exchange and token authentication.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ProfileChanges, Registration, TokenRepository, TokenRepositoryError, UserAccounts,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthToken, Email, Error, LoginCredentials, Password, PasswordHash, User, UserFlags, UserId,
    UserName,
};

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";
const INVALID_TOKEN: &str = "Invalid token.";
const INACTIVE_USER: &str = "User inactive or deleted.";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict("user with this email already exists.")
        }
    }
}

fn map_token_error(error: TokenRepositoryError) -> Error {
    match error {
        TokenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("token repository unavailable: {message}"))
        }
        TokenRepositoryError::Query { message } => {
            Error::internal(format!("token repository error: {message}"))
        }
    }
}

fn hash_password(password: &Password) -> Result<PasswordHash, Error> {
    PasswordHash::hash(password).map_err(|err| Error::internal(err.to_string()))
}

/// Account service implementing [`UserAccounts`].
#[derive(Clone)]
pub struct UserAccountsService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> UserAccountsService<U, T> {
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> UserAccountsService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn create(
        &self,
        email: Email,
        password: &Password,
        name: UserName,
        flags: UserFlags,
    ) -> Result<User, Error> {
        let user = User::new(UserId::random(), email, name, hash_password(password)?, flags);
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), superuser = flags.is_superuser, "account created");
        Ok(user)
    }

    async fn existing(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U, T> UserAccounts for UserAccountsService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            email,
            password,
            name,
        } = registration;
        self.create(email, &password, name, UserFlags::regular())
            .await
    }

    async fn create_superuser(&self, email: Email, password: Password) -> Result<User, Error> {
        self.create(email, &password, UserName::empty(), UserFlags::superuser())
            .await
    }

    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .filter(|user| user.is_active())
            .filter(|user| user.password_hash().verify(credentials.password()));
        let Some(user) = user else {
            warn!("token request rejected");
            return Err(Error::invalid_request(INVALID_CREDENTIALS));
        };

        self.tokens
            .get_or_insert(user.id(), &AuthToken::generate())
            .await
            .map_err(map_token_error)
    }

    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error> {
        let Some(user_id) = self
            .tokens
            .find_user_id(token)
            .await
            .map_err(map_token_error)?
        else {
            warn!("unknown token presented");
            return Err(Error::unauthorized(INVALID_TOKEN));
        };

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))?;
        if !user.is_active() {
            warn!(user_id = %user.id(), "inactive user presented a token");
            return Err(Error::unauthorized(INACTIVE_USER));
        }
        Ok(user)
    }

    async fn profile(&self, user: &UserId) -> Result<User, Error> {
        self.existing(user).await
    }

    async fn update_profile(&self, user: &UserId, changes: ProfileChanges) -> Result<User, Error> {
        let mut current = self.existing(user).await?;
        if let Some(name) = changes.name {
            current = current.with_name(name);
        }
        if let Some(password) = changes.password {
            current = current.with_password_hash(hash_password(&password)?);
        }
        self.users.update(&current).await.map_err(map_user_error)?;
        info!(user_id = %user, "profile updated");
        Ok(current)
    }

    async fn delete_account(&self, user: &UserId) -> Result<(), Error> {
        let deleted = self.users.delete(user).await.map_err(map_user_error)?;
        if !deleted {
            return Err(Error::not_found(format!("user {user} not found")));
        }
        info!(user_id = %user, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_accounts_tests.rs"]
mod tests;
