//! Authentication primitives: credentials, password hashes and API tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use rand::RngCore;
use zeroize::Zeroizing;

use super::user::{Email, UserValidationError};

/// Length in bytes of the random material behind an [`AuthToken`].
const TOKEN_BYTES: usize = 20;
/// Length of the textual token key.
pub const TOKEN_KEY_LEN: usize = TOKEN_BYTES * 2;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error(transparent)]
    Email(#[from] UserValidationError),
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Plain-text password held only long enough to hash or verify it.
///
/// Whitespace is kept as supplied; only the empty string is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(password: &str) -> Result<Self, CredentialsValidationError> {
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Validated login credentials used by the account service.
///
/// # Examples
/// ```
/// use calendar_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@EXAMPLE.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Failure raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Argon2 PHC string for a stored password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn hash(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })?;
        Ok(Self(phc.to_string()))
    }

    /// Wrap a hash loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Whether `password` matches. Malformed stored hashes never match.
    pub fn verify(&self, password: &Password) -> bool {
        let Ok(parsed) = PhcString::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Error returned when a presented token key is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token must be {TOKEN_KEY_LEN} hexadecimal characters")]
pub struct TokenFormatError;

/// Opaque API token key presented as `Authorization: Token <key>`.
///
/// ## Invariants
/// - Exactly [`TOKEN_KEY_LEN`] lower-case hexadecimal characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Validate a key supplied by a client or loaded from storage.
    ///
    /// # Examples
    /// ```
    /// use calendar_backend::domain::AuthToken;
    ///
    /// let key = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";
    /// assert_eq!(AuthToken::parse(key).unwrap().as_str(), key);
    /// assert!(AuthToken::parse("short").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TokenFormatError> {
        let valid = raw.len() == TOKEN_KEY_LEN
            && raw
                .bytes()
                .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte));
        if !valid {
            return Err(TokenFormatError);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(**redacted**)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::Email(UserValidationError::EmptyEmail))]
    #[case("   ", "pw", CredentialsValidationError::Email(UserValidationError::EmptyEmail))]
    #[case("nobody", "pw", CredentialsValidationError::Email(UserValidationError::InvalidEmail))]
    #[case("ada@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_keeps_whitespace() {
        let password = Password::new("  spaced  ").expect("non-empty");
        assert_eq!(password.expose(), "  spaced  ");
    }

    #[rstest]
    fn hash_verifies_only_the_original_password() {
        let password = Password::new("correct horse").expect("password");
        let hash = PasswordHash::hash(&password).expect("hash");

        assert!(hash.as_str().starts_with("$argon2"));
        assert!(hash.verify(&password));
        assert!(!hash.verify(&Password::new("wrong horse").expect("password")));
    }

    #[rstest]
    fn malformed_stored_hash_never_verifies() {
        let hash = PasswordHash::from_stored("not-a-phc-string");
        assert!(!hash.verify(&Password::new("anything").expect("password")));
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let password = Password::new("hunter2").expect("password");
        let token = AuthToken::generate();
        assert!(!format!("{password:?}").contains("hunter2"));
        assert!(!format!("{token:?}").contains(token.as_str()));
    }

    #[rstest]
    fn generated_tokens_are_well_formed_and_distinct() {
        let first = AuthToken::generate();
        let second = AuthToken::generate();

        assert_eq!(first.as_str().len(), TOKEN_KEY_LEN);
        assert_eq!(AuthToken::parse(first.as_str()), Ok(first.clone()));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4")]
    #[case("9944B09199C62BCF9418AD846DD0E4BBDFC6EE4B")]
    #[case("zz44b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    fn rejects_malformed_tokens(#[case] raw: &str) {
        assert_eq!(AuthToken::parse(raw), Err(TokenFormatError));
    }
}
