//! User account model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::PasswordHash;

/// Maximum stored length of an email address.
pub const EMAIL_MAX: usize = 255;
/// Maximum stored length of a user's name.
pub const USER_NAME_MAX: usize = 255;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "Users must have an email address."),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Email address used as the login identifier.
///
/// ## Invariants
/// - Surrounding whitespace is removed.
/// - The domain part (after the last `@`) is lower-cased; the local part is
///   kept exactly as supplied.
///
/// # Examples
/// ```
/// use calendar_backend::domain::Email;
///
/// let email = Email::new("Test2@EXAMPLE.COM").unwrap();
/// assert_eq!(email.as_ref(), "Test2@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape only: one `@`, no whitespace, non-empty halves.
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };

        let normalized = format!("{local}@{}", domain.to_lowercase());
        if normalized.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(normalized))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Full name of the account holder.
///
/// Accounts bootstrapped from the command line carry an empty name; every
/// other path goes through [`UserName::new`], which rejects blanks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(name))
    }

    /// The empty name given to bootstrapped superusers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// First whitespace-separated word, or `""` when the name is empty.
    ///
    /// # Examples
    /// ```
    /// use calendar_backend::domain::UserName;
    ///
    /// let name = UserName::new("Ada King Lovelace").unwrap();
    /// assert_eq!(name.first_name(), "Ada");
    /// ```
    pub fn first_name(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or_default()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Privilege flags carried by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserFlags {
    /// Active account without elevated privileges.
    pub fn regular() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Active account with staff and superuser privileges.
    pub fn superuser() -> Self {
        Self {
            is_active: true,
            is_staff: true,
            is_superuser: true,
        }
    }
}

impl Default for UserFlags {
    fn default() -> Self {
        Self::regular()
    }
}

/// Application user.
///
/// ## Invariants
/// - `email` is unique across accounts (enforced by repositories).
/// - The password is only ever held as an argon2 hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: UserName,
    password_hash: PasswordHash,
    flags: UserFlags,
}

impl User {
    pub fn new(
        id: UserId,
        email: Email,
        name: UserName,
        password_hash: PasswordHash,
        flags: UserFlags,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            flags,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn flags(&self) -> UserFlags {
        self.flags
    }

    pub fn is_active(&self) -> bool {
        self.flags.is_active
    }

    /// Replace the name, keeping every other field.
    pub fn with_name(mut self, name: UserName) -> Self {
        self.name = name;
        self
    }

    /// Replace the password hash, keeping every other field.
    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = password_hash;
        self
    }

    pub fn with_flags(mut self, flags: UserFlags) -> Self {
        self.flags = flags;
        self
    }
}
