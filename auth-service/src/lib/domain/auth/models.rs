use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::auth::errors::CredentialsError;
use crate::domain::auth::errors::EmailError;

lazy_static! {
    static ref LOCAL_PART_RE: Regex = Regex::new(r"^[a-zA-Z0-9._%+-]+$").unwrap();
    static ref DOMAIN_RE: Regex = Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Registered account.
///
/// The password hash is the only form of the password that is ever stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UserId)
    }
}

/// Email address type
///
/// Accepts the conventional `local@domain.tld` shape: an ASCII local part,
/// a domain containing at least one dot and a TLD of two or more letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `MissingAtSign` - No `@` separates local part and domain
    /// * `InvalidLocalPart` - Local part is empty or has characters outside `[A-Za-z0-9._%+-]`
    /// * `InvalidDomain` - Domain lacks a dot, a 2+ letter TLD, or has invalid characters
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = email.split_once('@').ok_or(EmailError::MissingAtSign)?;

        if !LOCAL_PART_RE.is_match(local) {
            return Err(EmailError::InvalidLocalPart);
        }
        if !DOMAIN_RE.is_match(domain) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(email))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password received at the boundary.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated email and password pair.
///
/// Transient: turned into a hash on registration or compared against a
/// stored hash on login, then dropped.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

impl Credentials {
    /// Validate raw input into credentials.
    ///
    /// # Errors
    /// * `Email` - Email is missing or malformed
    /// * `EmptyPassword` - Password is empty
    pub fn new(email: String, password: String) -> Result<Self, CredentialsError> {
        if email.is_empty() {
            return Err(EmailError::Empty.into());
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }

        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password(password),
        })
    }
}

/// User record to be inserted by the store, which assigns the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Signed bearer token handed to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
