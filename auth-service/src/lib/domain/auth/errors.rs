use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("email must contain '@'")]
    MissingAtSign,

    #[error("email local part is invalid")]
    InvalidLocalPart,

    #[error("email domain is invalid")]
    InvalidDomain,
}

/// Error for Credentials validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("password is required")]
    EmptyPassword,
}

/// Error reported by a credential hasher
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("password does not match")]
    Mismatch,

    #[error("password hashing failed: {0}")]
    Failed(String),
}

/// Error reported by a token provider
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Error reported by a user store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("email already exists: {0}")]
    EmailTaken(String),

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for registration and login.
///
/// Only this taxonomy crosses from the service to the transport layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] CredentialsError),

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<UserStoreError> for AuthError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::EmailTaken(_) => AuthError::UserAlreadyExists,
            UserStoreError::Unavailable(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
