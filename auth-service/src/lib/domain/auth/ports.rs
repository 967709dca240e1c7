use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::HashError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::errors::UserStoreError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for it.
    ///
    /// # Arguments
    /// * `credentials` - Validated email and password
    ///
    /// # Returns
    /// Access token for the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing, storage or signing failed
    async fn register(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Hashing, storage or signing failed
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;
}

/// Persistence operations for user accounts.
///
/// Email uniqueness is enforced by the store itself and reported atomically
/// from `create`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Created user with its store-assigned identifier
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `Unavailable` - Storage operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError>;
}

/// One-way, salted password hashing.
///
/// Implementations are CPU bound and synchronous.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a plaintext password. Two calls with the same input differ.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Succeeds iff `password` produced `hash`; otherwise `HashError::Mismatch`.
    fn verify(&self, password: &str, hash: &str) -> Result<(), HashError>;
}

/// Issues and validates bearer tokens carrying a user identifier.
pub trait TokenProvider: Send + Sync + 'static {
    fn issue(&self, user_id: UserId) -> Result<AccessToken, TokenError>;

    /// Resolve a token to its user; any failure is `TokenError::Invalid`.
    fn validate(&self, token: &str) -> Result<UserId, TokenError>;
}
