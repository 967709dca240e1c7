use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::HashError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::Password;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::TokenProvider;
use crate::domain::auth::ports::UserRepository;

/// Plaintext behind the hash that unknown-email logins are verified against.
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-timing-equalizer";

/// Domain service implementation for registration and login.
///
/// Every call is a linear pipeline over the injected collaborators. The only
/// shared state is a lazily computed hash used to give unknown-email logins
/// the same hashing cost as wrong-password logins.
pub struct AuthService<UR, CH, TP>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TP: TokenProvider,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    tokens: Arc<TP>,
    unknown_user_hash: OnceCell<String>,
}

impl<UR, CH, TP> AuthService<UR, CH, TP>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TP: TokenProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store implementation
    /// * `hasher` - Credential hasher implementation
    /// * `tokens` - Token issuing implementation
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, tokens: Arc<TP>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            unknown_user_hash: OnceCell::new(),
        }
    }

    // Hashing is deliberately slow, so it runs on the blocking pool.
    async fn hash_password(&self, password: &Password) -> Result<String, AuthError> {
        self.hash_plaintext(password.as_str().to_string()).await
    }

    async fn hash_plaintext(&self, plaintext: String) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Pays one verification for an email with no account, so the response
    /// time does not reveal whether the email is registered. The outcome is
    /// discarded.
    async fn verify_unknown_user(&self, password: &Password) {
        let hash = self
            .unknown_user_hash
            .get_or_try_init(|| self.hash_plaintext(UNKNOWN_USER_PASSWORD.to_string()))
            .await;

        match hash {
            Ok(hash) => {
                let _ = self.verify_password(password, hash.clone()).await;
            }
            Err(e) => tracing::warn!(error = %e, "Could not prepare unknown-user hash"),
        }
    }

    async fn verify_password(&self, password: &Password, hash: String) -> Result<(), AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();

        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| match e {
                HashError::Mismatch => AuthError::InvalidCredentials,
                HashError::Failed(msg) => AuthError::Internal(msg),
            })
    }
}

#[async_trait]
impl<UR, CH, TP> AuthServicePort for AuthService<UR, CH, TP>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TP: TokenProvider,
{
    async fn register(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let password_hash = self.hash_password(&credentials.password).await?;

        // The store's uniqueness constraint is the only existence check
        let user = self
            .repository
            .create(NewUser {
                email: credentials.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        // The account stays committed; the caller obtains a token by logging in.
        self.tokens.issue(user.id).map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Token issuance failed after registration"
            );
            AuthError::from(e)
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let Some(user) = self.repository.find_by_email(&credentials.email).await? else {
            self.verify_unknown_user(&credentials.password).await;
            return Err(AuthError::UserNotFound);
        };

        self.verify_password(&credentials.password, user.password_hash)
            .await?;

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }
}
