use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenManager;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::errors::TokenError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialHasher;
use crate::domain::auth::ports::TokenProvider;

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        PasswordHasher::hash(self, password).map_err(|e| HashError::Failed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<(), HashError> {
        PasswordHasher::verify(self, password, hash).map_err(|e| match e {
            PasswordError::Mismatch => HashError::Mismatch,
            other => HashError::Failed(other.to_string()),
        })
    }
}

impl TokenProvider for TokenManager {
    fn issue(&self, user_id: UserId) -> Result<AccessToken, TokenError> {
        TokenManager::issue(self, user_id)
            .map(AccessToken)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = TokenManager::validate(self, token).map_err(|_| TokenError::Invalid)?;

        claims.sub.parse::<UserId>().map_err(|e| {
            tracing::debug!(error = %e, "Token subject is not a user id");
            TokenError::Invalid
        })
    }
}
