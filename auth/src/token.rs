use chrono::Duration;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;

/// Token lifecycle errors.
///
/// Validation failures are deliberately opaque: callers learn only that the
/// token cannot be trusted, never whether it was expired, forged or malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid token")]
    Invalid,
}

/// Issues and validates signed, time-limited bearer tokens.
pub struct TokenManager {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

impl TokenManager {
    /// Create a new token manager.
    ///
    /// # Arguments
    /// * `secret` - Secret key for JWT signing
    /// * `lifetime` - How long an issued token stays valid
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            lifetime,
        }
    }

    /// Issue a token for `subject` expiring one lifetime from now.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, subject: impl ToString) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, self.lifetime);

        self.jwt_handler
            .encode(&claims)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed, expired, forged or has the wrong claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.jwt_handler.decode::<Claims>(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::Invalid
        })
    }
}
