//! Authentication utilities library
//!
//! Provides the security primitives behind the auth service:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation
//! - Bearer token issuance with a fixed lifetime
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenManager;
//! use chrono::Duration;
//!
//! let tokens = TokenManager::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let token = tokens.issue(42).unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenManager;
