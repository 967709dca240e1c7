use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::auth::errors::UserStoreError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::UserRepository;

/// Process-local user store keyed by email.
///
/// Lookup and insert happen under a single write lock, giving the same
/// atomic uniqueness guarantee as a unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: HashMap<EmailAddress, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut state = self.state.write().await;

        if state.users.contains_key(&user.email) {
            return Err(UserStoreError::EmailTaken(user.email.to_string()));
        }

        state.next_id += 1;
        let created = User {
            id: UserId(state.next_id),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(created.email.clone(), created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        Ok(self.state.read().await.users.get(email).cloned())
    }
}
