//! In-memory user repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, Result, UserRepository};
use crate::models::User;

/// In-memory token → user table.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsers {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUsers {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(token).cloned())
    }

    async fn create_user(&self, token: &str, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(token) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        users.insert(token.to_string(), user.clone());
        Ok(())
    }
}
