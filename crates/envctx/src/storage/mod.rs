//! User storage behind the service environment.

mod inmemory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::User;

pub use inmemory::InMemoryUsers;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository for user lookups by API token.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets the user an API token was issued to.
    async fn get_user_by_token(&self, token: &str) -> Result<Option<User>>;

    /// Issues `token` to `user`.
    async fn create_user(&self, token: &str, user: &User) -> Result<()>;
}
