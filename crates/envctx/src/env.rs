//! The environment shared by every request.
//!
//! Built once at startup and handed to the chain adapter. Handlers reach it
//! through the request context, never through globals.

use std::sync::Arc;

use crate::{
    config::Config,
    models::User,
    storage::{InMemoryUsers, Result, UserRepository},
};

/// Tokens issued to the demo users when seeding is enabled.
pub const DEMO_TOKENS: [(&str, &str, &str); 2] = [
    ("alice-token", "Alice", "alice@example.com"),
    ("bob-token", "Bob", "bob@example.com"),
];

/// Shared dependencies for all requests.
#[derive(Clone)]
pub struct AppEnv {
    /// Service name reported to clients.
    pub name: String,
    /// User repository used to resolve API tokens.
    pub users: Arc<dyn UserRepository>,
}

impl AppEnv {
    pub fn new(name: impl Into<String>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            name: name.into(),
            users,
        }
    }

    /// Builds the environment described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let users = InMemoryUsers::new();

        if config.seed_demo_users {
            for (token, name, email) in DEMO_TOKENS {
                let user = User::new(name, email);
                users.create_user(token, &user).await?;
                tracing::info!(user_id = %user.id, name = %user.name, "Seeded demo user");
            }
        }

        Ok(Self::new(config.service_name.clone(), Arc::new(users)))
    }
}

impl std::fmt::Debug for AppEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnv")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed_demo_users: bool) -> Config {
        Config {
            service_name: "test".to_string(),
            request_timeout_seconds: 10,
            seed_demo_users,
        }
    }

    #[tokio::test]
    async fn seeded_env_resolves_demo_tokens() {
        let env = AppEnv::from_config(&config(true)).await.unwrap();

        let alice = env.users.get_user_by_token("alice-token").await.unwrap();
        assert_eq!(alice.map(|u| u.name), Some("Alice".to_string()));
        assert_eq!(env.name, "test");
    }

    #[tokio::test]
    async fn unseeded_env_has_no_users() {
        let env = AppEnv::from_config(&config(false)).await.unwrap();

        let alice = env.users.get_user_by_token("alice-token").await.unwrap();
        assert!(alice.is_none());
    }
}
