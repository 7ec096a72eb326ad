//! In-memory credential store backing the reference deployment and tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::CredentialStore;

/// Users plus a token-to-owner index, kept under one lock so lookups and
/// uniqueness checks observe a consistent snapshot.
#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    token_owner: HashMap<String, Uuid>,
}

/// Credential store keeping every user in process memory
///
/// This store backs the reference server and the test suites. It enforces
/// the same contract a database-backed implementation would: versioned
/// saves and a hard uniqueness constraint on token strings.
pub struct InMemoryCredentialStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    /// Registers a new user.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Conflict)` - The id, username, or one of the
    ///   user's token strings is already registered
    pub async fn add_user(&self, user: User) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.users.contains_key(&user.id) {
            return Err(DomainError::Conflict {
                message: format!("user {} already exists", user.id),
            });
        }
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Conflict {
                message: format!("username {} is already taken", user.username),
            });
        }
        for token in &user.refresh_tokens {
            if inner.token_owner.contains_key(&token.token) {
                return Err(DomainError::Conflict {
                    message: "refresh token already exists".to_string(),
                });
            }
        }

        for token in &user.refresh_tokens {
            inner.token_owner.insert(token.token.clone(), user.id);
        }
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner
            .token_owner
            .get(token)
            .and_then(|owner| inner.users.get(owner))
            .cloned())
    }

    async fn refresh_token_exists(&self, token: &str) -> Result<bool, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.token_owner.contains_key(token))
    }

    async fn save_user(&self, mut user: User) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        let stored_version = match inner.users.get(&user.id) {
            Some(stored) => stored.version,
            None => {
                return Err(DomainError::Internal {
                    message: format!("cannot save unknown user {}", user.id),
                });
            }
        };
        if stored_version != user.version {
            return Err(DomainError::Conflict {
                message: format!("user {} was modified concurrently", user.id),
            });
        }

        // Token strings are a hard constraint here, not just a factory probe.
        let mut seen = HashSet::new();
        for token in &user.refresh_tokens {
            if !seen.insert(token.token.as_str()) {
                return Err(DomainError::Conflict {
                    message: "duplicate refresh token in collection".to_string(),
                });
            }
            if let Some(owner) = inner.token_owner.get(&token.token) {
                if *owner != user.id {
                    return Err(DomainError::Conflict {
                        message: "refresh token already exists".to_string(),
                    });
                }
            }
        }

        user.version += 1;

        // Reindex: swept tokens drop out, new ones are registered.
        inner.token_owner.retain(|_, owner| *owner != user.id);
        for token in &user.refresh_tokens {
            inner.token_owner.insert(token.token.clone(), user.id);
        }
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }
}
