//! User aggregate owning its refresh token collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::refresh_token::RefreshToken;

/// A registered account together with every refresh token issued to it
/// that has not yet been swept
///
/// The token collection is kept in issue order and may hold several
/// independent rotation chains, one per login. All lifecycle mutation goes
/// through the token services; the aggregate itself only offers lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique across the store
    pub username: String,

    /// Password hash produced by the configured verifier
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Concurrency stamp, bumped by the store on every successful save
    pub version: u64,

    /// Refresh tokens owned by this user, in issue order
    pub refresh_tokens: Vec<RefreshToken>,
}

impl User {
    /// Creates a new User instance with an empty token collection
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
            version: 0,
            refresh_tokens: Vec::new(),
        }
    }

    /// Looks up an owned refresh token by its string value
    pub fn find_refresh_token(&self, token: &str) -> Option<&RefreshToken> {
        self.refresh_tokens.iter().find(|t| t.token == token)
    }

    /// Mutable variant of [`find_refresh_token`](Self::find_refresh_token)
    pub fn find_refresh_token_mut(&mut self, token: &str) -> Option<&mut RefreshToken> {
        self.refresh_tokens.iter_mut().find(|t| t.token == token)
    }

    /// Counts tokens that are currently exchangeable
    pub fn active_token_count(&self) -> usize {
        self.refresh_tokens.iter().filter(|t| t.is_active()).count()
    }
}
