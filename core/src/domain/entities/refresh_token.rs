//! Refresh token entity and its rotation lifecycle.
//!
//! Tokens are opaque random strings owned by exactly one user. Rotation
//! links each revoked token to its successor through `replaced_by_token`,
//! forming singly linked chains that the reuse detector can walk.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Audit note recorded when rotation replaces a token with a successor
pub const REASON_REPLACED: &str = "Replaced by new token";

/// Audit note recorded when a token is revoked explicitly, outside rotation
pub const REASON_REVOKED_WITHOUT_REPLACEMENT: &str = "Revoked without replacement";

/// Refresh token for maintaining user sessions
///
/// A token is active until it is revoked or its expiry passes, whichever
/// comes first. Revocation is permanent: `revoked_at`, once set, is never
/// cleared, and `replaced_by_token` is only ever written during rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque token string; unique across all users
    pub token: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Absolute expiry timestamp
    pub expires_at: DateTime<Utc>,

    /// Client IP the token was issued to, when known
    pub created_by_ip: Option<String>,

    /// Timestamp of revocation; `None` while the token has never been revoked
    pub revoked_at: Option<DateTime<Utc>>,

    /// Client IP that triggered the revocation, when known
    pub revoked_by_ip: Option<String>,

    /// Successor token recorded during rotation; stays empty for tokens
    /// revoked without replacement
    pub replaced_by_token: Option<String>,

    /// Free-text audit note explaining why the token was revoked
    pub reason_revoked: Option<String>,
}

impl RefreshToken {
    /// Creates a new active refresh token.
    ///
    /// # Arguments
    ///
    /// * `token` - The opaque token string
    /// * `ttl` - Lifetime of the token, counted from now
    /// * `created_by_ip` - Client address the token is issued to
    pub fn new(token: String, ttl: Duration, created_by_ip: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            token,
            created_at: now,
            expires_at: now + ttl,
            created_by_ip: created_by_ip.map(str::to_string),
            revoked_at: None,
            revoked_by_ip: None,
            replaced_by_token: None,
            reason_revoked: None,
        }
    }

    /// Checks if the token has passed its expiry.
    ///
    /// A token whose expiry equals the current instant is already expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks if the token can still be exchanged: neither revoked nor expired.
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Revokes the token, recording when, from where, and why.
    ///
    /// # Arguments
    ///
    /// * `ip` - Client address that triggered the revocation
    /// * `reason` - Audit note stored on the record
    pub fn revoke(&mut self, ip: Option<&str>, reason: &str) {
        self.revoked_at = Some(Utc::now());
        self.revoked_by_ip = ip.map(str::to_string);
        self.reason_revoked = Some(reason.to_string());
    }

    /// Records the successor that replaced this token during rotation.
    pub fn mark_replaced(&mut self, successor: &str) {
        self.replaced_by_token = Some(successor.to_string());
    }
}
