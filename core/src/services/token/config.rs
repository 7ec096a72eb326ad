//! Configuration for the token lifecycle services

use chrono::Duration;

/// Configuration for token issuance, rotation, and retention
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Access token expiry in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_ttl_days: i64,
    /// How long inactive tokens are retained before sweeping, in days
    pub retention_ttl_days: i64,
    /// Bytes of randomness behind each refresh token string
    pub token_bytes: usize,
    /// Upper bound on regeneration attempts when a candidate collides
    pub max_generation_attempts: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
            retention_ttl_days: 2,
            token_bytes: 64,
            max_generation_attempts: 8,
        }
    }
}

impl TokenConfig {
    /// Refresh token lifetime as a duration.
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_ttl_days)
    }

    /// Retention window for inactive tokens as a duration.
    pub fn retention_ttl(&self) -> Duration {
        Duration::days(self.retention_ttl_days)
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_expires_in(&self) -> i64 {
        self.access_token_ttl_minutes * 60
    }

    /// Refresh token lifetime in seconds, as reported to clients.
    pub fn refresh_expires_in(&self) -> i64 {
        self.refresh_token_ttl_days * 24 * 60 * 60
    }
}
