//! Retention sweeping of inactive refresh tokens

use chrono::{Duration, Utc};

use crate::domain::entities::user::User;

/// Removes inactive tokens that have outlived the retention window.
///
/// A token is swept once it is no longer active and `created_at` plus
/// `retention_ttl` has passed. Active tokens are never removed, regardless
/// of age.
///
/// Returns the number of tokens removed.
pub fn remove_stale_tokens(user: &mut User, retention_ttl: Duration) -> usize {
    let now = Utc::now();
    let before = user.refresh_tokens.len();

    user.refresh_tokens
        .retain(|t| t.is_active() || t.created_at + retention_ttl > now);

    before - user.refresh_tokens.len()
}
