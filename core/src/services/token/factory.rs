//! Factory for opaque refresh token strings

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::Rng;

use crate::domain::entities::refresh_token::RefreshToken;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::CredentialStore;

use super::config::TokenConfig;

/// Creates high-entropy refresh tokens that are unique across all users
///
/// Candidates are probed against the store before being handed out; the
/// store enforces the same uniqueness constraint again at save time.
pub struct TokenFactory<S: CredentialStore> {
    store: Arc<S>,
    config: TokenConfig,
}

impl<S: CredentialStore> TokenFactory<S> {
    /// Creates a factory probing uniqueness against the given store.
    pub fn new(store: Arc<S>, config: TokenConfig) -> Self {
        Self { store, config }
    }

    /// Generates a fresh refresh token.
    ///
    /// # Arguments
    ///
    /// * `ip` - Client address recorded as the token's provenance
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshToken)` - Active token expiring one refresh lifetime from now
    /// * `Err(DomainError)` - Every candidate collided, or the store probe failed
    pub async fn new_refresh_token(&self, ip: Option<&str>) -> DomainResult<RefreshToken> {
        for _ in 0..self.config.max_generation_attempts {
            let candidate = random_token_string(self.config.token_bytes);
            if !self.store.refresh_token_exists(&candidate).await? {
                return Ok(RefreshToken::new(
                    candidate,
                    self.config.refresh_token_ttl(),
                    ip,
                ));
            }
        }

        Err(TokenError::TokenGenerationFailed.into())
    }
}

/// URL-safe base64 over `num_bytes` of thread-rng randomness.
fn random_token_string(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    rand::thread_rng().fill(bytes.as_mut_slice());
    URL_SAFE_NO_PAD.encode(&bytes)
}
