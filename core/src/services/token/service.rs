//! Main token lifecycle service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::refresh_token::{
    REASON_REPLACED, REASON_REVOKED_WITHOUT_REPLACEMENT,
};
use crate::domain::entities::user::User;
use crate::domain::value_objects::TokenPair;
use crate::errors::{DomainResult, TokenError};
use crate::repositories::CredentialStore;

use super::chain;
use super::config::TokenConfig;
use super::factory::TokenFactory;
use super::signer::AccessTokenSigner;
use super::sweep;

/// Service managing the refresh token lifecycle
///
/// Every operation is one unit of work: the owning user is loaded with the
/// full token collection, mutated in memory, and persisted with a single
/// save. The store's version check fails the loser of two concurrent
/// writes against the same user.
pub struct TokenService<S, G>
where
    S: CredentialStore,
    G: AccessTokenSigner,
{
    /// Credential store for user lookups and persistence
    store: Arc<S>,
    /// Signer producing the access half of each token pair
    signer: Arc<G>,
    /// Factory for fresh refresh tokens
    factory: TokenFactory<S>,
    /// Lifetime and retention settings
    config: TokenConfig,
}

impl<S, G> TokenService<S, G>
where
    S: CredentialStore,
    G: AccessTokenSigner,
{
    /// Creates a new token service instance.
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store for persistence
    /// * `signer` - Access token signer
    /// * `config` - Lifetime and retention settings
    pub fn new(store: Arc<S>, signer: Arc<G>, config: TokenConfig) -> Self {
        let factory = TokenFactory::new(Arc::clone(&store), config.clone());
        Self {
            store,
            signer,
            factory,
            config,
        }
    }

    /// Issues a fresh token pair for an already-authenticated user.
    ///
    /// Appends a new refresh token to the user's collection, persists, and
    /// signs an access token against the saved state.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user, as loaded from the store
    /// * `client_ip` - Client address recorded as token provenance
    pub async fn issue(&self, mut user: User, client_ip: Option<&str>) -> DomainResult<TokenPair> {
        let refresh_token = self.factory.new_refresh_token(client_ip).await?;
        let refresh_token_string = refresh_token.token.clone();

        user.refresh_tokens.push(refresh_token);
        let user = self.store.save_user(user).await?;

        let access_token = self.signer.sign_access_token(&user)?;
        info!("Issued refresh token for user {}", user.id);

        Ok(self.token_pair(access_token, refresh_token_string))
    }

    /// Exchanges an active refresh token for a fresh pair, revoking the
    /// presented token.
    ///
    /// Presenting an already-revoked token is treated as reuse of a stolen
    /// credential: the live end of that token's rotation chain is revoked
    /// and the containment is persisted before the request fails. An
    /// expired but never-revoked token is rejected without any write.
    ///
    /// # Arguments
    ///
    /// * `presented` - The refresh token string supplied by the client
    /// * `client_ip` - Client address recorded on all mutations
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New tokens; the presented token is now revoked
    ///   and linked to its successor
    /// * `Err(DomainError)` - `RefreshTokenNotFound` when no user owns the
    ///   token, `InvalidRefreshToken` when it is revoked or expired
    pub async fn rotate(&self, presented: &str, client_ip: Option<&str>) -> DomainResult<TokenPair> {
        let mut user = self
            .store
            .find_by_refresh_token(presented)
            .await?
            .ok_or(TokenError::RefreshTokenNotFound)?;

        let record = user
            .find_refresh_token(presented)
            .ok_or(TokenError::RefreshTokenNotFound)?;
        let was_revoked = record.is_revoked();
        let is_active = record.is_active();

        if was_revoked {
            // Reuse of a superseded token: revoke the live session in this
            // lineage, persist, and still fail the request.
            let reason = format!("Attempted reuse of revoked ancestor token: {}", presented);
            let contained =
                chain::revoke_first_active_descendant(&mut user, presented, client_ip, &reason);
            match contained {
                Some(_) => warn!(
                    "Revoked token reuse detected for user {}; revoked live descendant",
                    user.id
                ),
                None => warn!(
                    "Revoked token reuse detected for user {} on a dead lineage",
                    user.id
                ),
            }
            self.store.save_user(user).await?;
            return Err(TokenError::InvalidRefreshToken.into());
        }

        if !is_active {
            // Expired without ever being revoked; no state to contain.
            return Err(TokenError::InvalidRefreshToken.into());
        }

        let successor = self.factory.new_refresh_token(client_ip).await?;
        let successor_string = successor.token.clone();

        {
            let record = user
                .find_refresh_token_mut(presented)
                .ok_or(TokenError::RefreshTokenNotFound)?;
            record.revoke(client_ip, REASON_REPLACED);
            record.mark_replaced(&successor_string);
        }
        user.refresh_tokens.push(successor);

        let swept = sweep::remove_stale_tokens(&mut user, self.config.retention_ttl());
        if swept > 0 {
            debug!("Swept {} stale refresh tokens for user {}", swept, user.id);
        }

        let user = self.store.save_user(user).await?;
        let access_token = self.signer.sign_access_token(&user)?;
        info!("Rotated refresh token for user {}", user.id);

        Ok(self.token_pair(access_token, successor_string))
    }

    /// Revokes a refresh token without issuing a replacement.
    ///
    /// The record keeps an empty `replaced_by_token`, marking the end of
    /// its chain.
    ///
    /// # Arguments
    ///
    /// * `presented` - The refresh token string supplied by the client
    /// * `client_ip` - Client address recorded on the revocation
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The token is now revoked
    /// * `Err(DomainError)` - `RefreshTokenNotFound` when no user owns the
    ///   token, `AlreadyRevoked` when it is already inactive
    pub async fn revoke(&self, presented: &str, client_ip: Option<&str>) -> DomainResult<()> {
        let mut user = self
            .store
            .find_by_refresh_token(presented)
            .await?
            .ok_or(TokenError::RefreshTokenNotFound)?;

        let record = user
            .find_refresh_token_mut(presented)
            .ok_or(TokenError::RefreshTokenNotFound)?;
        if !record.is_active() {
            return Err(TokenError::AlreadyRevoked.into());
        }
        record.revoke(client_ip, REASON_REVOKED_WITHOUT_REPLACEMENT);

        let user = self.store.save_user(user).await?;
        info!("Revoked refresh token for user {}", user.id);

        Ok(())
    }

    fn token_pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_expires_in(),
            self.config.refresh_expires_in(),
        )
    }
}
