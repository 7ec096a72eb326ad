//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::value_objects::TokenPair;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::CredentialStore;
use crate::services::token::{AccessTokenSigner, TokenService};

use super::password::PasswordVerifier;

/// Authentication service producing the first token pair of a session
pub struct AuthService<S, G, P>
where
    S: CredentialStore,
    G: AccessTokenSigner,
    P: PasswordVerifier,
{
    /// Credential store for user lookups
    store: Arc<S>,
    /// Token service handling session issuance
    token_service: Arc<TokenService<S, G>>,
    /// Password verification policy
    password_verifier: Arc<P>,
}

impl<S, G, P> AuthService<S, G, P>
where
    S: CredentialStore,
    G: AccessTokenSigner,
    P: PasswordVerifier,
{
    /// Creates a new authentication service instance.
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store for user lookups
    /// * `token_service` - Token service handling issuance
    /// * `password_verifier` - Password verification policy
    pub fn new(
        store: Arc<S>,
        token_service: Arc<TokenService<S, G>>,
        password_verifier: Arc<P>,
    ) -> Self {
        Self {
            store,
            token_service,
            password_verifier,
        }
    }

    /// Authenticates a user by username and password and starts a session.
    ///
    /// On success a fresh refresh token is appended to the user's
    /// collection and an access token is signed.
    ///
    /// # Arguments
    ///
    /// * `username` - Login name
    /// * `password` - Candidate password
    /// * `client_ip` - Client address recorded as token provenance
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access and refresh tokens for the new session
    /// * `Err(DomainError)` - `UserNotFound` for an unknown username,
    ///   `InvalidCredentials` when the password check fails
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        client_ip: Option<&str>,
    ) -> DomainResult<TokenPair> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .password_verifier
            .verify(password, &user.password_hash)?
        {
            warn!("Failed login attempt for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        info!("User {} authenticated", user.id);
        self.token_service.issue(user, client_ip).await
    }
}
