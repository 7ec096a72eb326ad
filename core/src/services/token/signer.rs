//! Contract for signing short-lived access tokens

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Produces signed access tokens for authenticated users
///
/// Claim derivation and the signature scheme are presentation concerns;
/// the lifecycle services only require that the returned token expires one
/// access lifetime after signing.
pub trait AccessTokenSigner: Send + Sync {
    /// Signs a short-lived access token for the given user.
    fn sign_access_token(&self, user: &User) -> DomainResult<String>;
}
