//! JWT access token signing.
//!
//! Implements the core `AccessTokenSigner` trait on top of the
//! `jsonwebtoken` crate. Access tokens are short-lived HS256 JWTs; the
//! long-lived credential is the opaque refresh token managed by
//! `TokenService`, so nothing here is ever persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mb_core::domain::entities::User;
use mb_core::errors::{DomainError, DomainResult, TokenError};
use mb_core::services::AccessTokenSigner;

/// Issuer claim stamped into every access token
pub const JWT_ISSUER: &str = "medbook-auth";

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// JWT ID for uniqueness
    pub jti: String,
}

/// Signs access tokens with a symmetric HS256 key
pub struct JwtAccessTokenSigner {
    encoding_key: EncodingKey,
    access_token_ttl_minutes: i64,
}

impl JwtAccessTokenSigner {
    /// Creates a signer from the shared secret and the access token lifetime
    pub fn new(secret: &str, access_token_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_token_ttl_minutes,
        }
    }
}

impl AccessTokenSigner for JwtAccessTokenSigner {
    fn sign_access_token(&self, user: &User) -> DomainResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.access_token_ttl_minutes);

        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
