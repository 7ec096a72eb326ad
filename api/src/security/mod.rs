//! Token signing for the HTTP layer.

pub mod jwt;

pub use jwt::{AccessTokenClaims, JwtAccessTokenSigner, JWT_ISSUER};
