//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints including:
//! - Credential login
//! - Refresh token rotation
//! - Refresh token revocation

pub mod authenticate;
pub mod refresh;
pub mod revoke;

use std::sync::Arc;

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    HttpRequest,
};

use mb_core::repositories::CredentialStore;
use mb_core::services::{AccessTokenSigner, AuthService, PasswordVerifier, TokenService};

/// Name of the cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Application state that holds shared services
pub struct AppState<S, G, P>
where
    S: CredentialStore,
    G: AccessTokenSigner,
    P: PasswordVerifier,
{
    pub auth_service: Arc<AuthService<S, G, P>>,
    pub token_service: Arc<TokenService<S, G>>,
}

/// Builds the HTTP-only cookie that transports the refresh token
///
/// The cookie is scoped to the whole site, unreadable from JavaScript and
/// restricted to HTTPS. `SameSite=None` lets the browser attach it to
/// cross-origin requests from the web client.
pub fn refresh_token_cookie(token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, token.to_owned())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

/// Extract client IP address from request
pub fn extract_client_ip(req: &HttpRequest) -> String {
    // Try to get IP from X-Forwarded-For header (for reverse proxy scenarios)
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            // Take the first IP from the comma-separated list
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    // Try to get IP from X-Real-IP header
    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    // Fall back to connection info
    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
