use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth_dto::{AuthResponse, RefreshTokenRequest};
use crate::handlers::error_handler::handle_domain_error;

use mb_core::errors::TokenError;
use mb_core::repositories::CredentialStore;
use mb_core::services::{AccessTokenSigner, PasswordVerifier};

use super::{extract_client_ip, refresh_token_cookie, AppState, REFRESH_TOKEN_COOKIE};

/// Handler for POST /api/v1/auth/refresh-token
///
/// Rotates a refresh token: the presented token is revoked, a linked
/// successor is minted and a fresh access token is returned. Reuse of an
/// already-rotated token is treated as a breach signal and kills the live
/// end of that token's chain.
///
/// The refresh token is taken from the `refreshToken` cookie when present,
/// falling back to the request body.
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "refreshToken": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "expiresIn": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing, expired or revoked refresh token
/// - 404 Not Found: Token not associated with any user
/// - 409 Conflict: Lost a concurrent update race, safe to retry
pub async fn refresh_token<S, G, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, G, P>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    G: AccessTokenSigner + 'static,
    P: PasswordVerifier + 'static,
{
    let presented = match extract_refresh_token(&req, request.as_deref()) {
        Some(token) => token,
        None => {
            log::warn!("Refresh request carried no token in cookie or body");
            return handle_domain_error(TokenError::MissingRefreshToken.into());
        }
    };

    let client_ip = extract_client_ip(&req);

    match state
        .token_service
        .rotate(&presented, Some(&client_ip))
        .await
    {
        Ok(pair) => HttpResponse::Ok()
            .cookie(refresh_token_cookie(
                &pair.refresh_token,
                pair.access_expires_in,
            ))
            .json(AuthResponse {
                access_token: pair.access_token,
                expires_in: pair.access_expires_in,
            }),
        Err(error) => handle_domain_error(error),
    }
}

/// Pulls the refresh token out of the request, cookie first
fn extract_refresh_token(req: &HttpRequest, body: Option<&RefreshTokenRequest>) -> Option<String> {
    if let Some(cookie) = req.cookie(REFRESH_TOKEN_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    body.and_then(|b| b.refresh_token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
