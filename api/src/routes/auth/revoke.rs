use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth_dto::{RevokeTokenRequest, RevokeTokenResponse};
use crate::handlers::error_handler::handle_domain_error;

use mb_core::errors::{DomainError, ValidationError};
use mb_core::repositories::CredentialStore;
use mb_core::services::{AccessTokenSigner, PasswordVerifier};

use super::{extract_client_ip, AppState, REFRESH_TOKEN_COOKIE};

/// Handler for POST /api/v1/auth/revoke-token
///
/// Explicitly invalidates a refresh token without issuing a replacement,
/// for logout and for administratively cutting a session loose.
///
/// The token is taken from the request body when present, falling back to
/// the `refreshToken` cookie.
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Token revoked"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: No token supplied, or token already inactive
/// - 404 Not Found: Token not associated with any user
pub async fn revoke_token<S, G, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, G, P>>,
    request: Option<web::Json<RevokeTokenRequest>>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    G: AccessTokenSigner + 'static,
    P: PasswordVerifier + 'static,
{
    let presented = match extract_revoke_token(&req, request.as_deref()) {
        Some(token) => token,
        None => {
            log::warn!("Revoke request carried no token in body or cookie");
            return handle_domain_error(DomainError::ValidationErr(
                ValidationError::RequiredField {
                    field: "token".to_string(),
                },
            ));
        }
    };

    let client_ip = extract_client_ip(&req);

    match state
        .token_service
        .revoke(&presented, Some(&client_ip))
        .await
    {
        Ok(()) => {
            log::info!("Refresh token revoked, ip: {}", client_ip);
            HttpResponse::Ok().json(RevokeTokenResponse {
                message: "Token revoked".to_string(),
            })
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Pulls the token to revoke out of the request, body first
fn extract_revoke_token(req: &HttpRequest, body: Option<&RevokeTokenRequest>) -> Option<String> {
    if let Some(token) = body.and_then(|b| b.token.as_deref()) {
        let value = token.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}
