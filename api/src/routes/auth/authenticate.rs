use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, AuthenticateRequest};
use crate::handlers::error_handler::handle_domain_error;

use mb_core::errors::{DomainError, ValidationError};
use mb_core::repositories::CredentialStore;
use mb_core::services::{AccessTokenSigner, PasswordVerifier};

use super::{extract_client_ip, refresh_token_cookie, AppState};

/// Handler for POST /api/v1/auth/authenticate
///
/// Verifies a username/password pair and opens a session: the response body
/// carries a short-lived JWT access token and the response sets an HTTP-only
/// `refreshToken` cookie for obtaining the next one.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "nurse.joy",
///     "password": "correct horse battery staple"
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
/// - 400 Bad Request: Missing fields or wrong password
/// - 404 Not Found: Unknown username
/// - 500 Internal Server Error: Token generation failure
pub async fn authenticate<S, G, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, G, P>>,
    request: web::Json<AuthenticateRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    G: AccessTokenSigner + 'static,
    P: PasswordVerifier + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        let field = validation_errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "username".to_string());

        log::warn!("Validation failed for authenticate request: {}", field);

        return handle_domain_error(DomainError::ValidationErr(ValidationError::RequiredField {
            field,
        }));
    }

    let client_ip = extract_client_ip(&req);

    match state
        .auth_service
        .authenticate(&request.username, &request.password, Some(&client_ip))
        .await
    {
        Ok(pair) => {
            log::info!(
                "Authentication succeeded for username: {}, ip: {}",
                request.username,
                client_ip
            );

            HttpResponse::Ok()
                .cookie(refresh_token_cookie(
                    &pair.refresh_token,
                    pair.access_expires_in,
                ))
                .json(AuthResponse {
                    access_token: pair.access_token,
                    expires_in: pair.access_expires_in,
                })
        }
        Err(error) => handle_domain_error(error),
    }
}
