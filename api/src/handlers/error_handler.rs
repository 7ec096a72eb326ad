use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use mb_core::errors::{AuthError, DomainError, TokenError, ValidationError};

use crate::dto::ErrorResponse;

/// Converts a domain error into the HTTP response the client sees.
///
/// Lifecycle rejections surface as 4xx with a stable error code; only
/// signing and store faults become 500s.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code) = match &error {
        DomainError::Auth(auth_error) => map_auth_error(auth_error),
        DomainError::Token(token_error) => map_token_error(token_error),
        DomainError::ValidationErr(validation_error) => map_validation_error(validation_error),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status.is_server_error() {
        log::error!("Domain error: {:?}", error);
    } else {
        log::warn!("Request rejected: {}", error);
    }

    ErrorResponse::new(code.to_string(), error.to_string()).to_response(status)
}

fn map_auth_error(error: &AuthError) -> (StatusCode, &'static str) {
    match error {
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
    }
}

fn map_token_error(error: &TokenError) -> (StatusCode, &'static str) {
    match error {
        TokenError::MissingRefreshToken => (StatusCode::BAD_REQUEST, "MISSING_REFRESH_TOKEN"),
        TokenError::RefreshTokenNotFound => (StatusCode::NOT_FOUND, "REFRESH_TOKEN_NOT_FOUND"),
        TokenError::InvalidRefreshToken => (StatusCode::BAD_REQUEST, "INVALID_REFRESH_TOKEN"),
        TokenError::AlreadyRevoked => (StatusCode::BAD_REQUEST, "TOKEN_ALREADY_REVOKED"),
        TokenError::TokenGenerationFailed => {
            (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_GENERATION_FAILED")
        }
    }
}

fn map_validation_error(error: &ValidationError) -> (StatusCode, &'static str) {
    match error {
        ValidationError::RequiredField { .. } => (StatusCode::BAD_REQUEST, "REQUIRED_FIELD"),
        ValidationError::InvalidFormat { .. } => (StatusCode::BAD_REQUEST, "INVALID_FORMAT"),
    }
}
