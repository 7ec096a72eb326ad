//! Domain-specific error types for authentication and token operations
//!
//! This module provides error type definitions for authentication and the
//! refresh token lifecycle. Mapping onto HTTP statuses happens in the
//! presentation layer.

use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent credential verification failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Refresh token lifecycle errors
///
/// These errors represent the ways a presented token can be rejected.
#[derive(Error, Debug)]
pub enum TokenError {
    /// No token was supplied with the request, neither cookie nor body
    #[error("Refresh token not found")]
    MissingRefreshToken,

    /// The presented token string is not owned by any user
    #[error("User with the specified refresh token was not found")]
    RefreshTokenNotFound,

    /// The presented token exists but is revoked or expired
    #[error("Refresh token is invalid")]
    InvalidRefreshToken,

    /// Explicit revocation was attempted on an already-inactive token
    #[error("Refresh token is already invalidated")]
    AlreadyRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
///
/// These errors represent input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
