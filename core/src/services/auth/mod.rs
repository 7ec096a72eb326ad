//! Authentication service module
//!
//! This module verifies username and password credentials against the
//! store and hands successful logins over to the token lifecycle service
//! for session issuance.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{BcryptPasswordVerifier, PasswordVerifier};
pub use service::AuthService;
