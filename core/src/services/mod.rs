//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, BcryptPasswordVerifier, PasswordVerifier};
pub use token::{AccessTokenSigner, TokenConfig, TokenFactory, TokenService};
