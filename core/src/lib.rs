//! # MedBook Core
//!
//! Core business logic and domain layer for the MedBook auth server.
//! This crate contains domain entities, the token lifecycle services,
//! the credential store interface, and error types. It is independent of
//! any web framework; the API crate supplies the HTTP edge.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
