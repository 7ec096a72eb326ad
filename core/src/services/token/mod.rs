//! Token lifecycle module
//!
//! This module handles all refresh token operations:
//! - Opaque token generation with a store-backed uniqueness probe
//! - Rotation of active tokens, one successor per exchange
//! - Reuse detection via revocation chain walking
//! - Retention sweeping of inactive tokens
//! - Explicit revocation without replacement

mod chain;
mod config;
mod factory;
mod service;
mod signer;
mod sweep;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use factory::TokenFactory;
pub use service::TokenService;
pub use signer::AccessTokenSigner;
