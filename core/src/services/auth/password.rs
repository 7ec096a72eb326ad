//! Password verification behind a trait seam

use crate::errors::{DomainError, DomainResult};

/// Verifies and hashes passwords
///
/// The hashing policy is a collaborator of the authentication service;
/// callers only ask whether a candidate password matches a stored hash.
pub trait PasswordVerifier: Send + Sync {
    /// Checks a candidate password against a stored hash.
    fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool>;

    /// Hashes a password for storage.
    fn hash(&self, password: &str) -> DomainResult<String>;
}

/// Bcrypt-backed password verifier
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl BcryptPasswordVerifier {
    /// Creates a verifier using the bcrypt default cost.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Creates a verifier with an explicit cost.
    ///
    /// Test suites use a low cost to keep hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("password verification failed: {}", e),
        })
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }
}
