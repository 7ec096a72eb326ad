//! Value objects representing immutable domain concepts.

pub mod token_pair;

// Re-export commonly used types
pub use token_pair::TokenPair;
