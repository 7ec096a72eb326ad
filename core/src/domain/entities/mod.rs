//! Domain entities representing core business objects.

pub mod refresh_token;
pub mod user;

// Re-export commonly used types
pub use refresh_token::{
    RefreshToken, REASON_REPLACED, REASON_REVOKED_WITHOUT_REPLACEMENT,
};
pub use user::User;
