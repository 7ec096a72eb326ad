//! Credential store trait defining the persistence contract for users and
//! their refresh token collections.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for loading and saving users together with their
/// refresh token collections
///
/// Every lifecycle operation loads one user in full, mutates the token
/// collection in memory, and persists it with a single
/// [`save_user`](CredentialStore::save_user) call.
///
/// # Consistency requirements
///
/// Implementations must uphold two constraints:
/// - `save_user` rejects writes whose `version` no longer matches the
///   stored record, so concurrent rotations of the same user cannot
///   silently overwrite each other
/// - Token strings are unique across all users, enforced at save time and
///   not only by the factory's pre-insert probe
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Finds a user by login name.
    ///
    /// # Arguments
    ///
    /// * `username` - The login name to search for
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The user with the full token collection
    /// * `Ok(None)` - No user with that name exists
    /// * `Err(DomainError)` - Store access failed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mb_core::repositories::CredentialStore;
    ///
    /// # async fn example(store: impl CredentialStore) -> Result<(), mb_core::DomainError> {
    /// if let Some(user) = store.find_by_username("dr.green").await? {
    ///     println!("user {} holds {} tokens", user.id, user.refresh_tokens.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Finds the user owning the given refresh token string.
    ///
    /// Returns the full aggregate, so chain walking and sweeping can run
    /// without further reads.
    ///
    /// # Arguments
    ///
    /// * `token` - The opaque refresh token string
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The owning user
    /// * `Ok(None)` - No user owns this token
    /// * `Err(DomainError)` - Store access failed
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Checks whether any user already holds the given token string.
    ///
    /// Used by the token factory to probe candidate strings before they
    /// are handed out.
    async fn refresh_token_exists(&self, token: &str) -> Result<bool, DomainError>;

    /// Persists a user and their full token collection in one write.
    ///
    /// # Arguments
    ///
    /// * `user` - The aggregate to save, carrying the version it was loaded at
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The saved aggregate with its version bumped
    /// * `Err(DomainError::Conflict)` - Stale version, or a token string
    ///   already owned elsewhere
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mb_core::errors::DomainError;
    /// use mb_core::repositories::CredentialStore;
    ///
    /// # async fn example(store: impl CredentialStore) -> Result<(), DomainError> {
    /// let mut user = store.find_by_username("dr.green").await?.unwrap();
    /// user.refresh_tokens.clear();
    /// match store.save_user(user).await {
    ///     Ok(saved) => println!("now at version {}", saved.version),
    ///     Err(DomainError::Conflict { message }) => println!("lost the race: {}", message),
    ///     Err(e) => return Err(e),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn save_user(&self, user: User) -> Result<User, DomainError>;
}
