//! User store trait

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::{Credentials, NewUser, User};

/// Persistence contract for user records
///
/// Uniqueness of username and email is enforced by the backing storage,
/// not by the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, returning the stored record
    ///
    /// Fails with [`DbError::Duplicate`] when the username or email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    /// Look up the id and password hash for a username
    ///
    /// Fails with [`DbError::NotFound`] when no user matches.
    async fn find_credentials(&self, username: &str) -> Result<Credentials, DbError>;

    /// Get a user by ID
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DbError>;
}
