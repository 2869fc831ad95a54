#![allow(async_fn_in_trait)]

use crate::domain::query::UserQuery;
use crate::domain::types::{User, UserListing};
use crate::error::UsersServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    /// Fetch at most one user matching every clause of `query`.
    async fn find_one(&self, query: &UserQuery) -> Result<Option<User>, UsersServiceError>;

    /// Fetch all users matching `query`. Returns the paged shape when the
    /// query carries pagination, the bare sequence otherwise.
    async fn find_many(&self, query: &UserQuery) -> Result<UserListing, UsersServiceError>;

    /// Exact-match email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError>;

    /// Persist a new user and return the stored row.
    async fn create(&self, user: &User) -> Result<User, UsersServiceError>;
}

/// One-way password transform. Output embeds a random salt, so repeated
/// calls on the same plaintext differ.
pub trait PasswordEncryptor: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, UsersServiceError>;
}
