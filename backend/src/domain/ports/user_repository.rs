//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{PasswordHash, StoredCredentials, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's uniqueness constraint rejected the username.
        DuplicateUsername { username: String } => "username {username} is already in use",
    }
}

/// Port for reading and creating user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the assigned id.
    ///
    /// Duplicates are reported as [`UserPersistenceError::DuplicateUsername`]
    /// and leave existing rows untouched.
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError>;

    /// Load credential material for an exact (case-sensitive) username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Resolve a username to its id.
    async fn find_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserId>, UserPersistenceError>;
}
