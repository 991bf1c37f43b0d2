//! Driving ports for account registration, login and identity lookup.
//!
//! Inbound adapters call these without knowing the backing store, which
//! keeps handler tests free of persistence.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials, RegistrationCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `Unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError>;
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account, failing with `Conflict` when the username is taken.
    async fn register(&self, credentials: &RegistrationCredentials) -> Result<UserId, DomainError>;
}

/// Domain use-case port resolving token identities to user ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fails with `NotFound` when no such user exists.
    async fn id_by_username(&self, username: &str) -> Result<UserId, DomainError>;
}
