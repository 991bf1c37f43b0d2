//! Credential store service.
//!
//! Implements registration, login and username resolution over a
//! [`UserRepository`] and a [`PasswordHasher`]. Duplicate usernames are
//! detected through the store's uniqueness constraint, never by a pre-check,
//! so concurrent registrations cannot both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, UserDirectory, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{DomainError, LoginCredentials, RegistrationCredentials, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_persistence_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => {
            DomainError::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            DomainError::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            DomainError::conflict("Username already in use")
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> DomainError {
    DomainError::internal(error.to_string())
}

/// Credential service implementing the account driving ports.
#[derive(Clone)]
pub struct CredentialService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> CredentialService<R, H> {
    /// Create a service over the user repository and password hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> UserRegistration for CredentialService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &RegistrationCredentials) -> Result<UserId, DomainError> {
        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;
        let id = self
            .users
            .insert(credentials.username(), &hash)
            .await
            .map_err(|err| {
                if matches!(err, UserPersistenceError::DuplicateUsername { .. }) {
                    info!(username = %credentials.username(), "registration rejected: username taken");
                }
                map_persistence_error(err)
            })?;
        info!(user_id = %id, "user registered");
        Ok(id)
    }
}

#[async_trait]
impl<R, H> LoginService for CredentialService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError> {
        let stored = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(map_persistence_error)?;

        let authenticated = match stored {
            Some(stored) => self
                .hasher
                .verify(credentials.password(), &stored.password_hash)
                .await
                .map_err(map_hash_error)?
                .then_some(stored.id),
            None => {
                self.hasher
                    .verify_absent(credentials.password())
                    .await
                    .map_err(map_hash_error)?;
                None
            }
        };

        authenticated.ok_or_else(|| {
            warn!("login rejected");
            DomainError::unauthorized(INVALID_CREDENTIALS)
        })
    }
}

#[async_trait]
impl<R, H> UserDirectory for CredentialService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn id_by_username(&self, username: &str) -> Result<UserId, DomainError> {
        self.users
            .find_id_by_username(username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found("user not found"))
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
