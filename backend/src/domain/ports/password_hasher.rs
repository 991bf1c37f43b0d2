//! Driven port for slow, salted password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification could not complete.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Port hiding the hashing algorithm and its work factor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a validated password with a fresh salt.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Compare a candidate against a stored hash.
    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;

    /// Spend the cost of one verification without a stored hash, so an
    /// unknown username takes as long as a wrong password.
    async fn verify_absent(&self, candidate: &str) -> Result<(), PasswordHashError>;
}
