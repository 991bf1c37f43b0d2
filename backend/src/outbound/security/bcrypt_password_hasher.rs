//! bcrypt-backed [`PasswordHasher`] adapter.
//!
//! bcrypt is deliberately slow, so every call is moved onto Tokio's blocking
//! pool to keep the request workers free.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Work factor used when configuration does not override it.
pub const DEFAULT_BCRYPT_COST: u32 = 14;

const ABSENT_USER_DECOY: &str = "absent-user-decoy-password";

/// Password hasher using bcrypt with a fixed cost.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    absent_hash: String,
}

impl BcryptPasswordHasher {
    /// Build a hasher for `cost`, precomputing the hash used to equalise
    /// timing for unknown usernames.
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        let absent_hash = bcrypt::hash(ABSENT_USER_DECOY, cost).map_err(hashing_error)?;
        Ok(Self { cost, absent_hash })
    }
}

fn hashing_error(err: impl std::fmt::Display) -> PasswordHashError {
    PasswordHashError::hashing(err.to_string())
}

async fn blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(hashing_error)?
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        blocking(move || {
            bcrypt::hash(secret.as_str(), cost)
                .map(PasswordHash::new)
                .map_err(hashing_error)
        })
        .await
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let secret = Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_str().to_owned();
        blocking(move || bcrypt::verify(secret.as_str(), &encoded).map_err(hashing_error)).await
    }

    async fn verify_absent(&self, candidate: &str) -> Result<(), PasswordHashError> {
        let secret = Zeroizing::new(candidate.to_owned());
        let encoded = self.absent_hash.clone();
        blocking(move || {
            bcrypt::verify(secret.as_str(), &encoded)
                .map(|_| ())
                .map_err(hashing_error)
        })
        .await
    }
}
