//! PostgreSQL-backed [`UserRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, StoredCredentials, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CredentialRow, NewUserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user persistence port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    username: &str,
) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { .. } => UserPersistenceError::duplicate_username(username),
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation { .. } => {
            UserPersistenceError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn to_user_id(raw: i32) -> Result<UserId, UserPersistenceError> {
    UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: username.as_str(),
            password_hash: password_hash.as_bytes(),
        };
        let id: i32 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert user", username.as_str()))?;
        to_user_id(id)
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CredentialRow> = users::table
            .filter(users::username.eq(username))
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find credentials", username))?;

        row.map(|row| {
            let encoded = String::from_utf8(row.password_hash).map_err(|_| {
                UserPersistenceError::query("stored password hash is not valid UTF-8")
            })?;
            Ok(StoredCredentials {
                id: to_user_id(row.id)?,
                password_hash: PasswordHash::new(encoded),
            })
        })
        .transpose()
    }

    async fn find_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Option<i32> = users::table
            .filter(users::username.eq(username))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user id", username))?;
        id.map(to_user_id).transpose()
    }
}
