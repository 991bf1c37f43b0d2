//! PostgreSQL-backed [`PictureRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PictureRepository, PictureRepositoryError};
use crate::domain::{PictureId, PictureRecord};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::PictureRow;
use super::pool::{DbPool, PoolError};
use super::schema::pictures;

/// Diesel-backed implementation of the picture persistence port.
#[derive(Clone)]
pub struct DieselPictureRepository {
    pool: DbPool,
}

impl DieselPictureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PictureRepositoryError {
    PictureRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PictureRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => PictureRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            PictureRepositoryError::query("picture path already recorded")
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            PictureRepositoryError::query("foreign key violation")
        }
        DieselFailure::Query(message) => PictureRepositoryError::query(message),
    }
}

#[async_trait]
impl PictureRepository for DieselPictureRepository {
    async fn insert(&self, picture_path: &str) -> Result<PictureRecord, PictureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PictureRow = diesel::insert_into(pictures::table)
            .values(pictures::picture_path.eq(picture_path))
            .returning(PictureRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert picture"))?;
        PictureRecord::try_from(row).map_err(PictureRepositoryError::query)
    }

    async fn find(&self, id: PictureId) -> Result<Option<PictureRecord>, PictureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PictureRow> = pictures::table
            .find(id.get())
            .select(PictureRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find picture"))?;
        row.map(PictureRecord::try_from)
            .transpose()
            .map_err(PictureRepositoryError::query)
    }
}
