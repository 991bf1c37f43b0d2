//! Driven port for picture path records.

use async_trait::async_trait;

use crate::domain::{PictureId, PictureRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by picture repository adapters.
    pub enum PictureRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "picture repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "picture repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureRepository: Send + Sync {
    /// Record a stored picture path and return the new record.
    async fn insert(&self, picture_path: &str) -> Result<PictureRecord, PictureRepositoryError>;

    /// Find a picture by id.
    async fn find(&self, id: PictureId) -> Result<Option<PictureRecord>, PictureRepositoryError>;
}
