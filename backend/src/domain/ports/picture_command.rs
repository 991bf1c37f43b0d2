//! Driving ports for picture uploads and lookups.

use async_trait::async_trait;

use crate::domain::{DomainError, PictureId, PictureRecord, PictureUpload};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureCommand: Send + Sync {
    /// Store an uploaded file and record its path.
    async fn upload(&self, upload: PictureUpload) -> Result<PictureRecord, DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureQuery: Send + Sync {
    /// Fails with `NotFound` when no picture has that id.
    async fn get(&self, id: PictureId) -> Result<PictureRecord, DomainError>;
}
