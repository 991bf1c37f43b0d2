//! Picture upload and lookup services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    PictureCommand, PictureQuery, PictureRepository, PictureRepositoryError, PictureStorage,
    PictureStorageError,
};
use crate::domain::{DomainError, PictureId, PictureRecord, PictureUpload, picture_path_for};

fn map_repository_error(error: PictureRepositoryError) -> DomainError {
    match error {
        PictureRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("picture repository unavailable: {message}"))
        }
        PictureRepositoryError::Query { message } => {
            DomainError::internal(format!("picture repository error: {message}"))
        }
    }
}

fn map_storage_error(error: PictureStorageError) -> DomainError {
    DomainError::internal(error.to_string())
}

/// Picture service implementing both picture driving ports.
#[derive(Clone)]
pub struct PictureService<R, S> {
    pictures: Arc<R>,
    storage: Arc<S>,
}

impl<R, S> PictureService<R, S> {
    /// Create a service over the picture repository and file storage.
    pub fn new(pictures: Arc<R>, storage: Arc<S>) -> Self {
        Self { pictures, storage }
    }
}

#[async_trait]
impl<R, S> PictureCommand for PictureService<R, S>
where
    R: PictureRepository,
    S: PictureStorage,
{
    async fn upload(&self, upload: PictureUpload) -> Result<PictureRecord, DomainError> {
        if upload.content.is_empty() {
            return Err(DomainError::invalid_request("picture must not be empty"));
        }
        let file_name = self
            .storage
            .store(&upload.content, upload.extension())
            .await
            .map_err(map_storage_error)?;

        match self.pictures.insert(&picture_path_for(&file_name)).await {
            Ok(record) => {
                info!(picture_id = record.id.get(), path = %record.picture_path, "picture stored");
                Ok(record)
            }
            Err(err) => {
                // The file has no row pointing at it; drop it.
                if let Err(cleanup) = self.storage.remove(&file_name).await {
                    warn!(error = %cleanup, %file_name, "failed to remove orphaned picture");
                }
                Err(map_repository_error(err))
            }
        }
    }
}

#[async_trait]
impl<R, S> PictureQuery for PictureService<R, S>
where
    R: PictureRepository,
    S: PictureStorage,
{
    async fn get(&self, id: PictureId) -> Result<PictureRecord, DomainError> {
        self.pictures
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("picture {} not found", id.get())))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPictureRepository, MockPictureStorage};

    fn upload(name: &str) -> PictureUpload {
        PictureUpload {
            content: b"\x89PNG".to_vec(),
            original_filename: Some(name.to_owned()),
        }
    }

    fn record(id: i32, path: &str) -> PictureRecord {
        PictureRecord {
            id: PictureId::new(id).expect("valid picture id"),
            picture_path: path.to_owned(),
        }
    }

    #[tokio::test]
    async fn upload_records_static_path_of_stored_file() {
        let mut storage = MockPictureStorage::new();
        storage
            .expect_store()
            .withf(|content, extension| content == b"\x89PNG" && extension.as_deref() == Some("png"))
            .times(1)
            .return_once(|_, _| Ok("123.png".to_owned()));
        let mut pictures = MockPictureRepository::new();
        pictures
            .expect_insert()
            .withf(|path| path == "static/123.png")
            .return_once(|path| Ok(record(2, path)));

        let stored = PictureService::new(Arc::new(pictures), Arc::new(storage))
            .upload(upload("me.PNG"))
            .await
            .expect("upload succeeds");
        assert_eq!(stored, record(2, "static/123.png"));
    }

    #[tokio::test]
    async fn upload_removes_file_when_row_insert_fails() {
        let mut storage = MockPictureStorage::new();
        storage
            .expect_store()
            .return_once(|_, _| Ok("9.jpg".to_owned()));
        storage
            .expect_remove()
            .withf(|name| name == "9.jpg")
            .times(1)
            .return_once(|_| Ok(()));
        let mut pictures = MockPictureRepository::new();
        pictures
            .expect_insert()
            .return_once(|_| Err(PictureRepositoryError::query("boom")));

        let err = PictureService::new(Arc::new(pictures), Arc::new(storage))
            .upload(upload("a.jpg"))
            .await
            .expect_err("insert failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn upload_rejects_empty_content() {
        let service = PictureService::new(
            Arc::new(MockPictureRepository::new()),
            Arc::new(MockPictureStorage::new()),
        );
        let err = service
            .upload(PictureUpload {
                content: Vec::new(),
                original_filename: None,
            })
            .await
            .expect_err("empty upload");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn upload_surfaces_storage_failures_as_internal() {
        let mut storage = MockPictureStorage::new();
        storage
            .expect_store()
            .return_once(|_, _| Err(PictureStorageError::names_exhausted(32_u32)));

        let err = PictureService::new(Arc::new(MockPictureRepository::new()), Arc::new(storage))
            .upload(upload("a.jpg"))
            .await
            .expect_err("storage failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn get_reports_missing_picture() {
        let mut pictures = MockPictureRepository::new();
        pictures.expect_find().return_once(|_| Ok(None));

        let err = PictureService::new(Arc::new(pictures), Arc::new(MockPictureStorage::new()))
            .get(PictureId::new(77).expect("valid"))
            .await
            .expect_err("missing picture");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
