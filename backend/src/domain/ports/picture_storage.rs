//! Driven port for writing picture files.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by picture storage adapters.
    pub enum PictureStorageError {
        /// Filesystem operation failed.
        Io { message: String } => "picture storage failed: {message}",
        /// Every generated file name was already taken.
        NamesExhausted { attempts: u32 } => "no free picture file name after {attempts} attempts",
    }
}

/// Port for persisting uploaded picture bytes under a generated name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureStorage: Send + Sync {
    /// Write `content` under a fresh, collision-free file name and return it.
    ///
    /// Existing files are never overwritten.
    async fn store(
        &self,
        content: &[u8],
        extension: Option<String>,
    ) -> Result<String, PictureStorageError>;

    /// Remove a file written by [`PictureStorage::store`].
    async fn remove(&self, file_name: &str) -> Result<(), PictureStorageError>;
}
