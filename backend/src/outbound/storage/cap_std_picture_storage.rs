//! Picture storage confined to a single capability directory.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::{debug, warn};

use crate::domain::ports::{PictureStorage, PictureStorageError};

/// Attempts at finding an unused random file name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 32;

/// Writes uploads into the images directory without ever overwriting.
#[derive(Debug, Clone)]
pub struct CapStdPictureStorage {
    dir: Arc<Dir>,
}

impl CapStdPictureStorage {
    /// Open (creating if needed) the directory uploads are written to.
    pub fn open(path: &Path) -> Result<Self, PictureStorageError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)?;
        Ok(Self { dir: Arc::new(dir) })
    }
}

fn io_error(err: std::io::Error) -> PictureStorageError {
    PictureStorageError::io(err.to_string())
}

fn candidate_name(stem: u64, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

/// Best-effort removal of a file whose write failed.
fn discard_partial(dir: &Dir, name: &str) {
    if let Err(cleanup) = dir.remove_file(name) {
        warn!(error = %cleanup, %name, "failed to remove partial picture");
    }
}

/// Create a file under the first free name drawn from `next_stem`.
fn write_new(
    dir: &Dir,
    content: &[u8],
    extension: Option<&str>,
    mut next_stem: impl FnMut() -> u64,
) -> Result<String, PictureStorageError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    for _ in 0..MAX_NAME_ATTEMPTS {
        let name = candidate_name(next_stem(), extension);
        let mut file = match dir.open_with(&name, &options) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!(%name, "picture name taken, retrying");
                continue;
            }
            Err(err) => return Err(io_error(err)),
        };
        if let Err(err) = file.write_all(content).and_then(|()| file.sync_all()) {
            drop(file);
            discard_partial(dir, &name);
            return Err(io_error(err));
        }
        return Ok(name);
    }

    Err(PictureStorageError::names_exhausted(MAX_NAME_ATTEMPTS))
}

async fn blocking<T, F>(work: F) -> Result<T, PictureStorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PictureStorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PictureStorageError::io(err.to_string()))?
}

#[async_trait]
impl PictureStorage for CapStdPictureStorage {
    async fn store(
        &self,
        content: &[u8],
        extension: Option<String>,
    ) -> Result<String, PictureStorageError> {
        let dir = Arc::clone(&self.dir);
        let content = content.to_vec();
        blocking(move || write_new(&dir, &content, extension.as_deref(), rand::random)).await
    }

    async fn remove(&self, file_name: &str) -> Result<(), PictureStorageError> {
        let dir = Arc::clone(&self.dir);
        let name = file_name.to_owned();
        blocking(move || dir.remove_file(&name).map_err(io_error)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cap_fs::{file_exists, read_file};
    use rstest::rstest;
    use tempfile::TempDir;

    fn storage() -> (TempDir, CapStdPictureStorage) {
        let temp = TempDir::new().expect("temp dir");
        let storage = CapStdPictureStorage::open(&temp.path().join("img")).expect("open");
        (temp, storage)
    }

    #[rstest]
    #[tokio::test]
    async fn stores_bytes_under_a_fresh_name() {
        let (temp, storage) = storage();
        let name = storage
            .store(b"jpeg bytes", Some("jpg".to_owned()))
            .await
            .expect("store");

        let stem = name.strip_suffix(".jpg").expect("jpg extension");
        assert!(stem.bytes().all(|byte| byte.is_ascii_digit()));
        let written = read_file(&temp.path().join("img").join(&name)).expect("read back");
        assert_eq!(written, b"jpeg bytes");
    }

    #[rstest]
    #[tokio::test]
    async fn names_without_extension_are_bare_stems() {
        let (_temp, storage) = storage();
        let name = storage.store(b"raw", None).await.expect("store");
        assert!(!name.is_empty());
        assert!(name.bytes().all(|byte| byte.is_ascii_digit()));
    }

    #[rstest]
    #[tokio::test]
    async fn consecutive_uploads_do_not_collide() {
        let (_temp, storage) = storage();
        let first = storage.store(b"a", None).await.expect("store");
        let second = storage.store(b"b", None).await.expect("store");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_deletes_the_file() {
        let (temp, storage) = storage();
        let name = storage.store(b"gone", None).await.expect("store");
        storage.remove(&name).await.expect("remove");
        assert!(!file_exists(&temp.path().join("img").join(&name)));
    }

    #[rstest]
    #[tokio::test]
    async fn removing_a_missing_file_is_an_io_error() {
        let (_temp, storage) = storage();
        let err = storage.remove("missing.jpg").await.expect_err("missing");
        assert!(matches!(err, PictureStorageError::Io { .. }));
    }

    #[test]
    fn taken_names_are_skipped_without_touching_them() {
        let (temp, storage) = storage();
        storage.dir.write("7.jpg", b"placeholder").expect("seed");
        let mut stems = [7_u64, 8].into_iter();

        let name = write_new(&storage.dir, b"upload", Some("jpg"), || {
            stems.next().expect("stem")
        })
        .expect("store");

        assert_eq!(name, "8.jpg");
        let img = temp.path().join("img");
        assert_eq!(read_file(&img.join("7.jpg")).expect("seeded"), b"placeholder");
        assert_eq!(read_file(&img.join("8.jpg")).expect("written"), b"upload");
    }

    #[test]
    fn gives_up_after_bounded_collisions() {
        let (temp, storage) = storage();
        storage.dir.write("42", b"taken").expect("seed");
        let mut draws = 0_u32;

        let err = write_new(&storage.dir, b"upload", None, || {
            draws += 1;
            42
        })
        .expect_err("every name is taken");

        assert_eq!(
            err,
            PictureStorageError::NamesExhausted {
                attempts: MAX_NAME_ATTEMPTS
            }
        );
        assert_eq!(draws, MAX_NAME_ATTEMPTS);
        assert_eq!(
            read_file(&temp.path().join("img").join("42")).expect("seeded"),
            b"taken"
        );
    }

    #[test]
    fn discarding_a_partial_file_removes_it() {
        let (temp, storage) = storage();
        storage.dir.write("9.jpg", b"half").expect("seed");

        discard_partial(&storage.dir, "9.jpg");

        assert!(!file_exists(&temp.path().join("img").join("9.jpg")));
    }

    #[test]
    fn discarding_an_already_missing_file_is_tolerated() {
        let (_temp, storage) = storage();
        discard_partial(&storage.dir, "never-written.jpg");
    }
}
