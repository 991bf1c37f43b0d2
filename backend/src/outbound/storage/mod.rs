//! Filesystem adapters.

mod cap_std_picture_storage;

pub use cap_std_picture_storage::CapStdPictureStorage;
