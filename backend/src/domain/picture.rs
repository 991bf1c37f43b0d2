//! Picture records referenced by customers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reserved id of the placeholder picture seeded by the schema migration.
pub const PLACEHOLDER_PICTURE_ID: PictureId = PictureId(1);
/// Path recorded for the placeholder picture.
pub const PLACEHOLDER_PICTURE_PATH: &str = "static/noPicturePlaceholder.jpg";
/// URL prefix under which stored pictures are served.
pub const PICTURE_URL_PREFIX: &str = "static";

const EXTENSION_MAX: usize = 8;

/// Validation errors for picture identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PictureValidationError {
    #[error("picture id must not be negative, got {0}")]
    Negative(i32),
    #[error("picture id must be positive, got {0}")]
    NonPositive(i32),
}

/// Store-assigned picture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct PictureId(i32);

impl PictureId {
    /// Wrap an existing identifier.
    pub fn new(id: i32) -> Result<Self, PictureValidationError> {
        if id <= 0 {
            return Err(PictureValidationError::NonPositive(id));
        }
        Ok(Self(id))
    }

    /// Interpret a client-supplied picture reference where `0` selects the
    /// placeholder.
    ///
    /// # Examples
    /// ```
    /// use crm_backend::domain::{PictureId, PLACEHOLDER_PICTURE_ID};
    ///
    /// assert_eq!(PictureId::from_reference(0), Ok(PLACEHOLDER_PICTURE_ID));
    /// assert_eq!(PictureId::from_reference(4).map(PictureId::get), Ok(4));
    /// assert!(PictureId::from_reference(-1).is_err());
    /// ```
    pub fn from_reference(raw: i32) -> Result<Self, PictureValidationError> {
        match raw {
            0 => Ok(PLACEHOLDER_PICTURE_ID),
            n if n < 0 => Err(PictureValidationError::Negative(n)),
            n => Ok(Self(n)),
        }
    }

    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for PictureId {
    type Error = PictureValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PictureId> for i32 {
    fn from(value: PictureId) -> Self {
        value.0
    }
}

/// Stored picture and the path it is served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PictureRecord {
    #[schema(value_type = i32, example = 1)]
    pub id: PictureId,
    #[schema(example = "static/5577006791947779410.jpg")]
    pub picture_path: String,
}

/// Uploaded file content awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub content: Vec<u8>,
    pub original_filename: Option<String>,
}

impl PictureUpload {
    /// Sanitised, lower-case extension taken from the client filename.
    ///
    /// Only short ASCII-alphanumeric extensions survive; anything else is
    /// dropped so client input never shapes the stored path.
    ///
    /// # Examples
    /// ```
    /// use crm_backend::domain::PictureUpload;
    ///
    /// let upload = PictureUpload {
    ///     content: vec![],
    ///     original_filename: Some("Portrait.JPG".into()),
    /// };
    /// assert_eq!(upload.extension().as_deref(), Some("jpg"));
    /// ```
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let name = self.original_filename.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || ext.len() > EXTENSION_MAX {
            return None;
        }
        if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Relative path recorded for a stored file name.
#[must_use]
pub fn picture_path_for(file_name: &str) -> String {
    format!("{PICTURE_URL_PREFIX}/{file_name}")
}
