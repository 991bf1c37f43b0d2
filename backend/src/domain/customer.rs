//! Customer records and the values used to create and change them.
//!
//! Lifecycle: a customer is created, updated any number of times, then
//! deleted permanently. There is no soft delete.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::picture::{PLACEHOLDER_PICTURE_ID, PictureId};

/// Column width of `customers.name` and `customers.surname`.
pub const PERSON_NAME_MAX: usize = 32;

/// Validation errors raised while building customer values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerValidationError {
    #[error("customer id must be positive, got {0}")]
    NonPositiveId(i32),
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },
}

/// Store-assigned customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CustomerId(i32);

impl CustomerId {
    /// Validate and wrap a store identifier.
    pub fn new(id: i32) -> Result<Self, CustomerValidationError> {
        if id <= 0 {
            return Err(CustomerValidationError::NonPositiveId(id));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for CustomerId {
    type Error = CustomerValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for i32 {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer's given name or surname.
///
/// ## Invariants
/// - Trimmed, non-empty, and at most [`PERSON_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate `raw` as the value of `field`.
    ///
    /// # Examples
    /// ```
    /// use crm_backend::domain::PersonName;
    ///
    /// assert_eq!(PersonName::new("name", " Ada ").unwrap().as_str(), "Ada");
    /// assert!(PersonName::new("surname", "  ").is_err());
    /// ```
    pub fn new(field: &'static str, raw: &str) -> Result<Self, CustomerValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CustomerValidationError::EmptyName { field });
        }
        if trimmed.chars().count() > PERSON_NAME_MAX {
            return Err(CustomerValidationError::NameTooLong {
                field,
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Values for a new customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: PersonName,
    pub surname: PersonName,
    pub picture_id: PictureId,
}

impl NewCustomer {
    /// Build a new customer, falling back to the placeholder picture.
    #[must_use]
    pub fn new(name: PersonName, surname: PersonName, picture_id: Option<PictureId>) -> Self {
        Self {
            name,
            surname,
            picture_id: picture_id.unwrap_or(PLACEHOLDER_PICTURE_ID),
        }
    }
}

/// Partial update: each present field replaces the stored value and absent
/// fields keep theirs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub picture_id: Option<PictureId>,
}

/// Externally visible customer with picture path and usernames resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    #[schema(value_type = i32, example = 1)]
    pub id: CustomerId,
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "Lovelace")]
    pub surname: String,
    #[schema(value_type = i32, example = 1)]
    pub picture_id: PictureId,
    #[schema(example = "static/noPicturePlaceholder.jpg")]
    pub picture_path: String,
    #[schema(example = "Admin")]
    pub created_by_user: String,
    #[schema(example = "Admin")]
    pub last_modified_by_user: String,
}
