//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `InvalidRequest` error whose `details` carry the
//! offending `field` and a machine-readable `code`.

use serde_json::json;

use crate::domain::{
    CustomerValidationError, DomainError, PictureValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    EmptyUsername,
    UsernameTooLong,
    PasswordTooShort,
    PasswordTooLong,
    EmptyName,
    NameTooLong,
    InvalidPictureId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::UsernameTooLong => "username_too_long",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::PasswordTooLong => "password_too_long",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::NameTooLong => "name_too_long",
            ErrorCode::InvalidPictureId => "invalid_picture_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Parse a digits-only path segment into a positive 32-bit identifier.
///
/// Routing already guarantees the segment is digits; this rejects values
/// that overflow or are zero.
pub(crate) fn parse_path_id(raw: &str, field: FieldName) -> Result<i32, DomainError> {
    let field = field.as_str();
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::invalid_request(format!("{field} must be a positive 32-bit integer"))
            .with_details(json!({
                "field": field,
                "value": raw,
                "code": ErrorCode::InvalidId.as_str(),
            }))),
    }
}

pub(crate) fn user_validation_error(err: UserValidationError) -> DomainError {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyUsername => {
            field_error("username", ErrorCode::EmptyUsername, message)
        }
        UserValidationError::UsernameTooLong { .. } => {
            field_error("username", ErrorCode::UsernameTooLong, message)
        }
        UserValidationError::PasswordTooShort { .. } => {
            field_error("password", ErrorCode::PasswordTooShort, message)
        }
        UserValidationError::PasswordTooLong { .. } => {
            field_error("password", ErrorCode::PasswordTooLong, message)
        }
        UserValidationError::NonPositiveId(_) => {
            field_error("id", ErrorCode::InvalidId, message)
        }
    }
}

pub(crate) fn customer_validation_error(err: CustomerValidationError) -> DomainError {
    let message = err.to_string();
    match err {
        CustomerValidationError::EmptyName { field } => {
            field_error(field, ErrorCode::EmptyName, message)
        }
        CustomerValidationError::NameTooLong { field, .. } => {
            field_error(field, ErrorCode::NameTooLong, message)
        }
        CustomerValidationError::NonPositiveId(_) => {
            field_error("id", ErrorCode::InvalidId, message)
        }
    }
}

pub(crate) fn picture_reference_error(err: PictureValidationError) -> DomainError {
    field_error("pictureId", ErrorCode::InvalidPictureId, err.to_string())
}
