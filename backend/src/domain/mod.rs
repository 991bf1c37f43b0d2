//! Domain primitives, services and ports.
//!
//! Purpose: keep CRM rules (credential policy, token lifetime, customer
//! partial updates, picture storage) independent of Actix and Diesel.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failures.
//! - UserId, Username, Password: account primitives.
//! - SessionTokens: bearer token issue and validation.
//! - CustomerView, NewCustomer, CustomerChanges: customer records.
//! - PictureRecord, PictureUpload: picture records.
//! - CredentialService, CustomerService, PictureService: driving port
//!   implementations.

pub mod auth;
pub mod credential_service;
pub mod customer;
pub mod customer_service;
pub mod error;
pub mod picture;
pub mod picture_service;
pub mod ports;
pub mod session_token;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, RegistrationCredentials};
pub use self::credential_service::CredentialService;
pub use self::customer::{
    CustomerChanges, CustomerId, CustomerValidationError, CustomerView, NewCustomer,
    PERSON_NAME_MAX, PersonName,
};
pub use self::customer_service::CustomerService;
pub use self::error::{DomainError, ErrorCode, TRACE_ID_HEADER};
pub use self::picture::{
    PICTURE_URL_PREFIX, PLACEHOLDER_PICTURE_ID, PLACEHOLDER_PICTURE_PATH, PictureId,
    PictureRecord, PictureUpload, PictureValidationError, picture_path_for,
};
pub use self::picture_service::PictureService;
pub use self::session_token::{
    Authorization, DEFAULT_TOKEN_TTL, IssuedToken, SessionClaims, SessionTokens, TokenError,
    bearer_token,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    PASSWORD_MIN, Password, PasswordHash, StoredCredentials, UserId, UserValidationError,
    Username,
};
