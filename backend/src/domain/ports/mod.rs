//! Domain ports.
//!
//! Driving ports (`LoginService`, `CustomerCommand`, ...) are called by
//! inbound adapters. Driven ports (`UserRepository`, `PictureStorage`, ...)
//! are implemented by outbound adapters and consumed by domain services.

mod macros;

mod customer_command;
mod customer_repository;
mod login_service;
mod password_hasher;
mod picture_command;
mod picture_repository;
mod picture_storage;
mod user_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use customer_command::{MockCustomerCommand, MockCustomerQuery};
pub use customer_command::{CustomerCommand, CustomerQuery};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerRepository, CustomerRepositoryError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockUserDirectory, MockUserRegistration};
pub use login_service::{LoginService, UserDirectory, UserRegistration};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use picture_command::{MockPictureCommand, MockPictureQuery};
pub use picture_command::{PictureCommand, PictureQuery};
#[cfg(test)]
pub use picture_repository::MockPictureRepository;
pub use picture_repository::{PictureRepository, PictureRepositoryError};
#[cfg(test)]
pub use picture_storage::MockPictureStorage;
pub use picture_storage::{PictureStorage, PictureStorageError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
