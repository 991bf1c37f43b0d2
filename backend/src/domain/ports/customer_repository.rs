//! Driven port for customer persistence.
//!
//! Every read returns the joined [`CustomerView`]; adapters resolve the
//! picture path and both attribution usernames.

use async_trait::async_trait;

use crate::domain::{CustomerChanges, CustomerId, CustomerView, NewCustomer, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "customer repository query failed: {message}",
        /// The referenced picture does not exist.
        MissingPicture { picture_id: i32 } => "picture {picture_id} does not exist",
    }
}

/// Port for customer CRUD operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ordered by ascending id.
    async fn list(&self) -> Result<Vec<CustomerView>, CustomerRepositoryError>;

    /// Find a customer by id.
    async fn find(&self, id: CustomerId) -> Result<Option<CustomerView>, CustomerRepositoryError>;

    /// Insert a customer attributed to `created_by` for both attribution
    /// fields.
    async fn insert(
        &self,
        customer: &NewCustomer,
        created_by: UserId,
    ) -> Result<CustomerView, CustomerRepositoryError>;

    /// Apply a partial update and overwrite the last-modified attribution.
    ///
    /// Returns `None` when no row matches `id`.
    async fn update(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
        modified_by: UserId,
    ) -> Result<Option<CustomerView>, CustomerRepositoryError>;

    /// Delete a customer, returning whether a row was removed.
    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError>;
}
