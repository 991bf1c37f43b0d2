//! Driving ports for customer writes and reads.

use async_trait::async_trait;

use crate::domain::{CustomerChanges, CustomerId, CustomerView, DomainError, NewCustomer, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerCommand: Send + Sync {
    async fn create(&self, customer: NewCustomer, actor: UserId) -> Result<CustomerView, DomainError>;

    /// Fails with `NotFound` when `id` matches no customer.
    async fn update(
        &self,
        id: CustomerId,
        changes: CustomerChanges,
        actor: UserId,
    ) -> Result<CustomerView, DomainError>;

    /// Fails with `NotFound` when `id` matches no customer.
    async fn delete(&self, id: CustomerId) -> Result<(), DomainError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerQuery: Send + Sync {
    /// All customers by ascending id; empty when none exist.
    async fn list(&self) -> Result<Vec<CustomerView>, DomainError>;

    async fn get(&self, id: CustomerId) -> Result<CustomerView, DomainError>;
}
