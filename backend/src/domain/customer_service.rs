//! Customer record services.
//!
//! A zero-row update or delete surfaces as `NotFound` rather than success.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CustomerCommand, CustomerQuery, CustomerRepository, CustomerRepositoryError,
};
use crate::domain::{CustomerChanges, CustomerId, CustomerView, DomainError, NewCustomer, UserId};

fn map_repository_error(error: CustomerRepositoryError) -> DomainError {
    match error {
        CustomerRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("customer repository unavailable: {message}"))
        }
        CustomerRepositoryError::Query { message } => {
            DomainError::internal(format!("customer repository error: {message}"))
        }
        CustomerRepositoryError::MissingPicture { picture_id } => {
            DomainError::invalid_request(format!("picture {picture_id} does not exist")).with_details(
                json!({ "field": "pictureId", "value": picture_id, "code": "unknown_picture" }),
            )
        }
    }
}

fn customer_not_found(id: CustomerId) -> DomainError {
    DomainError::not_found(format!("customer {id} not found"))
}

/// Customer service implementing both customer driving ports.
#[derive(Clone)]
pub struct CustomerService<R> {
    customers: Arc<R>,
}

impl<R> CustomerService<R> {
    /// Create a new service with the customer repository.
    pub fn new(customers: Arc<R>) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl<R> CustomerCommand for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn create(&self, customer: NewCustomer, actor: UserId) -> Result<CustomerView, DomainError> {
        let view = self
            .customers
            .insert(&customer, actor)
            .await
            .map_err(map_repository_error)?;
        info!(customer_id = %view.id, user_id = %actor, "customer created");
        Ok(view)
    }

    async fn update(
        &self,
        id: CustomerId,
        changes: CustomerChanges,
        actor: UserId,
    ) -> Result<CustomerView, DomainError> {
        let view = self
            .customers
            .update(id, &changes, actor)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| customer_not_found(id))?;
        info!(customer_id = %id, user_id = %actor, "customer updated");
        Ok(view)
    }

    async fn delete(&self, id: CustomerId) -> Result<(), DomainError> {
        let removed = self
            .customers
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(customer_not_found(id));
        }
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> CustomerQuery for CustomerService<R>
where
    R: CustomerRepository,
{
    async fn list(&self) -> Result<Vec<CustomerView>, DomainError> {
        self.customers.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: CustomerId) -> Result<CustomerView, DomainError> {
        self.customers
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| customer_not_found(id))
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
