//! PostgreSQL-backed [`CustomerRepository`] adapter.
//!
//! Reads and writes return the joined view in a single statement. Writes use
//! a data-modifying CTE so the row and its resolved picture path and
//! usernames come back atomically.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Int4, Nullable, Varchar};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};
use crate::domain::{CustomerChanges, CustomerId, CustomerView, NewCustomer, PersonName, PictureId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::CustomerViewRow;
use super::pool::{DbPool, PoolError};
use super::schema::customers;

/// Diesel-backed implementation of the customer persistence port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const VIEW_SQL: &str = r#"
SELECT c.id, c.name, c.surname, c.picture_id, p.picture_path,
       creator.username AS created_by_user,
       modifier.username AS last_modified_by_user
FROM customers c
JOIN pictures p ON p.id = c.picture_id
JOIN users creator ON creator.id = c.created_by_user_id
JOIN users modifier ON modifier.id = c.last_modified_by_user_id
"#;

const INSERT_SQL: &str = r#"
WITH c AS (
    INSERT INTO customers (name, surname, picture_id, created_by_user_id, last_modified_by_user_id)
    VALUES ($1, $2, $3, $4, $4)
    RETURNING *
)
SELECT c.id, c.name, c.surname, c.picture_id, p.picture_path,
       creator.username AS created_by_user,
       modifier.username AS last_modified_by_user
FROM c
JOIN pictures p ON p.id = c.picture_id
JOIN users creator ON creator.id = c.created_by_user_id
JOIN users modifier ON modifier.id = c.last_modified_by_user_id
"#;

const UPDATE_SQL: &str = r#"
WITH c AS (
    UPDATE customers SET
        name = COALESCE($1, name),
        surname = COALESCE($2, surname),
        picture_id = COALESCE($3, picture_id),
        last_modified_by_user_id = $4
    WHERE id = $5
    RETURNING *
)
SELECT c.id, c.name, c.surname, c.picture_id, p.picture_path,
       creator.username AS created_by_user,
       modifier.username AS last_modified_by_user
FROM c
JOIN pictures p ON p.id = c.picture_id
JOIN users creator ON creator.id = c.created_by_user_id
JOIN users modifier ON modifier.id = c.last_modified_by_user_id
"#;

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    CustomerRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    picture_id: Option<PictureId>,
) -> CustomerRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::ForeignKeyViolation { constraint }
            if constraint
                .as_deref()
                .is_none_or(|name| name.contains("picture")) =>
        {
            match picture_id {
                Some(id) => CustomerRepositoryError::missing_picture(id.get()),
                None => CustomerRepositoryError::query("foreign key violation"),
            }
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            CustomerRepositoryError::query("referenced user does not exist")
        }
        DieselFailure::UniqueViolation { .. } => {
            CustomerRepositoryError::query("unique constraint violation")
        }
        DieselFailure::Connection(message) => CustomerRepositoryError::connection(message),
        DieselFailure::Query(message) => CustomerRepositoryError::query(message),
    }
}

fn to_view(row: CustomerViewRow) -> Result<CustomerView, CustomerRepositoryError> {
    CustomerView::try_from(row).map_err(CustomerRepositoryError::query)
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn list(&self) -> Result<Vec<CustomerView>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerViewRow> = sql_query(format!("{VIEW_SQL} ORDER BY c.id"))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list customers", None))?;
        rows.into_iter().map(to_view).collect()
    }

    async fn find(&self, id: CustomerId) -> Result<Option<CustomerView>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomerViewRow> = sql_query(format!("{VIEW_SQL} WHERE c.id = $1"))
            .bind::<Int4, _>(id.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find customer", None))?;
        row.map(to_view).transpose()
    }

    async fn insert(
        &self,
        customer: &NewCustomer,
        created_by: UserId,
    ) -> Result<CustomerView, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CustomerViewRow = sql_query(INSERT_SQL)
            .bind::<Varchar, _>(customer.name.as_str())
            .bind::<Varchar, _>(customer.surname.as_str())
            .bind::<Int4, _>(customer.picture_id.get())
            .bind::<Int4, _>(created_by.get())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert customer", Some(customer.picture_id)))?;
        to_view(row)
    }

    async fn update(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
        modified_by: UserId,
    ) -> Result<Option<CustomerView>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomerViewRow> = sql_query(UPDATE_SQL)
            .bind::<Nullable<Varchar>, _>(changes.name.as_ref().map(PersonName::as_str))
            .bind::<Nullable<Varchar>, _>(changes.surname.as_ref().map(PersonName::as_str))
            .bind::<Nullable<Int4>, _>(changes.picture_id.map(PictureId::get))
            .bind::<Int4, _>(modified_by.get())
            .bind::<Int4, _>(id.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "update customer", changes.picture_id))?;
        row.map(to_view).transpose()
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(customers::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete customer", None))?;
        Ok(removed > 0)
    }
}
