//! Customer API handlers.
//!
//! ```text
//! GET    /customers/all
//! GET    /customers/{id}
//! POST   /customers/        {"name":"Ada","surname":"Lovelace","pictureId":0}
//! PUT    /customers/{id}    {"surname":"King"}
//! DELETE /customers/{id}
//! ```
//!
//! Every route requires a bearer token. Id segments that are not digits never
//! match a route, so they answer 404 from the router.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CustomerChanges, CustomerId, CustomerView, DomainError, ErrorCode, NewCustomer, PersonName,
    PictureId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::SuccessResponse;
use crate::inbound::http::validation::{
    FieldName, customer_validation_error, parse_path_id, picture_reference_error,
};

const CUSTOMER_ID: FieldName = FieldName::new("id");

/// Body for `POST /customers/`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "Lovelace")]
    pub surname: String,
    /// Omitted or `0` selects the placeholder picture.
    #[serde(default)]
    pub picture_id: Option<i32>,
}

impl TryFrom<CreateCustomerRequest> for NewCustomer {
    type Error = DomainError;

    fn try_from(value: CreateCustomerRequest) -> Result<Self, Self::Error> {
        let name = PersonName::new("name", &value.name).map_err(customer_validation_error)?;
        let surname =
            PersonName::new("surname", &value.surname).map_err(customer_validation_error)?;
        let picture_id = value
            .picture_id
            .map(PictureId::from_reference)
            .transpose()
            .map_err(picture_reference_error)?;
        Ok(NewCustomer::new(name, surname, picture_id))
    }
}

/// Body for `PUT /customers/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    /// `0` resets to the placeholder picture.
    #[serde(default)]
    pub picture_id: Option<i32>,
}

impl TryFrom<UpdateCustomerRequest> for CustomerChanges {
    type Error = DomainError;

    fn try_from(value: UpdateCustomerRequest) -> Result<Self, Self::Error> {
        let name = value
            .name
            .map(|raw| PersonName::new("name", &raw))
            .transpose()
            .map_err(customer_validation_error)?;
        let surname = value
            .surname
            .map(|raw| PersonName::new("surname", &raw))
            .transpose()
            .map_err(customer_validation_error)?;
        let picture_id = value
            .picture_id
            .map(PictureId::from_reference)
            .transpose()
            .map_err(picture_reference_error)?;
        Ok(Self {
            name,
            surname,
            picture_id,
        })
    }
}

fn customer_id(raw: &str) -> Result<CustomerId, DomainError> {
    let id = parse_path_id(raw, CUSTOMER_ID)?;
    CustomerId::new(id).map_err(customer_validation_error)
}

/// Resolve the token's username to the acting user's id.
///
/// A token for a user that no longer exists is treated as unauthenticated.
async fn acting_user(state: &HttpState, user: &AuthenticatedUser) -> Result<UserId, DomainError> {
    state
        .directory
        .id_by_username(user.username())
        .await
        .map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                DomainError::unauthorized("Unauthorized")
            } else {
                err
            }
        })
}

/// List every customer ordered by id.
#[utoipa::path(
    get,
    path = "/customers/all",
    responses(
        (status = 200, description = "Customers", body = [CustomerView]),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("/all")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<CustomerView>>> {
    let customers = state.customers_query.list().await?;
    Ok(web::Json(customers))
}

/// Fetch one customer.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer", body = CustomerView),
        (status = 400, description = "Invalid id", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 404, description = "Customer not found", body = DomainError)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/{id:[0-9]+}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<CustomerView>> {
    let id = customer_id(&path)?;
    let customer = state.customers_query.get(id).await?;
    Ok(web::Json(customer))
}

/// Create a customer owned by the caller.
#[utoipa::path(
    post,
    path = "/customers/",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerView),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateCustomerRequest>,
) -> ApiResult<HttpResponse> {
    let customer = NewCustomer::try_from(payload.into_inner())?;
    let actor = acting_user(&state, &user).await?;
    let view = state.customers.create(customer, actor).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Apply a partial update.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerView),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 404, description = "Customer not found", body = DomainError)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/{id:[0-9]+}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateCustomerRequest>,
) -> ApiResult<web::Json<CustomerView>> {
    let id = customer_id(&path)?;
    let changes = CustomerChanges::try_from(payload.into_inner())?;
    let actor = acting_user(&state, &user).await?;
    let view = state.customers.update(id, changes, actor).await?;
    Ok(web::Json(view))
}

/// Delete a customer.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id", body = DomainError),
        (status = 401, description = "Missing or invalid token", body = DomainError),
        (status = 404, description = "Customer not found", body = DomainError)
    ),
    tags = ["customers"],
    operation_id = "deleteCustomer"
)]
#[delete("/{id:[0-9]+}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let id = customer_id(&path)?;
    state.customers.delete(id).await?;
    Ok(web::Json(SuccessResponse::success()))
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
