//! Account API handlers.
//!
//! ```text
//! POST /users/register {"username":"alice","password":"supersecretpw1"}
//! POST /users/login    {"username":"alice","password":"supersecretpw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    DomainError, LoginCredentials, LoginValidationError, RegistrationCredentials,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::user_validation_error;

/// Credentials body shared by `register` and `login`.
///
/// Example JSON:
/// `{"username":"alice","password":"supersecretpw1"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<&CredentialsRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// `{"result":"success"}` acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    #[schema(example = "success")]
    pub result: String,
}

impl SuccessResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_owned(),
        }
    }
}

/// Successful login acknowledgement carrying the bearer token.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "success")]
    pub result: String,
    pub token: String,
}

/// Create a user account.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = SuccessResponse),
        (status = 400, description = "Invalid username or password", body = DomainError),
        (status = 409, description = "Username already in use", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = RegistrationCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(user_validation_error)?;
    let id = state.registration.register(&credentials).await?;
    info!(user_id = %id, "registered user");
    Ok(HttpResponse::Created().json(SuccessResponse::success()))
}

/// Authenticate and receive a bearer token.
///
/// Unknown usernames and wrong passwords are indistinguishable to callers.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = CredentialsRequest,
    responses(
        (status = 202, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&*payload).map_err(map_login_validation_error)?;
    state.login.authenticate(&credentials).await?;
    let issued = state
        .tokens
        .issue(credentials.username())
        .map_err(|err| DomainError::internal(format!("failed to issue token: {err}")))?;
    Ok(HttpResponse::Accepted().json(LoginResponse {
        result: "success".to_owned(),
        token: issued.token,
    }))
}

fn map_login_validation_error(err: LoginValidationError) -> DomainError {
    match err {
        LoginValidationError::EmptyUsername => DomainError::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => DomainError::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
