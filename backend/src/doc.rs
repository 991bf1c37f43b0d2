//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the bearer token security scheme. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CustomerView, DomainError, ErrorCode, PictureRecord};
use crate::inbound::http::customers::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::inbound::http::users::{CredentialsRequest, LoginResponse, SuccessResponse};

/// Name of the security scheme protecting customer routes.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /users/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CRM backend API",
        description = "Customer records with bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::pictures::get_picture,
        crate::inbound::http::pictures::upload_picture,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        CustomerView,
        PictureRecord,
        CreateCustomerRequest,
        UpdateCustomerRequest,
        CredentialsRequest,
        SuccessResponse,
        LoginResponse,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "customers", description = "Customer records"),
        (name = "pictures", description = "Customer pictures"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
