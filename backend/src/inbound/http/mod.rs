//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod customers;
pub mod error;
pub mod health;
pub mod pictures;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;


use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register the `/users` and `/customers` scopes.
///
/// The caller provides [`state::HttpState`] and, optionally,
/// [`pictures::UploadPolicy`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use crm_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/users")
                .service(users::register)
                .service(users::login),
        )
        .service(
            web::scope("/customers")
                .service(customers::list_customers)
                .service(customers::create_customer)
                .service(customers::get_customer)
                .service(customers::update_customer)
                .service(customers::delete_customer)
                .service(pictures::get_picture)
                .service(pictures::upload_picture),
        );
}
