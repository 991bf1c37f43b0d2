//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_http_state, seed_admin};

use std::path::PathBuf;
use std::time::Duration;

use actix_files::Files;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crm_backend::Trace;
#[cfg(debug_assertions)]
use crm_backend::doc::ApiDoc;
use crm_backend::inbound::http::configure_api;
use crm_backend::inbound::http::health::{HealthState, live, ready};
use crm_backend::inbound::http::pictures::UploadPolicy;
use crm_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Idle time allowed for a client to send request headers or disconnect.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    upload_policy: web::Data<UploadPolicy>,
    images_dir: PathBuf,
    public_dir: Option<PathBuf>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        upload_policy,
        images_dir,
        public_dir,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(upload_policy)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live)
        .service(Files::new("/static", images_dir));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The homepage mount matches every path, so it goes last.
    match public_dir {
        Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
        None => app,
    }
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Seeds the `Admin` account when a password is configured, then binds the
/// listener and marks the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction, admin seeding,
/// or binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    seed_admin(
        http_state.registration.as_ref(),
        config.admin_password.as_deref().map(String::as_str),
    )
    .await?;

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        upload_policy: web::Data::new(UploadPolicy {
            max_bytes: config.max_upload_bytes,
        }),
        images_dir: config.images_dir.clone(),
        public_dir: config.public_dir.clone(),
    };
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(deps.clone()))
        .client_request_timeout(CLIENT_TIMEOUT)
        .client_disconnect_timeout(CLIENT_TIMEOUT)
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
