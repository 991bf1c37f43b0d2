//! Builders that assemble adapters and services into [`HttpState`].

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use crm_backend::domain::ports::UserRegistration;
use crm_backend::domain::{
    CredentialService, CustomerService, ErrorCode, PictureService, RegistrationCredentials,
    SessionTokens,
};
use crm_backend::inbound::http::state::{HttpState, HttpStatePorts};
use crm_backend::outbound::persistence::{
    DieselCustomerRepository, DieselPictureRepository, DieselUserRepository,
};
use crm_backend::outbound::security::BcryptPasswordHasher;
use crm_backend::outbound::storage::CapStdPictureStorage;

use super::ServerConfig;

/// Username of the account seeded at startup.
pub(crate) const ADMIN_USERNAME: &str = "Admin";

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Wire the Diesel, bcrypt and cap-std adapters into domain services.
///
/// # Errors
/// Fails when the bcrypt cost is rejected or the images directory cannot be
/// opened.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let pool = config.db_pool.clone();
    let hasher = Arc::new(
        BcryptPasswordHasher::new(config.bcrypt_cost)
            .map_err(|err| io_error("bcrypt hasher", err))?,
    );
    let storage = Arc::new(
        CapStdPictureStorage::open(&config.images_dir)
            .map_err(|err| io_error("images directory", err))?,
    );

    let credentials = Arc::new(CredentialService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        hasher,
    ));
    let customers = Arc::new(CustomerService::new(Arc::new(
        DieselCustomerRepository::new(pool.clone()),
    )));
    let pictures = Arc::new(PictureService::new(
        Arc::new(DieselPictureRepository::new(pool)),
        storage,
    ));
    let tokens = Arc::new(SessionTokens::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl,
        Arc::new(DefaultClock),
    ));

    Ok(HttpState::new(
        HttpStatePorts {
            login: credentials.clone(),
            registration: credentials.clone(),
            directory: credentials,
            customers: customers.clone(),
            customers_query: customers,
            pictures: pictures.clone(),
            pictures_query: pictures,
        },
        tokens,
    ))
}

/// Register the `Admin` account when a password is configured.
///
/// An existing account is left untouched.
///
/// # Errors
/// Fails when the password violates the credential policy or persistence
/// fails.
pub(crate) async fn seed_admin(
    registration: &dyn UserRegistration,
    password: Option<&str>,
) -> std::io::Result<()> {
    let Some(password) = password else {
        return Ok(());
    };
    let credentials = RegistrationCredentials::try_from_parts(ADMIN_USERNAME, password)
        .map_err(|err| io_error("admin password", err))?;
    match registration.register(&credentials).await {
        Ok(id) => {
            info!(user_id = id.get(), "seeded admin account");
            Ok(())
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            info!("admin account already present");
            Ok(())
        }
        Err(err) => Err(io_error("seeding admin account", err)),
    }
}
