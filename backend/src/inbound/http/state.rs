//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SessionTokens;
use crate::domain::ports::{
    CustomerCommand, CustomerQuery, LoginService, PictureCommand, PictureQuery, UserDirectory,
    UserRegistration,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub directory: Arc<dyn UserDirectory>,
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub pictures: Arc<dyn PictureCommand>,
    pub pictures_query: Arc<dyn PictureQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub directory: Arc<dyn UserDirectory>,
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub pictures: Arc<dyn PictureCommand>,
    pub pictures_query: Arc<dyn PictureQuery>,
    pub tokens: Arc<SessionTokens>,
}

impl HttpState {
    /// Construct state from the ports bundle and the token issuer.
    pub fn new(ports: HttpStatePorts, tokens: Arc<SessionTokens>) -> Self {
        let HttpStatePorts {
            login,
            registration,
            directory,
            customers,
            customers_query,
            pictures,
            pictures_query,
        } = ports;
        Self {
            login,
            registration,
            directory,
            customers,
            customers_query,
            pictures,
            pictures_query,
            tokens,
        }
    }
}
