//! Bearer token guard for protected handlers.
//!
//! Handlers take [`AuthenticatedUser`] as an argument; extraction runs
//! [`SessionTokens::authorize`](crate::domain::SessionTokens::authorize) and
//! short-circuits with `401` before the handler body executes.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Authorization, DomainError, SessionClaims};
use crate::inbound::http::state::HttpState;

/// Claims of a caller who presented a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(SessionClaims);

impl AuthenticatedUser {
    /// Username carried by the token.
    pub fn username(&self) -> &str {
        self.0.username()
    }
}

fn authorize(req: &HttpRequest) -> Result<AuthenticatedUser, DomainError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("HTTP state is not configured"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.tokens.authorize(header) {
        Authorization::Authorized(claims) => Ok(AuthenticatedUser(claims)),
        Authorization::Rejected(reason) => {
            debug!(%reason, path = req.path(), "bearer token rejected");
            Err(DomainError::unauthorized("Unauthorized"))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}
