//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use mockable::DefaultClock;

use crate::domain::ports::{
    MockCustomerCommand, MockCustomerQuery, MockLoginService, MockPictureCommand,
    MockPictureQuery, MockUserDirectory, MockUserRegistration,
};
use crate::domain::{DEFAULT_TOKEN_TTL, SessionTokens};

use super::state::{HttpState, HttpStatePorts};

/// Signing secret shared by handler tests.
pub const TOKEN_SECRET: &[u8] = b"handler-test-signing-secret";

/// Token issuer on the wall clock with the default lifetime.
pub fn fixed_tokens() -> SessionTokens {
    SessionTokens::new(TOKEN_SECRET, DEFAULT_TOKEN_TTL, Arc::new(DefaultClock))
}

/// Mock ports without expectations; any unexpected call panics the test.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockUserRegistration,
    pub directory: MockUserDirectory,
    pub customers: MockCustomerCommand,
    pub customers_query: MockCustomerQuery,
    pub pictures: MockPictureCommand,
    pub pictures_query: MockPictureQuery,
}

impl MockPorts {
    pub fn into_state(self, tokens: SessionTokens) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                registration: Arc::new(self.registration),
                directory: Arc::new(self.directory),
                customers: Arc::new(self.customers),
                customers_query: Arc::new(self.customers_query),
                pictures: Arc::new(self.pictures),
                pictures_query: Arc::new(self.pictures_query),
            },
            Arc::new(tokens),
        )
    }
}

/// State whose ports all reject calls.
pub fn state_with_tokens(tokens: SessionTokens) -> HttpState {
    MockPorts::default().into_state(tokens)
}

/// `Authorization` header carrying a fresh token for `username`.
pub fn bearer_header(username: &str) -> (actix_web::http::header::HeaderName, String) {
    let issued = fixed_tokens().issue(username).expect("token issues");
    (AUTHORIZATION, format!("Bearer {}", issued.token))
}
