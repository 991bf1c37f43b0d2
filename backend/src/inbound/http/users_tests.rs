//! Handler tests for account registration and login.

use super::*;
use crate::domain::ports::{MockLoginService, MockUserRegistration};
use crate::domain::{ErrorCode, UserId};
use crate::inbound::http::test_utils::{MockPorts, fixed_tokens};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

#[derive(Debug)]
struct ValidationExpectation<'a> {
    message: &'a str,
    field: &'a str,
    code: &'a str,
}

fn request(username: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        username: username.into(),
        password: password.into(),
    }
}

async fn call(ports: MockPorts, uri: &str, body: CredentialsRequest) -> actix_web::dev::ServiceResponse {
    let state = ports.into_state(fixed_tokens());
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/users").service(register).service(login)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    actix_test::call_service(&app, request).await
}

#[actix_web::test]
async fn register_returns_created_with_success_body() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .withf(|creds| creds.username().as_str() == "alice")
        .times(1)
        .return_once(|_| Ok(UserId::new(1).expect("id")));
    let ports = MockPorts {
        registration,
        ..MockPorts::default()
    };

    let response = call(ports, "/users/register", request("alice", "supersecretpw1")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, serde_json::json!({"result": "success"}));
}

#[rstest]
#[case(
    "alice",
    "short",
    ValidationExpectation {
        message: "password must be at least 12 characters",
        field: "password",
        code: "password_too_short",
    }
)]
#[case(
    "alice",
    "ééééééééééé",
    ValidationExpectation {
        message: "password must be at least 12 characters",
        field: "password",
        code: "password_too_short",
    }
)]
#[case(
    "   ",
    "supersecretpw1",
    ValidationExpectation {
        message: "username must not be empty",
        field: "username",
        code: "empty_username",
    }
)]
#[actix_web::test]
async fn register_rejects_invalid_input_before_the_service(
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: ValidationExpectation<'_>,
) {
    let response = call(MockPorts::default(), "/users/register", request(username, password)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], expected.message);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], expected.field);
    assert_eq!(body["details"]["code"], expected.code);
}

#[actix_web::test]
async fn register_surfaces_duplicate_as_conflict() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .return_once(|_| Err(crate::domain::DomainError::conflict("Username already in use")));
    let ports = MockPorts {
        registration,
        ..MockPorts::default()
    };

    let response = call(ports, "/users/register", request("alice", "supersecretpw1")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn login_returns_accepted_with_a_valid_token() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .withf(|creds| creds.username() == "alice" && creds.password() == "supersecretpw1")
        .return_once(|_| Ok(UserId::new(1).expect("id")));
    let ports = MockPorts {
        login: login_service,
        ..MockPorts::default()
    };

    let response = call(ports, "/users/login", request(" alice ", "supersecretpw1")).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["result"], "success");
    let token = body["token"].as_str().expect("token string");
    let claims = fixed_tokens().validate(token).expect("token validates");
    assert_eq!(claims.username(), "alice");
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_unauthorised_status() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .return_once(|_| Err(crate::domain::DomainError::unauthorized("invalid credentials")));
    let ports = MockPorts {
        login: login_service,
        ..MockPorts::default()
    };

    let response = call(ports, "/users/login", request("alice", "wrong-password")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "invalid credentials");
    assert_eq!(body["code"], "unauthorized");
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn login_rejects_blank_password() {
    let response = call(MockPorts::default(), "/users/login", request("alice", "")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "empty_password");
}

#[rstest]
fn login_validation_errors_carry_field_details() {
    let err = map_login_validation_error(LoginValidationError::EmptyUsername);
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().expect("details")["field"], "username");
}
