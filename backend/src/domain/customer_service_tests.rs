//! Tests for the customer service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockCustomerRepository;
use crate::domain::{ErrorCode, PLACEHOLDER_PICTURE_ID, PersonName};

fn customer_id(raw: i32) -> CustomerId {
    CustomerId::new(raw).expect("valid customer id")
}

fn actor() -> UserId {
    UserId::new(5).expect("valid user id")
}

#[fixture]
fn view() -> CustomerView {
    CustomerView {
        id: customer_id(1),
        name: "A".into(),
        surname: "B".into(),
        picture_id: PLACEHOLDER_PICTURE_ID,
        picture_path: "static/noPicturePlaceholder.jpg".into(),
        created_by_user: "alice".into(),
        last_modified_by_user: "alice".into(),
    }
}

fn new_customer() -> NewCustomer {
    NewCustomer::new(
        PersonName::new("name", "A").expect("valid"),
        PersonName::new("surname", "B").expect("valid"),
        None,
    )
}

#[rstest]
#[tokio::test]
async fn create_passes_actor_to_repository(view: CustomerView) {
    let expected = view.clone();
    let mut repo = MockCustomerRepository::new();
    repo.expect_insert()
        .withf(|customer, created_by| {
            customer.picture_id == PLACEHOLDER_PICTURE_ID && *created_by == actor()
        })
        .times(1)
        .return_once(move |_, _| Ok(view));

    let created = CustomerService::new(Arc::new(repo))
        .create(new_customer(), actor())
        .await
        .expect("create succeeds");
    assert_eq!(created, expected);
}

#[tokio::test]
async fn create_reports_unknown_picture_as_invalid_request() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_insert()
        .return_once(|_, _| Err(CustomerRepositoryError::missing_picture(42)));

    let err = CustomerService::new(Arc::new(repo))
        .create(new_customer(), actor())
        .await
        .expect_err("unknown picture");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "picture 42 does not exist");
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_update().return_once(|_, _, _| Ok(None));

    let err = CustomerService::new(Arc::new(repo))
        .update(customer_id(9), CustomerChanges::default(), actor())
        .await
        .expect_err("missing row");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_forwards_partial_changes(view: CustomerView) {
    let mut repo = MockCustomerRepository::new();
    repo.expect_update()
        .withf(|id, changes, modified_by| {
            id.get() == 1
                && changes.name.as_ref().map(PersonName::as_str) == Some("A2")
                && changes.surname.is_none()
                && *modified_by == actor()
        })
        .return_once(move |_, _, _| Ok(Some(view)));

    let changes = CustomerChanges {
        name: Some(PersonName::new("name", "A2").expect("valid")),
        ..CustomerChanges::default()
    };
    CustomerService::new(Arc::new(repo))
        .update(customer_id(1), changes, actor())
        .await
        .expect("update succeeds");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_distinguishes_missing_rows(
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockCustomerRepository::new();
    repo.expect_delete()
        .with(eq(customer_id(4)))
        .return_once(move |_| Ok(removed));

    let result = CustomerService::new(Arc::new(repo))
        .delete(customer_id(4))
        .await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[tokio::test]
async fn list_returns_empty_sequence() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_list().return_once(|| Ok(Vec::new()));

    let customers = CustomerService::new(Arc::new(repo))
        .list()
        .await
        .expect("list succeeds");
    assert!(customers.is_empty());
}

#[tokio::test]
async fn get_maps_connection_errors() {
    let mut repo = MockCustomerRepository::new();
    repo.expect_find()
        .return_once(|_| Err(CustomerRepositoryError::connection("refused")));

    let err = CustomerService::new(Arc::new(repo))
        .get(customer_id(1))
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
