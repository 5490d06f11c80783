use std::sync::Arc;

use httpmock::prelude::*;
use landing_extern_contracts::contact::ContactApiService;
use landing_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use landing_models::{
    contact::{ContactDispatchReceipt, ContactSubmission, ContactSubmissionDraft},
    email::EmailReceipt,
};
use serde_json::json;

const ROUTE: &str = "/send-contact-email";

#[tokio::test]
async fn ok() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ROUTE).json_body(json!({
                "firstName": "Ana",
                "lastName": "Silva",
                "email": "ana@example.com",
                "subject": "Orçamento",
                "message": "Gostaria de um orçamento para um site.",
            }));
            then.status(200).json_body(json!({
                "success": true,
                "ownerEmailResponse": { "id": "owner-id" },
                "clientEmailResponse": { "id": "client-id" },
            }));
        })
        .await;
    let sut = make_sut(&server);

    let result = sut.send_contact_email(submission()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        result,
        ContactDispatchReceipt {
            owner: EmailReceipt::new("owner-id"),
            client: EmailReceipt::new("client-id"),
        }
    );
}

#[tokio::test]
async fn server_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ROUTE);
            then.status(500)
                .json_body(json!({ "error": "Failed to send contact notification" }));
        })
        .await;
    let sut = make_sut(&server);

    let result = sut.send_contact_email(submission()).await;

    mock.assert_async().await;
    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"), "{err}");
    assert!(err.contains("Failed to send contact notification"), "{err}");
}

#[tokio::test]
async fn no_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ROUTE);
            then.status(200).json_body(json!({
                "success": false,
                "ownerEmailResponse": { "id": "owner-id" },
                "clientEmailResponse": { "id": "client-id" },
            }));
        })
        .await;
    let sut = make_sut(&server);

    sut.send_contact_email(submission()).await.unwrap_err();
}

#[tokio::test]
async fn malformed_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ROUTE);
            then.status(200).body("not json");
        })
        .await;
    let sut = make_sut(&server);

    sut.send_contact_email(submission()).await.unwrap_err();
}

fn make_sut(server: &MockServer) -> ContactApiServiceImpl {
    ContactApiServiceImpl::new(ContactApiServiceConfig {
        endpoint: Arc::new(server.url(ROUTE).parse().unwrap()),
    })
    .unwrap()
}

fn submission() -> ContactSubmission {
    ContactSubmissionDraft {
        first_name: "Ana".into(),
        last_name: "Silva".into(),
        email: "ana@example.com".into(),
        subject: "Orçamento".into(),
        message: "Gostaria de um orçamento para um site.".into(),
    }
    .try_into()
    .unwrap()
}
