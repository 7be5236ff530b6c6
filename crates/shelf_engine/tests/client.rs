use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use shelf_engine::{
    CatalogBook, Collaborator, CollaboratorSettings, FailureKind, LookupRequest,
    ReqwestCollaborator,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> LookupRequest {
    LookupRequest {
        user_id: "1".to_string(),
        shelf: "to-read".to_string(),
        biblio: "sfpl".to_string(),
        branch: "MAIN".to_string(),
    }
}

fn collaborator(server: &MockServer) -> ReqwestCollaborator {
    ReqwestCollaborator::new(CollaboratorSettings {
        endpoint: format!("{}/books", server.uri()),
        ..CollaboratorSettings::default()
    })
}

#[tokio::test]
async fn posts_params_and_parses_books() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "userId": "1", "shelf": "to-read", "biblio": "sfpl", "branch": "MAIN"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [{
                "title": "Dune",
                "author": "Herbert",
                "description": "d",
                "cover_image": "u1",
                "full_record_link": "l1",
                "call_number": "C1"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let books = collaborator(&server).lookup(&request()).await.expect("lookup ok");

    assert_eq!(
        books,
        vec![CatalogBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: "d".to_string(),
            cover_image: "u1".to_string(),
            full_record_link: "l1".to_string(),
            call_number: "C1".to_string(),
        }]
    );
}

#[tokio::test]
async fn empty_book_list_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"books": []})))
        .mount(&server)
        .await;

    let books = collaborator(&server).lookup(&request()).await.expect("lookup ok");
    assert!(books.is_empty());
}

#[tokio::test]
async fn bad_request_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("No user id supplied!"))
        .mount(&server)
        .await;

    let err = collaborator(&server).lookup(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "No user id supplied!");
}

#[tokio::test]
async fn server_error_without_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = collaborator(&server).lookup(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert!(err.message.contains("502"));
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = collaborator(&server).lookup(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"books": []})),
        )
        .mount(&server)
        .await;

    let collaborator = ReqwestCollaborator::new(CollaboratorSettings {
        endpoint: format!("{}/books", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..CollaboratorSettings::default()
    });

    let err = collaborator.lookup(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let collaborator = ReqwestCollaborator::new(CollaboratorSettings {
        endpoint: format!("{}/books", server.uri()),
        max_bytes: 10,
        ..CollaboratorSettings::default()
    });

    let err = collaborator.lookup(&request()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let collaborator = ReqwestCollaborator::new(CollaboratorSettings {
        endpoint: "not a url".to_string(),
        ..CollaboratorSettings::default()
    });

    let err = collaborator.lookup(&request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
