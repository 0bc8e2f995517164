//! HTTP-level tests for the DigitalOcean client against a mock server.
//!
//! These pin the wire format (paths, auth header, `db` envelope) and the
//! status-to-error mapping the reconciler relies on.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tidemark_do::{DoClient, DoConfig};
use tidemark_remote::{ApiError, DatabaseApi};

const CLUSTER: &str = "9cc10173-e9ea-4176-9dbc-a4cee4c4ff30";

async fn mock_client() -> (MockServer, DoClient) {
    let server = MockServer::start().await;
    let client =
        DoClient::new(DoConfig::new("test-token").with_base_url(server.uri())).expect("client");
    (server, client)
}

#[tokio::test]
async fn get_returns_record_and_sends_bearer_token() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/databases/{CLUSTER}/dbs/defaultdb")))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"db": {"name": "defaultdb"}})))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.get_db(CLUSTER, "defaultdb").await.expect("get");
    assert_eq!(info.name, "defaultdb");
}

#[tokio::test]
async fn get_maps_404_to_not_found() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"id": "not_found", "message": "database not found"})),
        )
        .mount(&server)
        .await;

    let err = client.get_db(CLUSTER, "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), format!("database not found: {CLUSTER}/missing"));
}

#[tokio::test]
async fn create_posts_name_and_parses_envelope() {
    let (server, client) = mock_client().await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/databases/{CLUSTER}/dbs")))
        .and(body_json(json!({"name": "foobar"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"db": {"name": "foobar"}})))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.create_db(CLUSTER, "foobar").await.expect("create");
    assert_eq!(info.name, "foobar");
}

#[tokio::test]
async fn create_maps_duplicate_name_to_conflict() {
    let (server, client) = mock_client().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"id": "unprocessable_entity", "message": "name already exists"})),
        )
        .mount(&server)
        .await;

    let err = client.create_db(CLUSTER, "foobar").await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn create_maps_409_to_conflict() {
    let (server, client) = mock_client().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "conflict"})))
        .mount(&server)
        .await;

    let err = client.create_db(CLUSTER, "foobar").await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn rejected_token_maps_to_unauthorized() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"id": "unauthorized", "message": "Unable to authenticate you"})),
        )
        .mount(&server)
        .await;

    let err = client.get_db(CLUSTER, "defaultdb").await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn server_error_preserves_status_and_message() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"id": "server_error", "message": "something broke"})),
        )
        .mount(&server)
        .await;

    let err = client.get_db(CLUSTER, "defaultdb").await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "something broke");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_succeeds_on_204() {
    let (server, client) = mock_client().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/databases/{CLUSTER}/dbs/defaultdb")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_db(CLUSTER, "defaultdb").await.expect("delete");
}

#[tokio::test]
async fn delete_maps_404_to_not_found() {
    let (server, client) = mock_client().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let err = client.delete_db(CLUSTER, "gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn malformed_success_body_is_a_transport_error() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_db(CLUSTER, "defaultdb").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}
