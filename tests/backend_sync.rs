//! Contract tests for the backend synchronization behavior, driven against a
//! mock backend.

use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apitool::state::request::{HttpMethod, KeyValuePair};
use apitool::state::view::View;
use apitool::store::Mutation;
use apitool::{App, AppError, Config};

fn app_for(server: &MockServer, dir: &TempDir) -> App {
    let base_url = Url::parse(&server.uri()).unwrap();
    App::new(Config::new(base_url).with_data_dir(dir.path()))
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "token": "tok-1"
        })))
        .mount(server)
        .await;
}

async fn mount_empty_history(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

async fn mount_empty_collections(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

/// A logged-in app with empty seeded stores.
async fn workspace_app(server: &MockServer, dir: &TempDir) -> App {
    mount_login(server).await;
    mount_empty_history(server).await;
    mount_empty_collections(server).await;
    let mut app = app_for(server, dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(app.view(), View::Workspace);
    app
}

#[tokio::test]
async fn login_enters_workspace_and_attaches_bearer() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;

    // The seed fetches must carry the freshly issued credential.
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    assert_eq!(app.view(), View::Login);

    app.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(app.view(), View::Workspace);
    assert_eq!(app.session().unwrap().name, "Ada");
}

#[tokio::test]
async fn login_failure_surfaces_backend_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    let err = app.login("ada@example.com", "wrong").await.unwrap_err();
    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected backend rejection, got {other:?}"),
    }
    // Failures are reported in place; the view does not move.
    assert_eq!(app.view(), View::Login);
    assert!(app.session().is_none());
}

#[tokio::test]
async fn register_failure_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.toggle_auth_view();
    assert_eq!(app.view(), View::Register);

    let err = app.register("Ada", "ada@example.com", "pw").await.unwrap_err();
    match err {
        AppError::Backend { message, .. } => assert_eq!(message, "Registration failed"),
        other => panic!("expected backend rejection, got {other:?}"),
    }
    assert_eq!(app.view(), View::Register);
}

#[tokio::test]
async fn session_restores_across_instances() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let _first = workspace_app(&server, &dir).await;

    let mut second = app_for(&server, &dir);
    second.start().await;
    assert_eq!(second.view(), View::Workspace);
    assert_eq!(second.session().unwrap().token, "tok-1");
}

#[tokio::test]
async fn malformed_persisted_session_behaves_as_logged_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.toml"), "corrupted [[ record").unwrap();

    let mut app = app_for(&server, &dir);
    app.start().await;
    assert_eq!(app.view(), View::Login);
    assert!(app.session().is_none());
}

#[tokio::test]
async fn dispatch_success_records_one_history_entry() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = workspace_app(&server, &dir).await;

    // HTTP error statuses from the proxied call are response data, never errors.
    Mock::given(method("POST"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 404,
            "statusText": "Not Found",
            "headers": {"content-type": "application/json"},
            "data": {"detail": "missing"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "h1",
            "createdAt": "2026-08-30T12:00:00Z",
            "url": "http://example.com",
            "method": "GET",
            "params": [],
            "headers": [],
            "body": "",
            "status": 404,
            "statusText": "Not Found",
            "responseTime": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    app.request.url = "http://example.com".to_string();
    let response = app.dispatch().await;
    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
    assert_eq!(response.body["detail"], "missing");

    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history()[0].id, "h1");
    assert_eq!(app.history()[0].status, Some(404));
}

#[tokio::test]
async fn dispatch_proxy_failure_yields_zero_status_history_entry() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = workspace_app(&server, &dir).await;

    // A reply the client cannot parse fails the transport chain before any
    // proxied status exists.
    Mock::given(method("POST"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "h2",
            "createdAt": "2026-08-30T12:00:00Z",
            "url": "http://example.com",
            "method": "GET",
            "status": 0,
            "statusText": "Error",
            "responseTime": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    app.request.url = "http://example.com".to_string();
    let response = app.dispatch().await;
    assert!(response.is_transport_failure());
    assert_eq!(response.status_text, "Error");

    assert_eq!(app.history().len(), 1);
    assert_eq!(app.history()[0].status, Some(0));
}

#[tokio::test]
async fn dispatch_survives_history_append_failure() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = workspace_app(&server, &dir).await;

    Mock::given(method("POST"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "statusText": "OK",
            "headers": {},
            "data": {"ok": true}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    app.request.url = "http://example.com".to_string();
    let response = app.dispatch().await;
    // The user still sees the response; only the history entry is dropped.
    assert_eq!(response.status, 200);
    assert!(app.history().is_empty());
}

#[tokio::test]
async fn clear_history_keeps_list_when_backend_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    mount_empty_collections(&server).await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "h1",
            "createdAt": "2026-08-30T12:00:00Z",
            "url": "http://example.com",
            "method": "GET",
            "status": 200,
            "statusText": "OK",
            "responseTime": 5
        }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(app.history().len(), 1);

    assert!(app.clear_history().await.is_err());
    assert_eq!(app.history().len(), 1);
}

#[tokio::test]
async fn clear_history_empties_list_on_success() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    mount_empty_collections(&server).await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "h1",
            "createdAt": "2026-08-30T12:00:00Z",
            "url": "http://example.com",
            "method": "DELETE",
            "status": 204,
            "statusText": "No Content",
            "responseTime": 5
        }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(app.history()[0].request.method, HttpMethod::Delete);

    app.clear_history().await.unwrap();
    assert!(app.history().is_empty());
}

#[tokio::test]
async fn add_item_replaces_whole_collection_from_backend() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    mount_empty_history(&server).await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "c1",
            "name": "Smoke",
            "items": []
        }])))
        .mount(&server)
        .await;
    // The backend returns the whole collection, including an item another
    // session added concurrently.
    Mock::given(method("POST"))
        .and(path("/collections/c1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "c1",
            "name": "Smoke",
            "items": [
                {"_id": "i1", "name": "ping", "url": "http://example.com", "method": "GET",
                 "params": [], "headers": [], "body": ""},
                {"_id": "i2", "name": "from elsewhere", "url": "http://other", "method": "POST",
                 "params": [], "headers": [], "body": "{}"}
            ]
        })))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();

    app.request.url = "http://example.com".to_string();
    app.save_to_collection("c1", "ping").await.unwrap();

    let collections = app.collections();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].items.len(), 2);
    assert_eq!(collections[0].items[0].id, "i1");
    assert_eq!(collections[0].items[1].name, "from elsewhere");
}

#[tokio::test]
async fn create_and_delete_collection_follow_backend_outcome() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = workspace_app(&server, &dir).await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "c1", "name": "New", "items": []
        })))
        .mount(&server)
        .await;
    app.create_collection("New").await.unwrap();
    assert_eq!(app.collections().len(), 1);

    // Deletion is refused: the list must stay unchanged.
    {
        let _refused = Mock::given(method("DELETE"))
            .and(path("/collections/c1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount_as_scoped(&server)
            .await;
        assert!(app.delete_collection("c1").await.is_err());
        assert_eq!(app.collections().len(), 1);
    }

    Mock::given(method("DELETE"))
        .and(path("/collections/c1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    app.delete_collection("c1").await.unwrap();
    assert!(app.collections().is_empty());
}

#[tokio::test]
async fn item_delete_and_rename_are_local_only() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    mount_empty_history(&server).await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "c1",
            "name": "Smoke",
            "items": [
                {"_id": "i1", "name": "ping", "url": "http://example.com", "method": "GET",
                 "params": [], "headers": [], "body": ""},
                {"_id": "i2", "name": "pong", "url": "http://example.com", "method": "GET",
                 "params": [], "headers": [], "body": ""}
            ]
        }])))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();

    let mutation = app.rename_collection_item(
        "c1",
        "i1",
        apitool::state::collection::CollectionItemUpdate {
            name: Some("renamed".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(mutation, Mutation::LocalOnly);
    assert_eq!(app.collections()[0].items[0].name, "renamed");

    let mutation = app.delete_collection_item("c1", "i2");
    assert_eq!(mutation, Mutation::LocalOnly);
    assert_eq!(app.collections()[0].items.len(), 1);
}

#[tokio::test]
async fn seed_failure_in_one_store_does_not_block_the_other() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "c1", "name": "Smoke", "items": []
        }])))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();

    assert!(app.history().is_empty());
    assert_eq!(app.collections().len(), 1);
}

#[tokio::test]
async fn logout_returns_to_login_and_resets_everything() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "h1",
            "createdAt": "2026-08-30T12:00:00Z",
            "url": "http://example.com",
            "method": "GET",
            "status": 200,
            "statusText": "OK",
            "responseTime": 5
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "c1", "name": "Smoke", "items": []
        }])))
        .mount(&server)
        .await;

    let mut app = app_for(&server, &dir);
    app.start().await;
    app.login("ada@example.com", "pw").await.unwrap();
    app.request.url = "http://example.com".to_string();
    app.request.params.push(KeyValuePair::new("a", "1"));
    assert_eq!(app.history().len(), 1);
    assert_eq!(app.collections().len(), 1);

    app.logout();
    assert_eq!(app.view(), View::Login);
    assert!(app.session().is_none());
    assert!(app.history().is_empty());
    assert!(app.collections().is_empty());
    assert_eq!(app.request, Default::default());

    // The persisted record is gone too: a fresh instance starts logged out.
    let mut fresh = app_for(&server, &dir);
    fresh.start().await;
    assert_eq!(fresh.view(), View::Login);
}

#[tokio::test]
async fn transport_failure_to_unreachable_backend_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    // Reserved discard port; nothing listens there.
    let base_url = Url::parse("http://127.0.0.1:9").unwrap();
    let mut app = App::new(Config::new(base_url).with_data_dir(dir.path()));

    app.request.url = "http://example.com".to_string();
    let response = app.dispatch().await;
    assert!(response.is_transport_failure());
    assert_eq!(response.status_text, "Error");
    // The history append fails against the same unreachable backend; the
    // entry is dropped rather than surfaced.
    assert!(app.history().is_empty());
}
