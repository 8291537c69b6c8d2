mod common;

use std::sync::Arc;

use common::{PASSWORD, spawn_backend};
use edudesk::api::{ApiClient, ApiRequest, AuthService, Transport};
use edudesk::list::ListController;
use edudesk::modules::Courses;
use edudesk::resource::{Resource, ResourceApi};
use edudesk_auth::SessionStore;
use edudesk_config::{ApiConfig, ListConfig};
use edudesk_core::ClientError;
use edudesk_models::CourseDraft;
use serde_json::json;

fn client(base_url: &str) -> Arc<ApiClient> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        retry_attempts: 2,
        retry_backoff_ms: 10,
    };
    Arc::new(ApiClient::new(config).unwrap())
}

#[tokio::test]
async fn test_login_stores_wrapped_identity() {
    let (base_url, _) = spawn_backend().await;
    let transport = client(&base_url);
    let session = SessionStore::in_memory();

    let identity = AuthService::login(transport.as_ref(), &session, "desk@example.com", PASSWORD)
        .await
        .unwrap();

    assert_eq!(identity.email, "desk@example.com");
    assert_eq!(identity.branch_id, Some(2));
    assert_eq!(session.current_identity(), Some(identity));
    assert!(session.has_permission("Add Course"));
    assert!(!session.has_permission("delete course"));

    AuthService::logout(&session).unwrap();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let (base_url, _) = spawn_backend().await;
    let transport = client(&base_url);
    let session = SessionStore::in_memory();

    let result = AuthService::login(transport.as_ref(), &session, "desk@example.com", "nope").await;
    assert!(matches!(result, Err(ClientError::Unauthenticated)));
    assert!(!session.is_authenticated());

    let result = AuthService::login(transport.as_ref(), &session, " ", PASSWORD).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
}

#[tokio::test]
async fn test_course_crud_round_trip() {
    let (base_url, backend) = spawn_backend().await;
    let api: ResourceApi<Courses> = ResourceApi::new(client(&base_url));

    let draft = CourseDraft {
        name: "Rust Fundamentals".to_string(),
        fee: Some(12000.0),
        ..CourseDraft::default()
    };
    let created = api.create(&draft).await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let record = api.get(id).await.unwrap();
    assert_eq!(Courses::id(&record), id);
    assert_eq!(record.fields.name, "Rust Fundamentals");

    let mut edited = Courses::hydrate(record);
    edited.duration = Some("3 months".to_string());
    api.update(id, &edited).await.unwrap();
    assert_eq!(
        backend.lock().unwrap().courses[&id]["duration"],
        json!("3 months")
    );

    let options = api.options().await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Rust Fundamentals");
    assert_eq!(options[0].id(), Some(id));

    api.delete(id).await.unwrap();
    assert!(matches!(api.get(id).await, Err(ClientError::NotFound(ref m)) if m == "Course not found"));
}

#[tokio::test]
async fn test_list_query_reaches_server() {
    let (base_url, backend) = spawn_backend().await;
    let api: ResourceApi<Courses> = ResourceApi::new(client(&base_url));
    for name in ["Rust", "Go", "Rust Advanced"] {
        api.create(&CourseDraft {
            name: name.to_string(),
            ..CourseDraft::default()
        })
        .await
        .unwrap();
    }

    let session = SessionStore::in_memory();
    session
        .set_identity(&common::identity("staff", Some("all"), None))
        .unwrap();
    let list = ListController::new(api, session, &ListConfig::default());
    list.search_now("rust").await.unwrap();

    let state = list.state();
    assert_eq!(state.rows.len(), 2);
    assert_eq!(state.total_count, 2);

    let query = backend.lock().unwrap().last_query.clone();
    assert_eq!(query.get("search").map(String::as_str), Some("rust"));
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("sort_field").map(String::as_str), Some("name"));
}

#[tokio::test]
async fn test_reads_are_retried_writes_are_not() {
    let (base_url, backend) = spawn_backend().await;
    let transport = client(&base_url);

    transport.send(ApiRequest::get("flaky/")).await.unwrap();
    assert_eq!(backend.lock().unwrap().flaky_hits, 3);

    backend.lock().unwrap().flaky_hits = 0;
    let result = transport.send(ApiRequest::post("flaky/", json!({}))).await;
    assert!(matches!(result, Err(ClientError::Http { status: 503, .. })));
    assert_eq!(backend.lock().unwrap().flaky_hits, 1);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let (base_url, _) = spawn_backend().await;
    let config = ApiConfig {
        base_url,
        timeout_secs: 1,
        retry_attempts: 0,
        retry_backoff_ms: 10,
    };
    let transport = ApiClient::new(config).unwrap();

    let result = transport.send(ApiRequest::get("slow/")).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::Timeout));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let transport = client("http://127.0.0.1:9");
    let err = transport.send(ApiRequest::get("courses/")).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
