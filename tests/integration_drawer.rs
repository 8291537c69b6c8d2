mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CountingListener, FakeTransport, staff_session};
use edudesk::api::Method;
use edudesk::drawer::{DrawerController, DrawerState};
use edudesk::modules::{Courses, Leads, Students};
use edudesk::resource::ResourceApi;
use edudesk_auth::{MemoryStorage, PermissionPolicy, SessionStore};
use edudesk_core::ClientError;
use edudesk_models::CourseDraft;
use edudesk_models::ids::CourseId;
use serde_json::json;

fn courses_drawer(
    transport: Arc<FakeTransport>,
    perms: &str,
) -> (DrawerController<Courses>, Arc<CountingListener>) {
    let listener = CountingListener::new();
    let drawer = DrawerController::new(ResourceApi::new(transport), staff_session(perms))
        .with_listener(listener.clone());
    (drawer, listener)
}

#[tokio::test]
async fn test_create_flow_posts_and_closes() {
    let transport = FakeTransport::new();
    let (drawer, listener) = courses_drawer(transport.clone(), "view course, add course");

    drawer.open(None).await.unwrap();
    assert_eq!(drawer.state(), DrawerState::Editing);
    assert_eq!(drawer.draft(), Some(CourseDraft::default()));
    assert_eq!(transport.request_count(), 0);

    drawer.set_field("name", json!("Alpha")).unwrap();
    transport.reply(json!({"id": 1, "name": "Alpha"}));
    drawer.submit().await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "courses/create/");
    assert_eq!(request.body.unwrap()["name"], "Alpha");
    assert_eq!(listener.calls(), 1);
    assert_eq!(drawer.state(), DrawerState::Closed);
    assert!(drawer.draft().is_none());
}

#[tokio::test]
async fn test_edit_flow_decodes_and_toggles_tags() {
    let transport = FakeTransport::new();
    let listener = CountingListener::new();
    let drawer: DrawerController<Leads> =
        DrawerController::new(ResourceApi::new(transport.clone()), staff_session("edit lead"))
            .with_listener(listener.clone());

    transport.reply(json!({"id": 42, "name": "Beta", "tags": "X, Y"}));
    drawer.open(Some(42)).await.unwrap();

    let get = transport.last_request();
    assert_eq!(get.method, Method::Get);
    assert_eq!(get.path, "leads/42/");
    assert_eq!(drawer.draft().unwrap().tags.as_slice(), ["X", "Y"]);

    drawer.toggle_field("tags", "Z").unwrap();
    transport.reply(json!({"id": 42}));
    drawer.submit().await.unwrap();

    let put = transport.last_request();
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.path, "leads/42/");
    assert_eq!(put.body.unwrap()["tags"], json!(["X", "Y", "Z"]));
    assert_eq!(listener.calls(), 1);
}

#[tokio::test]
async fn test_unauthorized_submit_sends_nothing() {
    let transport = FakeTransport::new();
    let (drawer, listener) = courses_drawer(transport.clone(), "view course, edit course");

    drawer.open(None).await.unwrap();
    assert!(!drawer.can_submit());

    drawer.set_field("name", json!("Gamma")).unwrap();
    let result = drawer.submit().await;

    assert!(matches!(result, Err(ClientError::Unauthorized(ref t)) if t == "add course"));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(listener.calls(), 0);
    assert_eq!(drawer.state(), DrawerState::Editing);
}

#[tokio::test]
async fn test_submit_permission_follows_mode() {
    let transport = FakeTransport::new();
    let (drawer, _) = courses_drawer(transport.clone(), "edit course");

    drawer.open(None).await.unwrap();
    assert_eq!(drawer.submit_permission(), "add course");
    assert!(!drawer.can_submit());

    transport.reply(json!({"id": 3, "name": "Go"}));
    drawer.open(Some(3)).await.unwrap();
    assert_eq!(drawer.submit_permission(), "edit course");
    assert!(drawer.can_submit());
}

#[tokio::test]
async fn test_invalid_draft_is_not_submitted() {
    let transport = FakeTransport::new();
    let (drawer, _) = courses_drawer(transport.clone(), "add course");

    drawer.open(None).await.unwrap();
    let result = drawer.submit().await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(drawer.state(), DrawerState::Editing);
    assert!(drawer.last_error().is_some());
}

#[tokio::test]
async fn test_submit_failure_keeps_draft() {
    let transport = FakeTransport::new();
    let (drawer, listener) = courses_drawer(transport.clone(), "add course");

    drawer.open(None).await.unwrap();
    drawer.set_field("name", json!("Delta")).unwrap();
    transport.fail(ClientError::Validation("Course name already exists".to_string()));

    assert!(drawer.submit().await.is_err());
    assert_eq!(drawer.state(), DrawerState::Editing);
    assert_eq!(drawer.draft().unwrap().name, "Delta");
    assert_eq!(
        drawer.last_error().as_deref(),
        Some("Validation error: Course name already exists")
    );
    assert_eq!(listener.calls(), 0);

    transport.reply(json!({"id": 9}));
    drawer.submit().await.unwrap();
    assert_eq!(listener.calls(), 1);
}

#[tokio::test]
async fn test_load_failure_surfaces_error_and_retries() {
    let transport = FakeTransport::new();
    let (drawer, _) = courses_drawer(transport.clone(), "edit course");

    transport.fail(ClientError::Http {
        status: 500,
        message: "boom".to_string(),
    });
    assert!(drawer.open(Some(5)).await.is_err());
    assert!(matches!(drawer.state(), DrawerState::LoadFailed(ref m) if m.contains("boom")));
    assert!(drawer.set_field("name", json!("x")).is_err());

    transport.reply(json!({"id": 5, "name": "Kotlin"}));
    drawer.retry().await.unwrap();
    assert_eq!(drawer.state(), DrawerState::Editing);
    assert_eq!(drawer.draft().unwrap().name, "Kotlin");
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_retry_requires_failed_load() {
    let transport = FakeTransport::new();
    let (drawer, _) = courses_drawer(transport, "add course");
    drawer.open(None).await.unwrap();
    assert!(matches!(drawer.retry().await, Err(ClientError::InvalidState(_))));
}

#[tokio::test(start_paused = true)]
async fn test_close_during_load_drops_response() {
    let transport = FakeTransport::new();
    let (drawer, _) = courses_drawer(transport.clone(), "edit course");
    transport.reply_after(Duration::from_millis(100), json!({"id": 8, "name": "Late"}));

    let (result, ()) = tokio::join!(drawer.open(Some(8)), async {
        assert_eq!(drawer.state(), DrawerState::Loading);
        drawer.close();
    });

    assert!(result.is_ok());
    assert_eq!(drawer.state(), DrawerState::Closed);
    assert!(drawer.draft().is_none());
}

#[tokio::test]
async fn test_select_sets_both_halves() {
    let transport = FakeTransport::new();
    let drawer: DrawerController<Students> =
        DrawerController::new(ResourceApi::new(transport), staff_session("add student"));

    drawer.open(None).await.unwrap();
    drawer.select("course", 3, "Rust Fundamentals").unwrap();

    let draft = drawer.draft().unwrap();
    assert_eq!(draft.course.id(), Some(CourseId::new(3)));
    assert_eq!(draft.course.label().as_deref(), Some("Rust Fundamentals"));
    assert!(!draft.batch.is_set());

    assert!(matches!(
        drawer.select("trainer", 1, "Anu"),
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn test_field_edits_are_checked() {
    let transport = FakeTransport::new();
    let drawer: DrawerController<Leads> =
        DrawerController::new(ResourceApi::new(transport), staff_session("add lead"));

    assert!(matches!(
        drawer.set_field("name", json!("Early")),
        Err(ClientError::InvalidState(_))
    ));

    drawer.open(None).await.unwrap();
    assert!(drawer.set_field("nickname", json!("x")).is_err());
    assert!(drawer.toggle_field("name", "x").is_err());
    assert!(drawer.set_field("follow_up_date", json!("not a date")).is_err());

    drawer.set_field("follow_up_date", json!("2026-11-02")).unwrap();
    drawer.toggle_field("source", "Walk-in").unwrap();
    drawer.toggle_field("source", "Referral").unwrap();
    drawer.toggle_field("source", "Walk-in").unwrap();
    drawer.update(|d| d.name = "Ravi".to_string()).unwrap();

    let draft = drawer.draft().unwrap();
    assert_eq!(draft.source.as_slice(), ["Referral"]);
    assert_eq!(draft.name, "Ravi");
    assert!(draft.follow_up_date.is_some());
}

#[tokio::test]
async fn test_create_template_takes_session_branch() {
    let session = SessionStore::new(Arc::new(MemoryStorage::new()), PermissionPolicy::default());
    session
        .set_identity(&common::identity("staff", Some("add student"), Some(4)))
        .unwrap();
    let drawer: DrawerController<Students> =
        DrawerController::new(ResourceApi::new(FakeTransport::new()), session);

    drawer.open(None).await.unwrap();
    assert_eq!(drawer.draft().unwrap().branch_id, Some(4));
}
