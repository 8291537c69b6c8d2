#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use edudesk::api::{ApiRequest, Transport};
use edudesk::list::RefreshListener;
use edudesk_auth::{Identity, MemoryStorage, PermissionPolicy, SessionStore};
use edudesk_core::{ClientError, ClientResult};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use serde_json::{Value, json};

// =============================================================================
// Scripted transport
// =============================================================================

struct Reply {
    delay: Duration,
    result: ClientResult<Value>,
}

/// Transport answering from a queue of scripted replies, in call order, and
/// recording every request it receives.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, body: Value) {
        self.reply_after(Duration::ZERO, body);
    }

    /// Reply once `delay` has elapsed on the tokio clock.
    pub fn reply_after(&self, delay: Duration, body: Value) {
        self.replies.lock().unwrap().push_back(Reply {
            delay,
            result: Ok(body),
        });
    }

    pub fn fail(&self, err: ClientError) {
        self.replies.lock().unwrap().push_back(Reply {
            delay: Duration::ZERO,
            result: Err(err),
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        let Some(reply) = reply else {
            return Err(ClientError::NotFound(format!(
                "no scripted reply for {} {}",
                request.method, request.path
            )));
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

// =============================================================================
// Sessions
// =============================================================================

pub fn identity(role: &str, perms: Option<&str>, branch_id: Option<i64>) -> Identity {
    Identity {
        id: (1..10_000).fake(),
        name: Name().fake(),
        email: SafeEmail().fake(),
        role: role.to_string(),
        branch_id,
        role_perms: perms.map(str::to_string),
    }
}

/// Staff session holding exactly `perms`.
pub fn staff_session(perms: &str) -> SessionStore {
    let session = SessionStore::new(Arc::new(MemoryStorage::new()), PermissionPolicy::default());
    session
        .set_identity(&identity("staff", Some(perms), None))
        .unwrap();
    session
}

pub fn admin_session() -> SessionStore {
    let session = SessionStore::in_memory();
    session
        .set_identity(&identity("super_admin", None, None))
        .unwrap();
    session
}

// =============================================================================
// Listeners and payloads
// =============================================================================

#[derive(Default)]
pub struct CountingListener {
    calls: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshListener for CountingListener {
    async fn on_refresh(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn page(rows: Vec<Value>, total_pages: u32, total_count: u64) -> Value {
    json!({
        "results": rows,
        "total_pages": total_pages,
        "total_count": total_count,
    })
}

pub fn course(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "is_active": true})
}

pub fn param<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request.param(key)
}

// =============================================================================
// Mock backend
// =============================================================================

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct BackendState {
    pub courses: BTreeMap<i64, Value>,
    pub next_id: i64,
    pub last_query: HashMap<String, String>,
    pub flaky_hits: usize,
}

pub type Backend = Arc<Mutex<BackendState>>;

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] != PASSWORD {
        return Err(error_body(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    Ok(Json(json!({
        "user": {
            "id": 11,
            "name": "Front Desk",
            "email": body["email"],
            "role": "staff",
            "branch_id": "2",
            "role_perms": "view course, add course, edit course",
        }
    })))
}

async fn list_courses(
    State(state): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let search = params.get("search").cloned().unwrap_or_default().to_lowercase();
    let rows: Vec<Value> = state
        .courses
        .values()
        .filter(|c| {
            c["name"]
                .as_str()
                .is_some_and(|n| n.to_lowercase().contains(&search))
        })
        .cloned()
        .collect();
    state.last_query = params;
    let count = rows.len() as u64;
    Json(page(rows, u32::from(count > 0), count))
}

async fn get_course(
    State(state): State<Backend>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let state = state.lock().unwrap();
    state
        .courses
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Course not found"))
}

async fn create_course(
    State(state): State<Backend>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let id = state.next_id;
    body["id"] = json!(id);
    state.courses.insert(id, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_course(
    State(state): State<Backend>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut state = state.lock().unwrap();
    if !state.courses.contains_key(&id) {
        return Err(error_body(StatusCode::NOT_FOUND, "Course not found"));
    }
    body["id"] = json!(id);
    state.courses.insert(id, body.clone());
    Ok(Json(body))
}

async fn delete_course(State(state): State<Backend>, Path(id): Path<i64>) -> StatusCode {
    match state.lock().unwrap().courses.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// Fails with 503 twice, then succeeds.
async fn flaky(State(state): State<Backend>) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.flaky_hits += 1;
    if state.flaky_hits <= 2 {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(page(vec![], 0, 0)))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(page(vec![], 0, 0))
}

/// Start the mock API on an ephemeral port. Returns its base URL.
pub async fn spawn_backend() -> (String, Backend) {
    let state: Backend = Arc::new(Mutex::new(BackendState::default()));

    let app = Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/courses/", get(list_courses))
        .route("/api/courses/create/", post(create_course))
        .route("/api/courses/{id}/", get(get_course).put(update_course))
        .route("/api/courses/{id}/delete/", delete(delete_course))
        .route("/api/flaky/", get(flaky).post(flaky))
        .route("/api/slow/", get(slow))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), state)
}
