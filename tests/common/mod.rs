//! Shared helpers for integration tests.
//!
//! Provides an in-memory content store and a fake GitHub contents API that
//! both lay out files the way the real API reports them.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_test::TestServer;
use base64::Engine;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use gitgallery::config::Config;
use gitgallery::web::handlers::AppState;
use gitgallery::web::router::create_router;
use gitgallery::{ContentStore, FileWrite, GalleryService, RepositoryRef, StoreError};

/// Token the fake GitHub API accepts.
pub const TEST_TOKEN: &str = "test-token";

/// API locator reported for `path`.
fn api_url(path: &str) -> String {
    format!("https://api.test/repos/owner/repo/contents/{}", path)
}

fn file_json(path: &str, content: &[u8]) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "name": name,
        "path": path,
        "type": "file",
        "sha": format!("sha-{}-{}", path, content.len()),
        "size": content.len(),
        "url": api_url(path),
        "download_url": format!("https://raw.test/owner/repo/main/{}", path),
        "encoding": "base64",
        "content": base64::engine::general_purpose::STANDARD.encode(content),
    })
}

fn dir_json(path: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "name": name,
        "path": path,
        "type": "dir",
        "sha": format!("tree-{}", path),
        "size": 0,
        "url": api_url(path),
        "download_url": null,
    })
}

/// Content at `path` in a flat file map: an object for a file, an array for
/// a directory, `None` when nothing lives there. The root always exists.
pub fn content_json(files: &BTreeMap<String, Vec<u8>>, path: &str) -> Option<Value> {
    let path = path.trim_matches('/');

    if let Some(content) = files.get(path) {
        return Some(file_json(path, content));
    }

    let prefix = if path.is_empty() {
        String::new()
    } else {
        format!("{}/", path)
    };

    let mut children: BTreeMap<String, Value> = BTreeMap::new();
    for (key, content) in files.iter() {
        let Some(rest) = key.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((dir, _)) => {
                let child = format!("{}{}", prefix, dir);
                children.insert(child.clone(), dir_json(&child));
            }
            None => {
                let mut entry = file_json(key, content);
                if let Some(obj) = entry.as_object_mut() {
                    obj.remove("content");
                    obj.remove("encoding");
                }
                children.insert(key.clone(), entry);
            }
        }
    }

    if children.is_empty() && !path.is_empty() {
        return None;
    }
    Some(Value::Array(children.into_values().collect()))
}

// ============================================================================
// In-memory content store
// ============================================================================

/// Content store holding files in memory and recording every call.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    failure: Mutex<Option<StoreError>>,
    reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<FileWrite>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a file without recording a write.
    pub fn insert(&self, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_vec());
    }

    /// Make every subsequent call fail with `err`.
    pub fn fail_with(&self, err: StoreError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<FileWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get_content(&self, path: &str) -> Result<Value, StoreError> {
        self.reads.lock().unwrap().push(path.to_string());
        self.check_failure()?;

        let files = self.files.lock().unwrap();
        content_json(&files, path).ok_or_else(|| StoreError::NotFound("Not Found".to_string()))
    }

    async fn put_file(&self, write: &FileWrite) -> Result<Value, StoreError> {
        self.check_failure()?;
        self.writes.lock().unwrap().push(write.clone());

        let mut files = self.files.lock().unwrap();
        files.insert(write.path.clone(), write.content.clone());

        let mut content = file_json(&write.path, &write.content);
        if let Some(obj) = content.as_object_mut() {
            obj.remove("content");
            obj.remove("encoding");
        }
        Ok(json!({
            "content": content,
            "commit": { "message": write.message },
        }))
    }
}

/// Router for `config` over `store`, wrapped in an axum-test server.
pub fn test_server_with(store: Arc<dyn ContentStore>, config: &Config) -> TestServer {
    let gallery = GalleryService::new(store, RepositoryRef::from_config(&config.github));
    let router = create_router(Arc::new(AppState::new(gallery)), &config.server);
    TestServer::new(router).expect("Failed to create test server")
}

/// Test server with default configuration over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let server = test_server_with(store.clone(), &Config::default());
    (server, store)
}

// ============================================================================
// Fake GitHub contents API
// ============================================================================

/// State of the fake GitHub API.
#[derive(Default)]
pub struct FakeGitHub {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    /// `ref` query parameters seen on reads.
    pub refs: Mutex<Vec<String>>,
    /// JSON bodies of every write.
    pub puts: Mutex<Vec<Value>>,
    /// Requests that hit no contents route, as `"METHOD /path"`.
    pub stray: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn insert(&self, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_vec());
    }
}

fn github_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_TOKEN))
        .unwrap_or(false)
}

fn read_content(
    state: &FakeGitHub,
    path: &str,
    query: &HashMap<String, String>,
    headers: &HeaderMap,
) -> Response {
    if !authorized(headers) {
        return github_error(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    if path == "rate-limited" {
        return (
            StatusCode::FORBIDDEN,
            [("x-ratelimit-remaining", "0")],
            Json(json!({ "message": "API rate limit exceeded" })),
        )
            .into_response();
    }

    state
        .refs
        .lock()
        .unwrap()
        .push(query.get("ref").cloned().unwrap_or_default());

    let files = state.files.lock().unwrap();
    match content_json(&files, path) {
        Some(value) => Json(value).into_response(),
        None => github_error(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn get_root(
    State(state): State<Arc<FakeGitHub>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    read_content(&state, "", &query, &headers)
}

async fn get_path(
    State(state): State<Arc<FakeGitHub>>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    read_content(&state, &path, &query, &headers)
}

async fn put_path(
    State(state): State<Arc<FakeGitHub>>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return github_error(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    state.puts.lock().unwrap().push(body.clone());

    let Some(content) = body["content"]
        .as_str()
        .and_then(|c| base64::engine::general_purpose::STANDARD.decode(c).ok())
    else {
        return github_error(StatusCode::UNPROCESSABLE_ENTITY, "content is not valid Base64");
    };

    let mut files = state.files.lock().unwrap();
    let status = match files.get(&path) {
        Some(existing) => {
            let current_sha = file_json(&path, existing)["sha"].clone();
            if body.get("sha") != Some(&current_sha) {
                return github_error(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Invalid request.\n\n\"sha\" wasn't supplied.",
                );
            }
            StatusCode::OK
        }
        None => StatusCode::CREATED,
    };

    files.insert(path.clone(), content.clone());
    let mut stored = file_json(&path, &content);
    if let Some(obj) = stored.as_object_mut() {
        obj.remove("content");
        obj.remove("encoding");
    }

    (
        status,
        Json(json!({
            "content": stored,
            "commit": { "message": body["message"] },
        })),
    )
        .into_response()
}

async fn record_stray(
    State(state): State<Arc<FakeGitHub>>,
    method: Method,
    uri: Uri,
) -> Response {
    state
        .stray
        .lock()
        .unwrap()
        .push(format!("{} {}", method, uri.path()));
    github_error(StatusCode::NOT_FOUND, "Not Found")
}

/// Start the fake GitHub API on an ephemeral port.
pub async fn spawn_fake_github() -> (SocketAddr, Arc<FakeGitHub>) {
    let state = Arc::new(FakeGitHub::default());

    let router = Router::new()
        .route("/repos/:owner/:repo/contents", get(get_root))
        .route(
            "/repos/:owner/:repo/contents/*path",
            get(get_path).put(put_path),
        )
        .fallback(record_stray)
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake GitHub API");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, state)
}

/// Configuration pointing at the fake GitHub API.
pub fn fake_github_config(addr: SocketAddr) -> Config {
    let mut config = Config::default();
    config.github.owner = "owner".to_string();
    config.github.repo = "repo".to_string();
    config.github.token = TEST_TOKEN.to_string();
    config.github.api_base_url = format!("http://{}", addr);
    config.github.connect_timeout_secs = 2;
    config.github.timeout_secs = 5;
    config
}
