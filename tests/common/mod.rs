#![allow(dead_code)]

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use forgebridge::types::SessionCredential;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub const GOOD_TOKEN: &str = "good-token";

/// Loopback stand-in for the tracker API, speaking the collection-envelope
/// shapes the backend sub-clients expect.
pub async fn spawn_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    let router = backend_router();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("serve fake backend");
    });
    addr
}

pub fn credential(backend: SocketAddr, token: &str) -> SessionCredential {
    SessionCredential {
        endpoint_url: format!("http://{backend}"),
        secret_token: token.to_string(),
        default_scope: None,
    }
}

fn backend_router() -> Router {
    Router::new()
        .route("/_apis/session", get(session_probe))
        .route("/_apis/projects", get(list_projects))
        .route(
            "/_apis/work-items/{id}",
            get(get_work_item).patch(update_work_item),
        )
        .route(
            "/{project}/_apis/work-items",
            get(list_work_items).post(create_work_item),
        )
        .route("/{project}/_apis/builds", get(list_builds).post(queue_build))
        .route("/{project}/_apis/repositories", get(list_repositories))
        .route(
            "/{project}/_apis/repositories/{repo}/pull-requests",
            get(list_pull_requests),
        )
}

fn expected_auth() -> String {
    format!("Basic {}", STANDARD.encode(format!(":{GOOD_TOKEN}")))
}

async fn session_probe(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let supplied = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    if supplied == Some(expected_auth().as_str()) {
        (StatusCode::OK, Json(json!({ "authenticated": true })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid token" })),
        )
    }
}

async fn list_projects() -> Json<Value> {
    Json(json!({
        "count": 2,
        "value": [
            { "id": "p1", "name": "Fabrikam", "description": "Main product" },
            { "id": "p2", "name": "Tailwind" }
        ]
    }))
}

async fn list_work_items(Path(_project): Path<String>) -> Json<Value> {
    Json(json!({ "count": 0, "value": [] }))
}

async fn create_work_item(Path(_project): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": 101,
        "title": body.get("title").cloned().unwrap_or(Value::Null),
        "type": body.get("type").cloned().unwrap_or(Value::Null),
        "state": "New"
    }))
}

async fn get_work_item(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 42 {
        (
            StatusCode::OK,
            Json(json!({
                "id": 42,
                "title": "Fix login redirect",
                "type": "Bug",
                "state": "Active",
                "assignedTo": "casey@example.com",
                "description": "Redirect loops on expired sessions.",
                "changedDate": "2026-08-01T09:30:00Z"
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("work item {id} not found") })),
        )
    }
}

async fn update_work_item(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": id,
        "title": body.get("title").cloned().unwrap_or(json!("Fix login redirect")),
        "type": "Bug",
        "state": body.get("state").cloned().unwrap_or(json!("Active"))
    }))
}

async fn list_builds(Path(_project): Path<String>) -> Json<Value> {
    Json(json!({
        "count": 1,
        "value": [{
            "id": 9001,
            "buildNumber": "20260806.2",
            "status": "completed",
            "result": "succeeded",
            "definition": { "id": 7, "name": "CI" },
            "queueTime": "2026-08-06T11:15:00Z"
        }]
    }))
}

async fn queue_build(Path(_project): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    let definition = body
        .get("definition")
        .and_then(|d| d.get("id"))
        .cloned()
        .unwrap_or(Value::Null);
    Json(json!({
        "id": 9002,
        "buildNumber": "20260807.1",
        "status": "notStarted",
        "definition": { "id": definition, "name": "CI" }
    }))
}

async fn list_repositories(Path(_project): Path<String>) -> Json<Value> {
    Json(json!({
        "count": 1,
        "value": [{
            "id": "r1",
            "name": "fabrikam-app",
            "defaultBranch": "refs/heads/main",
            "webUrl": "http://tracker.example.com/fabrikam-app"
        }]
    }))
}

async fn list_pull_requests(Path((_project, _repo)): Path<(String, String)>) -> Json<Value> {
    Json(json!({ "count": 0, "value": [] }))
}
