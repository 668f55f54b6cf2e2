// REST adapter tests: catalog broadcast, health probe, global credential
// update, and direct tool invocation over HTTP.

mod common;

use forgebridge::Dispatcher;
use forgebridge::application::registry;
use forgebridge::application::session::SessionManager;
use forgebridge::infrastructure::backend::HttpConnector;
use forgebridge::server;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_service(backend: SocketAddr, token: Option<&str>) -> SocketAddr {
    let credential = token.map(|token| common::credential(backend, token));
    let sessions = Arc::new(SessionManager::new(Arc::new(HttpConnector), credential));
    let dispatcher = Arc::new(Dispatcher::new(registry::catalog(), sessions));
    let app = server::app(dispatcher);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind service");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve");
    });
    addr
}

#[tokio::test]
async fn health_and_catalog_are_served_while_disconnected() {
    let backend = common::spawn_backend().await;
    let service = spawn_service(backend, None).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("http://{service}/health"))
        .send()
        .await
        .expect("health request")
        .json()
        .await
        .expect("health body");
    assert_eq!(health["status"], json!("ok"));
    assert_eq!(health["connected"], json!(false));
    assert!(health.get("endpoint").is_none());

    let first: Value = client
        .get(format!("http://{service}/tools"))
        .send()
        .await
        .expect("catalog request")
        .json()
        .await
        .expect("catalog body");
    let tools = first["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 10);
    assert_eq!(tools[0]["name"], json!("set_credentials"));
    assert_eq!(
        tools[0]["inputContract"][0]["key"],
        json!("endpointUrl")
    );

    // Catalog listing is deterministic across calls.
    let second: Value = client
        .get(format!("http://{service}/tools"))
        .send()
        .await
        .expect("catalog request")
        .json()
        .await
        .expect("catalog body");
    assert_eq!(first, second);
}

#[tokio::test]
async fn auth_endpoint_replaces_credentials_globally() {
    let backend = common::spawn_backend().await;
    let service = spawn_service(backend, None).await;
    let client = reqwest::Client::new();

    let rejected = client
        .post(format!("http://{service}/auth"))
        .json(&json!({
            "endpointUrl": format!("http://{backend}"),
            "secretToken": "stale-token"
        }))
        .send()
        .await
        .expect("auth request");
    assert_eq!(rejected.status(), reqwest::StatusCode::UNAUTHORIZED);

    let accepted = client
        .post(format!("http://{service}/auth"))
        .json(&json!({
            "endpointUrl": format!("http://{backend}"),
            "secretToken": common::GOOD_TOKEN
        }))
        .send()
        .await
        .expect("auth request");
    assert_eq!(accepted.status(), reqwest::StatusCode::OK);
    let body: Value = accepted.json().await.expect("auth body");
    assert_eq!(body["connected"], json!(true));

    let health: Value = client
        .get(format!("http://{service}/health"))
        .send()
        .await
        .expect("health request")
        .json()
        .await
        .expect("health body");
    assert_eq!(health["connected"], json!(true));
    assert_eq!(
        health["endpoint"]["endpointUrl"],
        json!(format!("http://{backend}"))
    );
}

#[tokio::test]
async fn invocation_endpoint_returns_envelopes_for_success_and_failure() {
    let backend = common::spawn_backend().await;
    let service = spawn_service(backend, Some(common::GOOD_TOKEN)).await;
    let client = reqwest::Client::new();

    let success = client
        .post(format!("http://{service}/tools/create_work_item"))
        .json(&json!({ "project": "P", "type": "Task", "title": "T" }))
        .send()
        .await
        .expect("invoke request");
    assert_eq!(success.status(), reqwest::StatusCode::OK);
    let body: Value = success.json().await.expect("invoke body");
    assert!(body.get("isError").is_none());
    let text = body["content"][0]["text"].as_str().expect("text chunk");
    assert!(text.contains("#101"));
    assert!(text.contains("T"));

    let failure: Value = client
        .post(format!("http://{service}/tools/create_work_item"))
        .json(&json!({}))
        .send()
        .await
        .expect("invoke request")
        .json()
        .await
        .expect("invoke body");
    assert_eq!(failure["isError"], json!(true));
    let text = failure["content"][0]["text"].as_str().expect("text chunk");
    assert!(text.contains("project"));
}

#[tokio::test]
async fn unknown_tool_and_missing_body_still_produce_envelopes() {
    let backend = common::spawn_backend().await;
    let service = spawn_service(backend, Some(common::GOOD_TOKEN)).await;
    let client = reqwest::Client::new();

    let unknown: Value = client
        .post(format!("http://{service}/tools/not_a_tool"))
        .json(&json!({}))
        .send()
        .await
        .expect("invoke request")
        .json()
        .await
        .expect("invoke body");
    assert_eq!(unknown["isError"], json!(true));
    assert!(
        unknown["content"][0]["text"]
            .as_str()
            .expect("text chunk")
            .contains("unknown tool")
    );

    // No body at all: the validator reports the arguments as missing.
    let bodyless: Value = client
        .post(format!("http://{service}/tools/list_projects"))
        .send()
        .await
        .expect("invoke request")
        .json()
        .await
        .expect("invoke body");
    assert_eq!(bodyless["isError"], json!(true));
    assert!(
        bodyless["content"][0]["text"]
            .as_str()
            .expect("text chunk")
            .contains("JSON object")
    );
}
