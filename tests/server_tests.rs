//! HTTP surface, served in-process.
#![cfg(feature = "server")]

mod common;

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{all_credentials, offline_dispatcher, MockProvider};
use quill::dispatch::Dispatcher;
use quill::models::{ModelRegistry, ProviderKind};
use quill::server::{create_router, AppState};

async fn spawn(dispatcher: Dispatcher) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::new(dispatcher));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn post(addr: SocketAddr, route: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}{route}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn get(addr: SocketAddr, route: &str) -> Value {
    reqwest::get(format!("http://{addr}{route}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn sentiment_route_returns_normalized_result() {
    let addr = spawn(offline_dispatcher()).await;
    let (status, body) = post(
        addr,
        "/api/ai/sentiment",
        json!({"text": "I am so happy and excited today!"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["result"],
        "Sentiment: Positive - Your journal entry reflects a positive emotional tone."
    );
    assert_eq!(body["task_type"], "sentiment");
    assert_eq!(body["confidence"], 0.75);
    assert_eq!(body["metadata"]["model"], "fallback-analysis");
    assert_eq!(body["metadata"]["source"], "fallback");
    assert_eq!(body["metadata"]["sentiment"], "positive");
    assert_eq!(body["metadata"]["word_count"], 7);
    assert!(body["metadata"]["request_id"].is_string());
    assert!(body["metadata"]["timestamp"].is_string());
}

#[tokio::test]
async fn path_decides_task_over_body() {
    let addr = spawn(offline_dispatcher()).await;
    let (status, body) = post(
        addr,
        "/api/ai/summarize",
        json!({"text": "One. Two. Three.", "task_type": "sentiment"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["task_type"], "summarize");
    assert_eq!(body["result"], "Summary: One. Three");
    assert_eq!(body["metadata"]["original_length"], 3);
}

#[tokio::test]
async fn insights_route_uses_requested_model() {
    let groq = MockProvider::replying(
        ProviderKind::Groq,
        "You show steady growth and real gratitude toward your family.",
    );
    let dispatcher = Dispatcher::builder()
        .credentials(all_credentials())
        .adapter(groq.clone())
        .build();
    let addr = spawn(dispatcher).await;

    let (status, body) = post(
        addr,
        "/api/ai/insights",
        json!({"text": "Dinner with my parents.", "model": "groq-llama3-70b"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["metadata"]["source"], "remote");
    assert_eq!(body["metadata"]["model"], "groq-llama3-70b");
    assert_eq!(body["metadata"]["remote_model"], "llama-3.3-70b-versatile");
    assert_eq!(
        body["metadata"]["themes"],
        json!(["growth", "relationships", "gratitude"])
    );
    assert_eq!(groq.calls(), 1);
}

#[tokio::test]
async fn process_route_reads_task_type() {
    let addr = spawn(offline_dispatcher()).await;
    let (status, body) = post(
        addr,
        "/api/ai/process",
        json!({"text": "A calm walk.", "task_type": "Summary"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["task_type"], "summarize");
}

#[tokio::test]
async fn malformed_requests_are_rejected() {
    let addr = spawn(offline_dispatcher()).await;

    let cases = [
        ("/api/ai/sentiment", json!({}), "bad_request"),
        ("/api/ai/sentiment", json!({"text": "   "}), "bad_request"),
        ("/api/ai/insights", json!({"text": 42}), "invalid_json"),
        ("/api/ai/process", json!({"text": "hello"}), "bad_request"),
        (
            "/api/ai/process",
            json!({"text": "hello", "task_type": "translate"}),
            "bad_request",
        ),
    ];
    for (route, payload, code) in cases {
        let (status, body) = post(addr, route, payload.clone()).await;
        assert_eq!(status, 400, "{route} {payload}");
        assert_eq!(body["error"], code, "{route} {payload}");
        assert!(body["message"].is_string(), "{route} {payload}");
    }

    let (_, body) = post(addr, "/api/ai/summarize", json!({"text": ""})).await;
    assert_eq!(body["message"], "field `text` must not be empty");
}

#[tokio::test]
async fn unparseable_json_is_rejected() {
    let addr = spawn(offline_dispatcher()).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/ai/sentiment"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid_json");
}

#[tokio::test]
async fn models_route_lists_registry() {
    let dispatcher = Dispatcher::builder()
        .credentials(all_credentials())
        .adapter(MockProvider::replying(ProviderKind::HuggingFace, "unused reply"))
        .build();
    let addr = spawn(dispatcher).await;
    let body = get(addr, "/api/ai/models").await;

    assert_eq!(body["default_model"], "groq-llama3-8b");
    assert_eq!(body["providers"], json!({"groq": false, "huggingface": true}));

    let registry = ModelRegistry::builtin();
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), registry.len());
    for model in models {
        let id = model["id"].as_str().unwrap();
        let descriptor = registry.get(id).unwrap();
        assert_eq!(model["provider"], descriptor.provider.as_str());
        assert_eq!(model["remote_name"], descriptor.remote_name.as_str());
        assert_eq!(
            model["available"],
            descriptor.provider == ProviderKind::HuggingFace
        );
    }
}

#[tokio::test]
async fn banner_and_health() {
    let addr = spawn(offline_dispatcher()).await;

    let banner = get(addr, "/").await;
    assert_eq!(banner["status"], "running");
    assert_eq!(banner["groq_connected"], false);
    assert_eq!(banner["hf_connected"], false);

    let health = get(addr, "/health").await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "quill");
    assert!(health["timestamp"].is_string());
}
