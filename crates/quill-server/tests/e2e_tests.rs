// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests: router, feedback flows and the real DeepSeek client
//! against a mock completion API.

use axum::{
	body::{to_bytes, Body},
	http::{Request, StatusCode},
	Router,
};
use quill_common_secret::SecretString;
use quill_server::{create_app_state, create_router};
use quill_server_config::{
	finalize, LlmConfigLayer, RetryConfigLayer, ServerConfig, ServerConfigLayer,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, api_key: Option<&str>) -> ServerConfig {
	finalize(ServerConfigLayer {
		llm: Some(LlmConfigLayer {
			api_key: api_key.map(|k| SecretString::new(k.to_string())),
			base_url: Some(server.uri()),
			..Default::default()
		}),
		retry: Some(RetryConfigLayer {
			base_delay_ms: Some(0),
			max_delay_ms: Some(0),
			..Default::default()
		}),
		..Default::default()
	})
	.unwrap()
}

fn app_for(config: &ServerConfig) -> Router {
	let state = create_app_state(config).unwrap();
	create_router(state, &config.cors)
}

fn completion(content: &str) -> Value {
	json!({
		"id": "chatcmpl-1",
		"model": "deepseek-chat",
		"choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
	})
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header("content-type", "application/json")
				.body(Body::from(body.to_string()))
				.unwrap(),
		)
		.await
		.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	(status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn analyze_through_real_client() {
	let server = MockServer::start().await;
	let content = "```json\n{\"suggestions\": [\"Vary rhythm\", \"Cut filler\", \"Be concrete\", \"Extra\"], \"tone\": \"positive\", \"alternative_text\": \"Better.\"}\n```";
	Mock::given(method("POST"))
		.and(path("/chat/completions"))
		.respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
		.expect(1)
		.mount(&server)
		.await;

	let config = config_for(&server, Some("sk-test"));
	let (status, body) = post(app_for(&config), "/analyze", json!({"text": "Good text."})).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body["suggestions"],
		json!(["Vary rhythm", "Cut filler", "Be concrete"])
	);
	assert_eq!(body["tone"], "positive");

	let requests = server.received_requests().await.unwrap();
	let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
	assert_eq!(sent["model"], "deepseek-chat");
	assert!((sent["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
	assert_eq!(sent["messages"][0]["content"], "You are a helpful assistant.");
}

#[tokio::test]
async fn generate_server_errors_exhaust_to_original() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(500))
		.expect(3)
		.mount(&server)
		.await;

	let config = config_for(&server, Some("sk-test"));
	let (status, body) = post(
		app_for(&config),
		"/generate",
		json!({
			"text": "Keep me as I am.",
			"suggestions": ["A"],
			"selected_suggestions": [true]
		}),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["generated_text"], "Keep me as I am.");
}

#[tokio::test]
async fn missing_api_key_serves_fallback_without_calling_out() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
		.expect(0)
		.mount(&server)
		.await;

	let config = config_for(&server, None);
	let (status, body) = post(app_for(&config), "/analyze", json!({"text": "Some text."})).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body["suggestions"],
		json!(["Shorten long sentences", "Use more active verbs"])
	);
	assert_eq!(body["alternative_text"], "Some text.");
}
