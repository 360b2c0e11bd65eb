// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Router and shared state.

use std::sync::Arc;

use axum::{
	http::HeaderValue,
	middleware,
	routing::{get, post},
	Router,
};
use quill_common_core::LlmError;
use quill_server_config::{CorsConfig, ServerConfig};
use quill_server_feedback::FeedbackService;
use quill_server_llm_deepseek::{DeepSeekClient, DeepSeekConfig};
use tower_http::{
	catch_panic::CatchPanicLayer,
	cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
	trace::TraceLayer,
};

use crate::{
	correlation::{correlation_layer, CORRELATION_HEADER},
	error::handle_panic,
	routes,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub feedback: FeedbackService,
}

impl AppState {
	pub fn new(feedback: FeedbackService) -> Self {
		Self { feedback }
	}
}

/// Build the DeepSeek-backed state from configuration.
pub fn create_app_state(config: &ServerConfig) -> Result<AppState, LlmError> {
	let mut deepseek = DeepSeekConfig::default()
		.with_base_url(config.llm.base_url.clone())
		.with_model(config.llm.model.clone())
		.with_timeouts(config.llm.timeouts());
	if let Some(key) = config.llm.api_key.clone() {
		deepseek = deepseek.with_api_key(key);
	}

	let client = DeepSeekClient::new(deepseek)?;
	let feedback = FeedbackService::new(
		Arc::new(client),
		config.llm.model.clone(),
		config.retry.to_retry_config(),
	);

	Ok(AppState::new(feedback))
}

/// CORS for the configured origins. Credentials rule out `*`, so methods and
/// headers are mirrored from the preflight instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
	let origins: Vec<HeaderValue> = config
		.allowed_origins
		.iter()
		.filter_map(|origin| {
			if origin == "*" {
				tracing::warn!("ignoring wildcard CORS origin; list origins explicitly");
				return None;
			}
			match HeaderValue::from_str(origin) {
				Ok(value) => Some(value),
				Err(_) => {
					tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
					None
				}
			}
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods(AllowMethods::mirror_request())
		.allow_headers(AllowHeaders::mirror_request())
		.allow_credentials(config.allow_credentials)
		.expose_headers([CORRELATION_HEADER])
}

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/analyze", post(routes::feedback::analyze))
		.route("/generate", post(routes::feedback::generate))
		.fallback(routes::not_found)
		.method_not_allowed_fallback(routes::method_not_allowed)
		.with_state(state)
		.layer(CatchPanicLayer::custom(handle_panic))
		.layer(TraceLayer::new_for_http())
		.layer(cors_layer(cors))
		.layer(middleware::from_fn(correlation_layer))
}
