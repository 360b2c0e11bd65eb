// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! DeepSeek API client implementation.

use async_trait::async_trait;
use quill_common_core::{LlmClient, LlmError, LlmRequest, LlmResponse};
use quill_common_secret::SecretString;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::types::{DeepSeekConfig, DeepSeekError, DeepSeekRequest, DeepSeekResponse};

/// DeepSeek API client.
///
/// Holds one pooled HTTP client for the lifetime of the process. Each
/// `complete` call is exactly one POST; nothing here retries.
pub struct DeepSeekClient {
	config: DeepSeekConfig,
	http_client: Client,
}

impl DeepSeekClient {
	pub fn new(config: DeepSeekConfig) -> Result<Self, LlmError> {
		let http_client = quill_common_http::builder_with_timeouts(config.timeouts())
			.build()
			.map_err(|e| LlmError::Http(e.to_string()))?;

		if config.api_key.is_none() {
			warn!("DeepSeek client created without an API key; completions will not be attempted");
		}

		info!(
				model = %config.model,
				base_url = %config.base_url,
				connect_timeout_ms = config.connect_timeout.as_millis() as u64,
				request_timeout_ms = config.request_timeout.as_millis() as u64,
				"Initialized DeepSeek client"
		);

		Ok(Self {
			config,
			http_client,
		})
	}

	pub fn config(&self) -> &DeepSeekConfig {
		&self.config
	}

	fn build_request(&self, request: &LlmRequest, api_key: &SecretString) -> reqwest::RequestBuilder {
		let wire = DeepSeekRequest::from_llm_request(request, &self.config.model);
		let url = self.config.completions_url();

		trace!(
				url = %url,
				model = %wire.model,
				message_count = wire.messages.len(),
				temperature = ?wire.temperature,
				"Building DeepSeek request"
		);

		self.http_client
			.post(&url)
			.header("Content-Type", "application/json")
			.header("Authorization", format!("Bearer {}", api_key.expose()))
			.json(&wire)
	}

	async fn handle_error_response(&self, response: reqwest::Response) -> LlmError {
		let status = response.status();
		let status_code = status.as_u16();

		debug!(status = %status, "Received error response from DeepSeek");

		if status == StatusCode::REQUEST_TIMEOUT {
			return LlmError::Timeout;
		}

		if status == StatusCode::TOO_MANY_REQUESTS {
			let retry_after = response
				.headers()
				.get("retry-after")
				.and_then(|v| v.to_str().ok())
				.and_then(|v| v.trim().parse().ok());

			return LlmError::RateLimited {
				retry_after_secs: retry_after,
			};
		}

		if status.is_server_error() {
			return LlmError::ServerError {
				status: status_code,
			};
		}

		let message = match response.text().await {
			Ok(body) => match serde_json::from_str::<DeepSeekError>(&body) {
				Ok(err) => {
					error!(
							error_type = ?err.error.error_type,
							code = ?err.error.code,
							message = %err.error.message,
							"DeepSeek API error"
					);
					err.error.message
				}
				Err(_) => format!("HTTP {status}"),
			},
			Err(e) => {
				error!(status = %status, error = %e, "Failed to read DeepSeek error body");
				format!("HTTP {status}")
			}
		};

		LlmError::Api {
			status: status_code,
			message,
		}
	}
}

fn transport_error(e: reqwest::Error) -> LlmError {
	if e.is_timeout() {
		LlmError::Timeout
	} else {
		LlmError::Http(e.to_string())
	}
}

#[async_trait]
impl LlmClient for DeepSeekClient {
	#[instrument(skip(self, request), fields(model = %self.config.model))]
	async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
		let Some(api_key) = self.config.api_key.as_ref() else {
			debug!("skipping completion: no API key configured");
			return Err(LlmError::NotConfigured);
		};

		debug!(
			message_count = request.messages.len(),
			"Starting completion request"
		);

		let response = self
			.build_request(&request, api_key)
			.send()
			.await
			.map_err(transport_error)?;

		if !response.status().is_success() {
			return Err(self.handle_error_response(response).await);
		}

		let body = response.text().await.map_err(transport_error)?;
		let wire: DeepSeekResponse = serde_json::from_str(&body)
			.map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

		trace!(
				response_id = %wire.id,
				model = %wire.model,
				"Received DeepSeek response"
		);

		let response = LlmResponse::try_from(wire)?;

		info!(
				content_len = response.content().len(),
				input_tokens = response.usage.as_ref().map(|u| u.input_tokens).unwrap_or(0),
				output_tokens = response.usage.as_ref().map(|u| u.output_tokens).unwrap_or(0),
				finish_reason = ?response.finish_reason,
				"Completion request successful"
		);

		Ok(response)
	}
}
