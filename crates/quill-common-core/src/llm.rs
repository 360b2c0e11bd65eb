// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Provider-neutral completion request/response types and the client trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::message::Message;

/// Request to send to an LLM for completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
	pub model: String,
	pub messages: Vec<Message>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_tokens: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<f32>,
}

impl LlmRequest {
	pub fn new(model: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			messages: Vec::new(),
			max_tokens: None,
			temperature: None,
		}
	}

	pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
		self.messages = messages;
		self
	}

	pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
		self.max_tokens = Some(max_tokens);
		self
	}

	pub fn with_temperature(mut self, temperature: f32) -> Self {
		self.temperature = Some(temperature);
		self
	}
}

/// Response from an LLM completion request.
#[derive(Clone, Debug)]
pub struct LlmResponse {
	pub message: Message,
	pub usage: Option<Usage>,
	pub finish_reason: Option<String>,
}

impl LlmResponse {
	/// The raw completion text. Untrusted: it may or may not contain JSON.
	pub fn content(&self) -> &str {
		&self.message.content
	}
}

/// Token usage statistics from an LLM request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
	pub input_tokens: u32,
	pub output_tokens: u32,
}

/// A single-shot completion backend.
///
/// Implementations must not retry on their own; callers own the retry
/// policy because they validate the output inside the retry loop.
#[async_trait]
pub trait LlmClient: Send + Sync {
	async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn optional_fields_are_omitted() {
		let request = LlmRequest::new("deepseek-chat").with_messages(vec![Message::user("hi")]);
		let json = serde_json::to_value(&request).unwrap();
		assert!(json.get("temperature").is_none());
		assert!(json.get("max_tokens").is_none());
	}

	#[test]
	fn builder_sets_sampling_fields() {
		let request = LlmRequest::new("deepseek-chat")
			.with_temperature(0.7)
			.with_max_tokens(512);
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["model"], "deepseek-chat");
		assert_eq!(json["max_tokens"], 512);
		assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
	}
}
