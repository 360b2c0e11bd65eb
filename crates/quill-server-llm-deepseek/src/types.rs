// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! DeepSeek-specific API types and conversions.

use std::time::Duration;

use quill_common_core::{LlmError, LlmRequest, LlmResponse, Message, Role, Usage};
use quill_common_http::Timeouts;
use quill_common_secret::SecretString;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Configuration for the DeepSeek client.
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
	pub api_key: Option<SecretString>,
	pub base_url: String,
	pub model: String,
	pub connect_timeout: Duration,
	pub request_timeout: Duration,
}

impl Default for DeepSeekConfig {
	fn default() -> Self {
		let timeouts = Timeouts::default();
		Self {
			api_key: None,
			base_url: DEFAULT_BASE_URL.to_string(),
			model: DEFAULT_MODEL.to_string(),
			connect_timeout: timeouts.connect,
			request_timeout: timeouts.total,
		}
	}
}

impl DeepSeekConfig {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self::default().with_api_key(SecretString::new(api_key.into()))
	}

	pub fn with_api_key(mut self, api_key: SecretString) -> Self {
		self.api_key = Some(api_key).filter(|k| !k.is_blank());
		self
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into().trim_end_matches('/').to_string();
		self
	}

	pub fn with_model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
		self.connect_timeout = timeouts.connect;
		self.request_timeout = timeouts.total;
		self
	}

	pub fn timeouts(&self) -> Timeouts {
		Timeouts {
			connect: self.connect_timeout,
			total: self.request_timeout,
		}
	}

	pub fn completions_url(&self) -> String {
		format!("{}/chat/completions", self.base_url)
	}
}

/// DeepSeek chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct DeepSeekRequest {
	pub model: String,
	pub messages: Vec<DeepSeekMessage>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_tokens: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<f32>,
	pub stream: bool,
}

impl DeepSeekRequest {
	/// An empty request model falls back to the configured one.
	pub fn from_llm_request(request: &LlmRequest, default_model: &str) -> Self {
		let model = if request.model.is_empty() {
			default_model.to_string()
		} else {
			request.model.clone()
		};

		Self {
			model,
			messages: request.messages.iter().map(DeepSeekMessage::from).collect(),
			max_tokens: request.max_tokens,
			temperature: request.temperature,
			stream: false,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekMessage {
	pub role: String,
	#[serde(default)]
	pub content: Option<String>,
}

impl From<&Message> for DeepSeekMessage {
	fn from(message: &Message) -> Self {
		Self {
			role: message.role.as_str().to_string(),
			content: Some(message.content.clone()),
		}
	}
}

/// DeepSeek chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekResponse {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub model: String,
	pub choices: Vec<DeepSeekChoice>,
	#[serde(default)]
	pub usage: Option<DeepSeekUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekChoice {
	#[serde(default)]
	pub index: u32,
	pub message: DeepSeekMessage,
	#[serde(default)]
	pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekUsage {
	pub prompt_tokens: u32,
	pub completion_tokens: u32,
	#[serde(default)]
	pub total_tokens: u32,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekError {
	pub error: DeepSeekErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekErrorDetail {
	pub message: String,
	#[serde(rename = "type", default)]
	pub error_type: Option<String>,
	#[serde(default)]
	pub code: Option<String>,
}

impl TryFrom<DeepSeekResponse> for LlmResponse {
	type Error = LlmError;

	fn try_from(response: DeepSeekResponse) -> Result<Self, Self::Error> {
		let choice = response
			.choices
			.into_iter()
			.next()
			.ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))?;

		let content = choice.message.content.ok_or_else(|| {
			LlmError::InvalidResponse("first choice has no message content".to_string())
		})?;

		Ok(LlmResponse {
			message: Message {
				role: Role::Assistant,
				content,
			},
			usage: response.usage.map(|u| Usage {
				input_tokens: u.prompt_tokens,
				output_tokens: u.completion_tokens,
			}),
			finish_reason: choice.finish_reason,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = DeepSeekConfig::default();
		assert!(config.api_key.is_none());
		assert_eq!(config.completions_url(), "https://api.deepseek.com/v1/chat/completions");
		assert_eq!(config.model, "deepseek-chat");
		assert_eq!(config.connect_timeout, Duration::from_secs(10));
		assert_eq!(config.request_timeout, Duration::from_secs(60));
	}

	#[test]
	fn blank_key_is_dropped() {
		let config = DeepSeekConfig::new("  ");
		assert!(config.api_key.is_none());
	}

	#[test]
	fn request_uses_default_model_when_unset() {
		let request = LlmRequest::new("").with_messages(vec![
			Message::system("You are a helpful assistant."),
			Message::user("hi"),
		]);
		let wire = DeepSeekRequest::from_llm_request(&request, "deepseek-chat");
		let json = serde_json::to_value(&wire).unwrap();

		assert_eq!(json["model"], "deepseek-chat");
		assert_eq!(json["messages"][0]["role"], "system");
		assert_eq!(json["messages"][1]["content"], "hi");
		assert!(json.get("temperature").is_none());
		assert_eq!(json["stream"], false);
	}

	#[test]
	fn response_without_choices_is_invalid() {
		let response: DeepSeekResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
		let err = LlmResponse::try_from(response).unwrap_err();
		assert!(matches!(err, LlmError::InvalidResponse(_)));
	}

	#[test]
	fn response_maps_usage() {
		let response: DeepSeekResponse = serde_json::from_str(
			r#"{
				"id": "abc",
				"model": "deepseek-chat",
				"choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}, "finish_reason": "stop"}],
				"usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
			}"#,
		)
		.unwrap();
		let llm = LlmResponse::try_from(response).unwrap();
		assert_eq!(llm.content(), "{}");
		assert_eq!(llm.usage.unwrap().output_tokens, 3);
		assert_eq!(llm.finish_reason.as_deref(), Some("stop"));
	}
}
