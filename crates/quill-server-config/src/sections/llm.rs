// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Completion provider configuration section.

use std::time::Duration;

use quill_common_http::Timeouts;
use quill_common_secret::SecretString;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// LLM configuration layer (for merging).
///
/// All fields are optional to support layered configuration from
/// multiple sources (defaults, files, environment).
#[derive(Clone, Default, Deserialize)]
pub struct LlmConfigLayer {
	#[serde(default)]
	pub api_key: Option<SecretString>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub model: Option<String>,
	#[serde(default)]
	pub connect_timeout_secs: Option<u64>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmConfigLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LlmConfigLayer")
			.field("api_key", &self.api_key)
			.field("base_url", &self.base_url)
			.field("model", &self.model)
			.field("connect_timeout_secs", &self.connect_timeout_secs)
			.field("request_timeout_secs", &self.request_timeout_secs)
			.finish()
	}
}

impl LlmConfigLayer {
	/// Merges another layer on top of this one.
	/// Values from `other` take precedence when present.
	pub fn merge(&mut self, other: LlmConfigLayer) {
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.model.is_some() {
			self.model = other.model;
		}
		if other.connect_timeout_secs.is_some() {
			self.connect_timeout_secs = other.connect_timeout_secs;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
	}

	/// Resolves this layer into a runtime configuration.
	pub fn finalize(self) -> LlmConfig {
		LlmConfig {
			api_key: self.api_key.filter(|key| !key.is_blank()),
			base_url: self
				.base_url
				.map(|url| url.trim_end_matches('/').to_string())
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
			connect_timeout_secs: self
				.connect_timeout_secs
				.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
			request_timeout_secs: self
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
		}
	}
}

/// Completion provider configuration (runtime).
#[derive(Clone, Debug)]
pub struct LlmConfig {
	/// Absent key is allowed: calls then degrade straight to the fallback.
	pub api_key: Option<SecretString>,
	pub base_url: String,
	pub model: String,
	pub connect_timeout_secs: u64,
	pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
	fn default() -> Self {
		LlmConfigLayer::default().finalize()
	}
}

impl LlmConfig {
	pub fn timeouts(&self) -> Timeouts {
		Timeouts {
			connect: Duration::from_secs(self.connect_timeout_secs),
			total: Duration::from_secs(self.request_timeout_secs),
		}
	}
}
