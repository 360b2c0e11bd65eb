// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Retry policy for completion calls.

use std::time::Duration;

use quill_common_http::RetryConfig;
use serde::Deserialize;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
pub const DEFAULT_DEADLINE_SECS: u64 = 150;

/// Retry settings (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
	pub max_attempts: u32,
	pub base_delay_ms: u64,
	pub max_delay_ms: u64,
	pub backoff_factor: f64,
	pub jitter: bool,
	/// `0` disables the deadline.
	pub deadline_secs: u64,
}

impl Default for RetrySettings {
	fn default() -> Self {
		RetryConfigLayer::default().finalize()
	}
}

impl RetrySettings {
	pub fn to_retry_config(&self) -> RetryConfig {
		RetryConfig {
			max_attempts: self.max_attempts,
			base_delay: Duration::from_millis(self.base_delay_ms),
			max_delay: Duration::from_millis(self.max_delay_ms),
			backoff_factor: self.backoff_factor,
			jitter: self.jitter,
			deadline: (self.deadline_secs > 0).then(|| Duration::from_secs(self.deadline_secs)),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetryConfigLayer {
	#[serde(default)]
	pub max_attempts: Option<u32>,
	#[serde(default)]
	pub base_delay_ms: Option<u64>,
	#[serde(default)]
	pub max_delay_ms: Option<u64>,
	#[serde(default)]
	pub backoff_factor: Option<f64>,
	#[serde(default)]
	pub jitter: Option<bool>,
	#[serde(default)]
	pub deadline_secs: Option<u64>,
}

impl RetryConfigLayer {
	pub fn merge(&mut self, other: RetryConfigLayer) {
		if other.max_attempts.is_some() {
			self.max_attempts = other.max_attempts;
		}
		if other.base_delay_ms.is_some() {
			self.base_delay_ms = other.base_delay_ms;
		}
		if other.max_delay_ms.is_some() {
			self.max_delay_ms = other.max_delay_ms;
		}
		if other.backoff_factor.is_some() {
			self.backoff_factor = other.backoff_factor;
		}
		if other.jitter.is_some() {
			self.jitter = other.jitter;
		}
		if other.deadline_secs.is_some() {
			self.deadline_secs = other.deadline_secs;
		}
	}

	pub fn finalize(self) -> RetrySettings {
		RetrySettings {
			max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
			base_delay_ms: self.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS),
			max_delay_ms: self.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS),
			backoff_factor: self.backoff_factor.unwrap_or(DEFAULT_BACKOFF_FACTOR),
			jitter: self.jitter.unwrap_or(false),
			deadline_secs: self.deadline_secs.unwrap_or(DEFAULT_DEADLINE_SECS),
		}
	}
}
