// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the completion API.
#[derive(Clone, Error, Debug, PartialEq)]
pub enum LlmError {
	/// Connection or transport failure before a response arrived.
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Request timed out")]
	Timeout,

	/// The provider answered with a 5xx status.
	#[error("Server error: HTTP {status}")]
	ServerError { status: u16 },

	#[error("Rate limited: retry after {retry_after_secs:?} seconds")]
	RateLimited { retry_after_secs: Option<u64> },

	/// The provider rejected the request (4xx other than 408/429).
	#[error("API error (HTTP {status}): {message}")]
	Api { status: u16, message: String },

	/// The body could not be decoded or carried no completion text.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	#[error("No API key configured for the completion provider")]
	NotConfigured,
}

impl LlmError {
	/// Whether repeating the same request may succeed.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			LlmError::Http(_)
				| LlmError::Timeout
				| LlmError::ServerError { .. }
				| LlmError::RateLimited { .. }
				| LlmError::InvalidResponse(_)
		)
	}

	/// Wait requested by the provider through `Retry-After`, if any.
	pub fn retry_after(&self) -> Option<Duration> {
		match self {
			LlmError::RateLimited {
				retry_after_secs: Some(secs),
			} => Some(Duration::from_secs(*secs)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transient_errors_are_retryable() {
		assert!(LlmError::Timeout.is_retryable());
		assert!(LlmError::Http("connection reset".into()).is_retryable());
		assert!(LlmError::ServerError { status: 503 }.is_retryable());
		assert!(LlmError::RateLimited {
			retry_after_secs: Some(2)
		}
		.is_retryable());
		assert!(LlmError::InvalidResponse("missing choices".into()).is_retryable());
	}

	#[test]
	fn rejections_are_not_retryable() {
		assert!(!LlmError::Api {
			status: 401,
			message: "bad key".into()
		}
		.is_retryable());
		assert!(!LlmError::NotConfigured.is_retryable());
	}

	#[test]
	fn only_rate_limits_carry_a_wait() {
		let limited = LlmError::RateLimited {
			retry_after_secs: Some(7),
		};
		assert_eq!(limited.retry_after(), Some(Duration::from_secs(7)));
		assert_eq!(
			LlmError::RateLimited {
				retry_after_secs: None
			}
			.retry_after(),
			None
		);
		assert_eq!(LlmError::Timeout.retry_after(), None);
	}
}
