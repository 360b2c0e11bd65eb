// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client builder with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Per-call timeout budget for outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
	/// Time allowed to establish the TCP/TLS connection.
	pub connect: Duration,
	/// Time allowed for the whole request, connection included.
	pub total: Duration,
}

impl Default for Timeouts {
	fn default() -> Self {
		Self {
			connect: Duration::from_secs(10),
			total: Duration::from_secs(60),
		}
	}
}

/// Creates a client builder with the standard Quill User-Agent header.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client builder with the User-Agent and the given timeouts applied.
///
/// # Example
/// ```ignore
/// let client = quill_common_http::builder_with_timeouts(Timeouts::default()).build()?;
/// ```
pub fn builder_with_timeouts(timeouts: Timeouts) -> ClientBuilder {
	builder()
		.connect_timeout(timeouts.connect)
		.timeout(timeouts.total)
}

/// Returns the standard Quill User-Agent string.
///
/// Format: `quill/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"quill/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
