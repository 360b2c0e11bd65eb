// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! CORS allow-list configuration.

use serde::Deserialize;

fn default_origins() -> Vec<String> {
	vec!["http://localhost:5173".to_string()]
}

/// CORS configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
	pub allowed_origins: Vec<String>,
	pub allow_credentials: bool,
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origins: default_origins(),
			allow_credentials: true,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfigLayer {
	#[serde(default)]
	pub allowed_origins: Option<Vec<String>>,
	#[serde(default)]
	pub allow_credentials: Option<bool>,
}

impl CorsConfigLayer {
	pub fn merge(&mut self, other: CorsConfigLayer) {
		if other.allowed_origins.is_some() {
			self.allowed_origins = other.allowed_origins;
		}
		if other.allow_credentials.is_some() {
			self.allow_credentials = other.allow_credentials;
		}
	}

	pub fn finalize(self) -> CorsConfig {
		let allowed_origins = self
			.allowed_origins
			.map(|origins| {
				origins
					.into_iter()
					.map(|o| o.trim().to_string())
					.filter(|o| !o.is_empty())
					.collect()
			})
			.unwrap_or_else(default_origins);

		CorsConfig {
			allowed_origins,
			allow_credentials: self.allow_credentials.unwrap_or(true),
		}
	}
}

/// Split a comma separated origin list, as found in `QUILL_SERVER_CORS_ORIGINS`.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_local_frontend() {
		let config = CorsConfigLayer::default().finalize();
		assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
		assert!(config.allow_credentials);
	}

	#[test]
	fn origin_list_is_trimmed() {
		assert_eq!(
			parse_origin_list(" http://a.test , ,http://b.test"),
			vec!["http://a.test", "http://b.test"]
		);
	}

	#[test]
	fn blank_entries_are_dropped_on_finalize() {
		let config = CorsConfigLayer {
			allowed_origins: Some(vec!["  ".to_string(), "https://app.test ".to_string()]),
			allow_credentials: Some(false),
		}
		.finalize();
		assert_eq!(config.allowed_origins, vec!["https://app.test"]);
		assert!(!config.allow_credentials);
	}
}
