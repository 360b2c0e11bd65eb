// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration section.

use serde::Deserialize;

fn default_level(debug: bool) -> String {
	if debug {
		"debug,tower_http=debug".to_string()
	} else {
		"info,tower_http=debug".to_string()
	}
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	/// One JSON object per line, span fields included.
	Json,
	/// Human readable, for local development.
	Pretty,
}

impl std::str::FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"json" => Ok(LogFormat::Json),
			"pretty" | "text" => Ok(LogFormat::Pretty),
			other => Err(format!("unknown log format '{other}', expected 'json' or 'pretty'")),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<LogFormat>,
	#[serde(default)]
	pub debug: Option<bool>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
		if other.debug.is_some() {
			self.debug = other.debug;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		let debug = self.debug.unwrap_or(false);
		LoggingConfig {
			level: self.level.unwrap_or_else(|| default_level(debug)),
			format: self.format.unwrap_or(if debug {
				LogFormat::Pretty
			} else {
				LogFormat::Json
			}),
			debug,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
	pub level: String,
	pub format: LogFormat,
	pub debug: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = LoggingConfig::default();
		assert_eq!(config.level, "info,tower_http=debug");
		assert_eq!(config.format, LogFormat::Json);
		assert!(!config.debug);
	}

	#[test]
	fn debug_flag_changes_defaults_only() {
		let config = LoggingConfigLayer {
			debug: Some(true),
			..Default::default()
		}
		.finalize();
		assert_eq!(config.level, "debug,tower_http=debug");
		assert_eq!(config.format, LogFormat::Pretty);

		let explicit = LoggingConfigLayer {
			level: Some("warn".to_string()),
			format: Some(LogFormat::Json),
			debug: Some(true),
		}
		.finalize();
		assert_eq!(explicit.level, "warn");
		assert_eq!(explicit.format, LogFormat::Json);
	}

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: LoggingConfigLayer = toml::from_str("format = \"pretty\"").unwrap();
		assert_eq!(layer.format, Some(LogFormat::Pretty));
		assert!(layer.level.is_none());
	}

	#[test]
	fn format_parses_case_insensitively() {
		assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
		assert!("xml".parse::<LogFormat>().is_err());
	}
}
