// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use quill_common_secret::load_secret_env;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::cors::parse_origin_list;
use crate::sections::{
	CorsConfigLayer, HttpConfigLayer, LlmConfigLayer, LogFormat, LoggingConfigLayer,
	RetryConfigLayer,
};

/// Provider-native variable accepted when the Quill-specific key is unset.
pub const LEGACY_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/quill/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: QUILL_SERVER_<SECTION>_<FIELD>. The API key also honours
/// `QUILL_SERVER_LLM_API_KEY_FILE` and falls back to `DEEPSEEK_API_KEY`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = layer_from_lookup(&|name: &str| std::env::var(name).ok())?;

		let api_key = match load_secret_env("QUILL_SERVER_LLM_API_KEY")? {
			Some(key) => Some(key),
			None => load_secret_env(LEGACY_API_KEY_VAR)?,
		};
		if let Some(llm) = layer.llm.as_mut() {
			llm.api_key = api_key;
		}

		Ok(layer)
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
	lookup(name).filter(|s| !s.is_empty())
}

fn env_bool(lookup: Lookup<'_>, name: &str) -> Option<bool> {
	env_var(lookup, name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_parse<T: std::str::FromStr>(
	lookup: Lookup<'_>,
	name: &str,
	kind: &str,
) -> Result<Option<T>, ConfigError> {
	match env_var(lookup, name) {
		Some(v) => v.trim().parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

/// Everything except secrets, read through `lookup` so tests need not touch
/// the process environment.
fn layer_from_lookup(lookup: Lookup<'_>) -> Result<ServerConfigLayer, ConfigError> {
	Ok(ServerConfigLayer {
		http: Some(load_http(lookup)?),
		cors: Some(load_cors(lookup)),
		llm: Some(load_llm(lookup)?),
		retry: Some(load_retry(lookup)?),
		logging: Some(load_logging(lookup)?),
	})
}

fn load_http(lookup: Lookup<'_>) -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var(lookup, "QUILL_SERVER_HOST"),
		port: env_parse(lookup, "QUILL_SERVER_PORT", "u16")?,
	})
}

fn load_cors(lookup: Lookup<'_>) -> CorsConfigLayer {
	CorsConfigLayer {
		allowed_origins: env_var(lookup, "QUILL_SERVER_CORS_ORIGINS").map(|s| parse_origin_list(&s)),
		allow_credentials: env_bool(lookup, "QUILL_SERVER_CORS_ALLOW_CREDENTIALS"),
	}
}

fn load_llm(lookup: Lookup<'_>) -> Result<LlmConfigLayer, ConfigError> {
	Ok(LlmConfigLayer {
		api_key: None,
		base_url: env_var(lookup, "QUILL_SERVER_LLM_BASE_URL"),
		model: env_var(lookup, "QUILL_SERVER_LLM_MODEL"),
		connect_timeout_secs: env_parse(lookup, "QUILL_SERVER_LLM_CONNECT_TIMEOUT_SECS", "u64")?,
		request_timeout_secs: env_parse(lookup, "QUILL_SERVER_LLM_REQUEST_TIMEOUT_SECS", "u64")?,
	})
}

fn load_retry(lookup: Lookup<'_>) -> Result<RetryConfigLayer, ConfigError> {
	Ok(RetryConfigLayer {
		max_attempts: env_parse(lookup, "QUILL_SERVER_RETRY_MAX_ATTEMPTS", "u32")?,
		base_delay_ms: env_parse(lookup, "QUILL_SERVER_RETRY_BASE_DELAY_MS", "u64")?,
		max_delay_ms: env_parse(lookup, "QUILL_SERVER_RETRY_MAX_DELAY_MS", "u64")?,
		backoff_factor: env_parse(lookup, "QUILL_SERVER_RETRY_BACKOFF_FACTOR", "f64")?,
		jitter: env_bool(lookup, "QUILL_SERVER_RETRY_JITTER"),
		deadline_secs: env_parse(lookup, "QUILL_SERVER_RETRY_DEADLINE_SECS", "u64")?,
	})
}

fn load_logging(lookup: Lookup<'_>) -> Result<LoggingConfigLayer, ConfigError> {
	let format = match env_var(lookup, "QUILL_SERVER_LOG_FORMAT") {
		Some(raw) => Some(raw.parse::<LogFormat>().map_err(|message| {
			ConfigError::InvalidValue {
				key: "QUILL_SERVER_LOG_FORMAT".to_string(),
				message,
			}
		})?),
		None => None,
	};

	Ok(LoggingConfigLayer {
		level: env_var(lookup, "QUILL_SERVER_LOG_LEVEL"),
		format,
		debug: env_bool(lookup, "QUILL_SERVER_DEBUG").or_else(|| env_bool(lookup, "DEBUG")),
	})
}
