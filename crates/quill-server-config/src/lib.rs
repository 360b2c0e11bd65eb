// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Quill server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`QUILL_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use quill_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub cors: CorsConfig,
	pub llm: LlmConfig,
	pub retry: RetrySettings,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`QUILL_SERVER_*`)
/// 2. Config file (`/etc/quill/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let config = ServerConfig {
		http: layer.http.unwrap_or_default().finalize(),
		cors: layer.cors.unwrap_or_default().finalize(),
		llm: layer.llm.unwrap_or_default().finalize(),
		retry: layer.retry.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	if config.llm.api_key.is_none() {
		warn!("no LLM API key configured; every request will be served from the fallback path");
	}

	info!(
		host = %config.http.host,
		port = config.http.port,
		cors_origins = config.cors.allowed_origins.len(),
		llm_base_url = %config.llm.base_url,
		llm_model = %config.llm.model,
		llm_key_configured = config.llm.api_key.is_some(),
		retry_max_attempts = config.retry.max_attempts,
		"Server configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
	if config.http.port == 0 {
		return Err(ConfigError::Validation("http.port must be non-zero".to_string()));
	}
	if config.cors.allowed_origins.is_empty() {
		return Err(ConfigError::Validation(
			"cors.allowed_origins must list at least one origin".to_string(),
		));
	}
	if config.retry.max_attempts == 0 {
		return Err(ConfigError::Validation(
			"retry.max_attempts must be at least 1".to_string(),
		));
	}
	if config.retry.backoff_factor.is_nan() || config.retry.backoff_factor < 1.0 {
		return Err(ConfigError::Validation(
			"retry.backoff_factor must be >= 1.0".to_string(),
		));
	}
	if config.llm.connect_timeout_secs == 0 || config.llm.request_timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"llm timeouts must be non-zero".to_string(),
		));
	}

	Ok(())
}
