// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tracing subscriber setup.

use quill_server_config::{LogFormat, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::{
	fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
	util::TryInitError, EnvFilter, Layer,
};

/// `RUST_LOG` wins over the configured level when set.
fn filter_for(level: &str, rust_log: Option<&str>) -> EnvFilter {
	match rust_log.filter(|s| !s.trim().is_empty()) {
		Some(directives) => EnvFilter::new(directives),
		None => EnvFilter::new(level),
	}
}

/// JSON formatter writing to `writer`. Each line carries the current span and
/// the full span list, so the `request` span's `correlation_id` appears on
/// every event emitted while serving a request, however deep it is nested.
pub fn json_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync + 'static
where
	S: Subscriber + for<'span> LookupSpan<'span>,
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	tracing_subscriber::fmt::layer()
		.json()
		.with_current_span(true)
		.with_span_list(true)
		.with_writer(writer)
}

/// Install the global subscriber.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
	let rust_log = std::env::var("RUST_LOG").ok();
	let filter = filter_for(&config.level, rust_log.as_deref());
	let registry = tracing_subscriber::registry().with(filter);

	match config.format {
		LogFormat::Json => registry.with(json_layer(std::io::stdout)).try_init(),
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().pretty())
			.try_init(),
	}
}
