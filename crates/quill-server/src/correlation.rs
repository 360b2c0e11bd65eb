// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Per-request correlation id.
//!
//! The id comes from the `x-correlation-id` request header when it is present
//! and non-blank, otherwise a fresh UUID v4 is minted. It is stored in the
//! request extensions, recorded on a `request` span that wraps the rest of the
//! stack, and echoed on the response.

use axum::{
	body::Body,
	extract::FromRequestParts,
	http::{request::Parts, HeaderName, HeaderValue, Request},
	middleware::Next,
	response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const CORRELATION_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	fn from_request<B>(request: &Request<B>) -> Self {
		let supplied = request
			.headers()
			.get(&CORRELATION_HEADER)
			.and_then(|v| v.to_str().ok())
			.map(str::trim)
			.filter(|v| !v.is_empty());

		match supplied {
			Some(id) => Self(id.to_string()),
			None => Self(Uuid::new_v4().to_string()),
		}
	}
}

impl<S: Send + Sync> FromRequestParts<S> for CorrelationId {
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(parts
			.extensions
			.get::<CorrelationId>()
			.cloned()
			.unwrap_or_else(|| CorrelationId("unknown".to_string())))
	}
}

pub async fn correlation_layer(mut request: Request<Body>, next: Next) -> Response {
	let id = CorrelationId::from_request(&request);
	let span = tracing::info_span!(
		"request",
		correlation_id = %id.as_str(),
		method = %request.method(),
		path = %request.uri().path(),
	);
	request.extensions_mut().insert(id.clone());

	let mut response = next.run(request).instrument(span).await;

	if let Ok(value) = HeaderValue::from_str(id.as_str()) {
		response.headers_mut().insert(CORRELATION_HEADER, value);
	}
	response
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn supplied_id_is_kept() {
		let request = Request::builder()
			.header("x-correlation-id", " abc-123 ")
			.body(())
			.unwrap();
		assert_eq!(CorrelationId::from_request(&request).as_str(), "abc-123");
	}

	#[test]
	fn blank_id_is_replaced() {
		let request = Request::builder()
			.header("x-correlation-id", "   ")
			.body(())
			.unwrap();
		let id = CorrelationId::from_request(&request);
		assert!(Uuid::parse_str(id.as_str()).is_ok());
	}

	#[test]
	fn missing_id_is_generated() {
		let request = Request::builder().body(()).unwrap();
		let first = CorrelationId::from_request(&request);
		let second = CorrelationId::from_request(&request);
		assert_ne!(first, second);
	}
}
