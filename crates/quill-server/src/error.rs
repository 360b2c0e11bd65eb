// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.
//!
//! Every error leaves the server as `{code, message, details}`. Declared HTTP
//! errors use `code = "http_error_<status>"`; anything unexpected becomes
//! `internal_error` with a generic message.

use std::any::Any;

use axum::{
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use quill_server_feedback::FeedbackError;
use serde::Serialize;
use serde_json::{json, Value};

pub const INTERNAL_ERROR_CODE: &str = "internal_error";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Malformed request (empty text, mismatched arrays, non-JSON body).
	#[error("Bad request: {message}")]
	BadRequest {
		message: String,
		details: Option<Value>,
	},

	/// Well-formed JSON whose fields are missing, ill-typed or out of range.
	#[error("Unprocessable request: {message}")]
	Unprocessable {
		message: String,
		details: Option<Value>,
	},

	#[error("Unsupported media type: {0}")]
	UnsupportedMediaType(String),

	#[error("Not found: {0}")]
	NotFound(String),

	/// The analysis flow returned no suggestions.
	#[error("Analyzer returned no suggestions")]
	EmptyAnalysis,

	/// Any other extractor rejection, passed through with its own status.
	#[error("Request rejected ({status}): {message}")]
	Rejected { status: StatusCode, message: String },

	/// Unexpected fault. The message is logged, never returned.
	#[error("Internal error: {0}")]
	Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub code: String,
	pub message: String,
	pub details: Option<Value>,
}

impl ErrorResponse {
	pub fn http(status: StatusCode, message: impl Into<String>, details: Option<Value>) -> Self {
		Self {
			code: format!("http_error_{}", status.as_u16()),
			message: message.into(),
			details,
		}
	}

	pub fn internal() -> Self {
		Self {
			code: INTERNAL_ERROR_CODE.to_string(),
			message: INTERNAL_ERROR_MESSAGE.to_string(),
			details: None,
		}
	}
}

impl ServerError {
	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			ServerError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			ServerError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			ServerError::NotFound(_) => StatusCode::NOT_FOUND,
			ServerError::EmptyAnalysis | ServerError::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
			ServerError::Rejected { status, .. } => *status,
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		let body = match self {
			ServerError::BadRequest { message, details }
			| ServerError::Unprocessable { message, details } => {
				tracing::warn!(status = status.as_u16(), message = %message, "request rejected");
				ErrorResponse::http(status, message, details)
			}
			ServerError::UnsupportedMediaType(message)
			| ServerError::NotFound(message)
			| ServerError::Rejected { message, .. } => {
				tracing::warn!(status = status.as_u16(), message = %message, "request rejected");
				ErrorResponse::http(status, message, None)
			}
			ServerError::EmptyAnalysis => {
				tracing::error!("analysis produced no suggestions");
				ErrorResponse::http(status, "Analyzer returned no suggestions", None)
			}
			ServerError::Internal(message) => {
				tracing::error!(error = %message, "internal error");
				ErrorResponse::internal()
			}
		};

		(status, Json(body)).into_response()
	}
}

impl From<FeedbackError> for ServerError {
	fn from(e: FeedbackError) -> Self {
		let message = e.to_string();
		let details = Some(json!({ "field": e.field() }));
		if e.is_unprocessable() {
			ServerError::Unprocessable { message, details }
		} else {
			ServerError::BadRequest { message, details }
		}
	}
}

impl From<JsonRejection> for ServerError {
	fn from(rejection: JsonRejection) -> Self {
		let status = rejection.status();
		let message = rejection.body_text();
		match status {
			StatusCode::BAD_REQUEST => ServerError::BadRequest {
				message,
				details: None,
			},
			StatusCode::UNPROCESSABLE_ENTITY => ServerError::Unprocessable {
				message,
				details: None,
			},
			StatusCode::UNSUPPORTED_MEDIA_TYPE => ServerError::UnsupportedMediaType(message),
			status => ServerError::Rejected { status, message },
		}
	}
}

/// Panic hook for `CatchPanicLayer`. The payload is logged, not returned.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
	let detail = if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else if let Some(s) = payload.downcast_ref::<&str>() {
		s.to_string()
	} else {
		"unknown panic payload".to_string()
	};

	ServerError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::to_bytes;

	async fn body_json(response: Response) -> Value {
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	#[tokio::test]
	async fn declared_errors_use_http_error_code() {
		let response = ServerError::from(FeedbackError::NothingSelected).into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		let body = body_json(response).await;
		assert_eq!(body["code"], "http_error_400");
		assert_eq!(body["message"], "At least one suggestion must be selected");
		assert_eq!(body["details"]["field"], "selected_suggestions");
	}

	#[tokio::test]
	async fn range_errors_are_unprocessable() {
		let response =
			ServerError::from(FeedbackError::TemperatureOutOfRange(3.0)).into_response();
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(body_json(response).await["code"], "http_error_422");
	}

	#[tokio::test]
	async fn internal_errors_hide_detail() {
		let response = ServerError::Internal("secret stack trace".to_string()).into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		let body = body_json(response).await;
		assert_eq!(body["code"], "internal_error");
		assert_eq!(body["message"], "Internal server error");
		assert!(body["details"].is_null());
		assert!(!body.to_string().contains("secret"));
	}

	#[tokio::test]
	async fn empty_analysis_is_declared_500() {
		let response = ServerError::EmptyAnalysis.into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body_json(response).await["code"], "http_error_500");
	}

	#[tokio::test]
	async fn panic_payload_is_not_leaked() {
		let response = handle_panic(Box::new("boom at line 7"));
		let body = body_json(response).await;
		assert_eq!(body["code"], "internal_error");
		assert!(!body.to_string().contains("boom"));
	}
}
