// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

pub mod feedback;
pub mod health;

use axum::http::{Method, StatusCode, Uri};

use crate::error::ServerError;

pub async fn not_found(uri: Uri) -> ServerError {
	ServerError::NotFound(format!("No route for {}", uri.path()))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ServerError {
	ServerError::Rejected {
		status: StatusCode::METHOD_NOT_ALLOWED,
		message: format!("Method {method} not allowed on {}", uri.path()),
	}
}
