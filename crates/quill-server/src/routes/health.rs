// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// GET /health - process is up. Does not probe the completion API.
pub async fn health_check() -> Json<HealthResponse> {
	Json(HealthResponse { status: "ok" })
}
