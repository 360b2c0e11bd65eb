// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Analysis and generation handlers.

use axum::{extract::State, Json};
use quill_server_feedback::{AnalysisRequest, AnalysisResult, GenerationRequest};
use serde::{Deserialize, Serialize};

use crate::{api::AppState, correlation::CorrelationId, error::ServerError, extract::ApiJson};

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
	pub text: String,
	#[serde(default)]
	pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
	pub text: String,
	pub suggestions: Vec<String>,
	pub selected_suggestions: Vec<bool>,
	#[serde(default)]
	pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
	pub generated_text: String,
}

/// POST /analyze
pub async fn analyze(
	State(state): State<AppState>,
	correlation_id: CorrelationId,
	ApiJson(body): ApiJson<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, ServerError> {
	let request = AnalysisRequest::new(body.text, body.temperature)?;
	let result = state.feedback.analyze(&request).await;

	if result.suggestions.is_empty() {
		return Err(ServerError::EmptyAnalysis);
	}

	tracing::info!(
		correlation_id = %correlation_id.as_str(),
		tone = %result.tone,
		suggestions_count = result.suggestions.len(),
		"Analysis successful"
	);
	Ok(Json(result))
}

/// POST /generate
pub async fn generate(
	State(state): State<AppState>,
	correlation_id: CorrelationId,
	ApiJson(body): ApiJson<GenerateBody>,
) -> Result<Json<GenerateResponse>, ServerError> {
	let request = GenerationRequest::new(
		body.text,
		body.suggestions,
		body.selected_suggestions,
		body.temperature,
	)?;
	let generated_text = state.feedback.generate(&request).await;

	tracing::info!(
		correlation_id = %correlation_id.as_str(),
		selected_count = request.selected_suggestions().len(),
		"Generation successful"
	);
	Ok(Json(GenerateResponse { generated_text }))
}
