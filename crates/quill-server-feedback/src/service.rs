// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analysis and generation flows.

use std::sync::Arc;
use std::time::Duration;

use quill_common_core::{LlmClient, LlmError, LlmRequest, Message};
use quill_common_http::{retry, Attempt, RetryConfig, RetryableError};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::budget::{word_count, WordBudget};
use crate::extract::{fallback_analysis, parse_analysis, SchemaError};
use crate::prompt::{
	analysis_prompt, generation_prompt, ANALYSIS_SYSTEM_PROMPT, GENERATION_SYSTEM_PROMPT,
};
use crate::request::{AnalysisRequest, GenerationRequest};
use crate::types::AnalysisResult;

/// Why a single attempt did not produce a usable answer.
#[derive(Debug, Error)]
enum FlowFailure {
	#[error(transparent)]
	Llm(#[from] LlmError),

	#[error(transparent)]
	Schema(#[from] SchemaError),

	#[error("generated text has {words} words, outside {min}-{max}")]
	OutOfBudget { words: usize, min: usize, max: usize },
}

impl RetryableError for FlowFailure {
	fn is_retryable(&self) -> bool {
		match self {
			FlowFailure::Llm(e) => e.is_retryable(),
			FlowFailure::Schema(_) | FlowFailure::OutOfBudget { .. } => true,
		}
	}

	fn retry_after(&self) -> Option<Duration> {
		match self {
			FlowFailure::Llm(e) => e.retry_after(),
			_ => None,
		}
	}
}

/// Runs both flows against one completion backend.
///
/// Cheap to clone; the client is shared.
#[derive(Clone)]
pub struct FeedbackService {
	client: Arc<dyn LlmClient>,
	model: String,
	retry: RetryConfig,
}

impl FeedbackService {
	pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, retry: RetryConfig) -> Self {
		Self {
			client,
			model: model.into(),
			retry,
		}
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	fn completion_request(&self, system: &str, prompt: String, temperature: f32) -> LlmRequest {
		LlmRequest::new(self.model.clone())
			.with_messages(vec![Message::system(system), Message::user(prompt)])
			.with_temperature(temperature)
	}

	/// Suggestions, tone and an alternative text. Never fails.
	#[instrument(skip_all, fields(words = word_count(request.text())))]
	pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
		let budget = request.budget();
		let llm_request = self.completion_request(
			ANALYSIS_SYSTEM_PROMPT,
			analysis_prompt(request.text(), &budget),
			request.temperature(),
		);

		let outcome = retry(&self.retry, |attempt| {
			let llm_request = llm_request.clone();
			async move {
				debug!(attempt = attempt + 1, "requesting analysis");
				let response = match self.client.complete(llm_request).await {
					Ok(response) => response,
					Err(e) => return Attempt::from(Err::<Option<AnalysisResult>, _>(FlowFailure::from(e))),
				};
				Attempt::from(parse_analysis(response.content()).map_err(FlowFailure::from))
			}
		})
		.await;

		match outcome {
			Ok(Some(result)) => {
				info!(
					tone = %result.tone,
					suggestions = result.suggestions.len(),
					"analysis completed"
				);
				result
			}
			Ok(None) => {
				warn!("completion contained no JSON object, using fallback analysis");
				fallback_analysis(request.text())
			}
			Err(e) => {
				warn!(error = %e, attempts = e.attempts(), "analysis failed, using fallback analysis");
				fallback_analysis(request.text())
			}
		}
	}

	/// Text with only the selected suggestions applied.
	///
	/// Falls back to the unchanged input when no reply fits the word budget.
	#[instrument(skip_all, fields(words = word_count(request.text())))]
	pub async fn generate(&self, request: &GenerationRequest) -> String {
		let selected = request.selected_suggestions();
		if selected.is_empty() {
			return request.text().to_string();
		}

		let budget = request.budget();
		let selected_count = selected.len();
		let llm_request = self.completion_request(
			GENERATION_SYSTEM_PROMPT,
			generation_prompt(request.text(), &budget, &selected),
			request.temperature(),
		);

		let outcome = retry(&self.retry, |attempt| {
			let llm_request = llm_request.clone();
			async move {
				debug!(attempt = attempt + 1, selected = selected_count, "requesting generation");
				let response = match self.client.complete(llm_request).await {
					Ok(response) => response,
					Err(e) => return Attempt::from(Err::<String, _>(FlowFailure::from(e))),
				};
				let generated = response.content().trim().to_string();
				Attempt::from(check_budget(&budget, generated))
			}
		})
		.await;

		match outcome {
			Ok(generated) => {
				info!(
					generated_words = word_count(&generated),
					min_words = budget.min_words,
					max_words = budget.max_words,
					"generation accepted"
				);
				generated
			}
			Err(e) => {
				warn!(error = %e, attempts = e.attempts(), "generation failed, returning original text");
				request.text().to_string()
			}
		}
	}
}

fn check_budget(budget: &WordBudget, generated: String) -> Result<String, FlowFailure> {
	if budget.accepts(&generated) {
		Ok(generated)
	} else {
		Err(FlowFailure::OutOfBudget {
			words: word_count(&generated),
			min: budget.min_words,
			max: budget.max_words,
		})
	}
}
