// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validated inputs for the two flows.

use thiserror::Error;

use crate::budget::WordBudget;

pub const MAX_TEXT_CHARS: usize = 5000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Input rejected before any remote call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
	#[error("Text may not be empty")]
	EmptyText,

	#[error("Text is {chars} characters long; at most {max} are allowed")]
	TextTooLong { chars: usize, max: usize },

	#[error("Temperature {0} is outside the range [0, 2]")]
	TemperatureOutOfRange(f32),

	#[error("suggestions ({suggestions}) and selected_suggestions ({selected}) differ in length")]
	SelectionMismatch { suggestions: usize, selected: usize },

	#[error("At least one suggestion must be selected")]
	NothingSelected,
}

impl FeedbackError {
	/// Range violations on individual fields, as opposed to a malformed request.
	pub fn is_unprocessable(&self) -> bool {
		matches!(
			self,
			FeedbackError::TextTooLong { .. } | FeedbackError::TemperatureOutOfRange(_)
		)
	}

	/// Request field the error is about.
	pub fn field(&self) -> &'static str {
		match self {
			FeedbackError::EmptyText | FeedbackError::TextTooLong { .. } => "text",
			FeedbackError::TemperatureOutOfRange(_) => "temperature",
			FeedbackError::SelectionMismatch { .. } | FeedbackError::NothingSelected => {
				"selected_suggestions"
			}
		}
	}
}

/// Length is checked on the raw input; the stored text is trimmed.
fn validate_text(text: &str) -> Result<(), FeedbackError> {
	if text.trim().is_empty() {
		return Err(FeedbackError::EmptyText);
	}
	let chars = text.chars().count();
	if chars > MAX_TEXT_CHARS {
		return Err(FeedbackError::TextTooLong {
			chars,
			max: MAX_TEXT_CHARS,
		});
	}
	Ok(())
}

fn validate_temperature(temperature: Option<f32>) -> Result<f32, FeedbackError> {
	let temperature = temperature.unwrap_or(DEFAULT_TEMPERATURE);
	if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
		return Err(FeedbackError::TemperatureOutOfRange(temperature));
	}
	Ok(temperature)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
	text: String,
	temperature: f32,
}

impl AnalysisRequest {
	pub fn new(text: impl Into<String>, temperature: Option<f32>) -> Result<Self, FeedbackError> {
		let text = text.into();
		validate_text(&text)?;
		let temperature = validate_temperature(temperature)?;
		Ok(Self {
			text: text.trim().to_string(),
			temperature,
		})
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn temperature(&self) -> f32 {
		self.temperature
	}

	pub fn budget(&self) -> WordBudget {
		WordBudget::for_text(&self.text)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
	text: String,
	suggestions: Vec<String>,
	selected: Vec<bool>,
	temperature: f32,
}

impl GenerationRequest {
	/// `selected` is a positional mask over `suggestions`.
	pub fn new(
		text: impl Into<String>,
		suggestions: Vec<String>,
		selected: Vec<bool>,
		temperature: Option<f32>,
	) -> Result<Self, FeedbackError> {
		let text = text.into();
		validate_text(&text)?;
		let temperature = validate_temperature(temperature)?;

		if suggestions.len() != selected.len() {
			return Err(FeedbackError::SelectionMismatch {
				suggestions: suggestions.len(),
				selected: selected.len(),
			});
		}
		if !selected.iter().any(|&s| s) {
			return Err(FeedbackError::NothingSelected);
		}

		Ok(Self {
			text: text.trim().to_string(),
			suggestions,
			selected,
			temperature,
		})
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn temperature(&self) -> f32 {
		self.temperature
	}

	pub fn budget(&self) -> WordBudget {
		WordBudget::for_text(&self.text)
	}

	/// Suggestions whose mask entry is `true`, in their original order.
	pub fn selected_suggestions(&self) -> Vec<&str> {
		self.suggestions
			.iter()
			.zip(&self.selected)
			.filter(|(_, &on)| on)
			.map(|(s, _)| s.as_str())
			.collect()
	}
}
