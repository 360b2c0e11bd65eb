// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Emotional register of a text. Never free-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
	Positive,
	Neutral,
	Negative,
}

impl Tone {
	pub fn as_str(&self) -> &'static str {
		match self {
			Tone::Positive => "positive",
			Tone::Neutral => "neutral",
			Tone::Negative => "negative",
		}
	}
}

impl fmt::Display for Tone {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of the analysis flow.
///
/// `suggestions` always holds 2 or 3 non-empty entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
	pub suggestions: Vec<String>,
	pub tone: Tone,
	pub alternative_text: String,
}
