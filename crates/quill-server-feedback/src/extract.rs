// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pulling an [`AnalysisResult`] out of free-form completion text.
//!
//! The model is asked for bare JSON but frequently wraps it in prose or code
//! fences. We take everything from the first `{` to the last `}` and parse
//! that. Nested objects, trailing objects and braces inside string literals
//! are all taken at face value; see [`extract_json_object`].

use serde::Deserialize;
use thiserror::Error;

use crate::types::{AnalysisResult, Tone};

pub const MIN_SUGGESTIONS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 3;

/// Returned when the completion carries no JSON object at all.
pub const FALLBACK_SUGGESTIONS: [&str; 2] = ["Shorten long sentences", "Use more active verbs"];

/// Appended when the model returned fewer than [`MIN_SUGGESTIONS`] usable entries.
pub const PADDING_SUGGESTIONS: [&str; 2] = ["Use more active verbs", "Shorten the sentences"];

/// Characters of the input kept in the fallback alternative text.
pub const SUMMARY_CHARS: usize = 150;

/// The completion contained an object-shaped span that is not a valid analysis.
#[derive(Debug, Error)]
pub enum SchemaError {
	#[error("analysis JSON does not match schema: {0}")]
	Json(#[from] serde_json::Error),

	#[error("alternative_text is empty")]
	EmptyAlternative,
}

#[derive(Deserialize)]
struct RawAnalysis {
	suggestions: Vec<String>,
	tone: Tone,
	alternative_text: String,
}

/// Slice from the first `{` to the last `}`, inclusive.
///
/// Returns `None` when either brace is missing or the last `}` precedes the
/// first `{`. No attempt is made to balance braces or skip string literals.
pub fn extract_json_object(completion: &str) -> Option<&str> {
	let start = completion.find('{')?;
	let end = completion.rfind('}')?;
	if end <= start {
		return None;
	}
	Some(&completion[start..=end])
}

/// Parse a completion into an analysis.
///
/// - `Ok(None)`: no JSON object found; callers should fall back immediately.
/// - `Err(_)`: an object was found but violates the schema; worth retrying.
pub fn parse_analysis(completion: &str) -> Result<Option<AnalysisResult>, SchemaError> {
	let Some(fragment) = extract_json_object(completion) else {
		return Ok(None);
	};

	let raw: RawAnalysis = serde_json::from_str(fragment)?;
	if raw.alternative_text.trim().is_empty() {
		return Err(SchemaError::EmptyAlternative);
	}

	Ok(Some(AnalysisResult {
		suggestions: normalize_suggestions(raw.suggestions),
		tone: raw.tone,
		alternative_text: raw.alternative_text,
	}))
}

/// Trim, drop blanks, pad up to two and cap at three.
pub fn normalize_suggestions(raw: Vec<String>) -> Vec<String> {
	let mut suggestions: Vec<String> = raw
		.into_iter()
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.collect();

	for padding in PADDING_SUGGESTIONS {
		if suggestions.len() >= MIN_SUGGESTIONS {
			break;
		}
		if !suggestions.iter().any(|s| s == padding) {
			suggestions.push(padding.to_string());
		}
	}

	suggestions.truncate(MAX_SUGGESTIONS);
	suggestions
}

/// The input cut to [`SUMMARY_CHARS`] characters, with `...` when cut.
pub fn fallback_summary(text: &str) -> String {
	match text.char_indices().nth(SUMMARY_CHARS) {
		Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
		None => text.to_string(),
	}
}

/// Deterministic result used when the model cannot be relied on.
pub fn fallback_analysis(text: &str) -> AnalysisResult {
	AnalysisResult {
		suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
		tone: Tone::Neutral,
		alternative_text: fallback_summary(text),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn extracts_object_wrapped_in_prose() {
		let completion = "Sure! Here you go:\n```json\n{\"a\": 1}\n```\nHope it helps.";
		assert_eq!(extract_json_object(completion), Some("{\"a\": 1}"));
	}

	#[test]
	fn missing_or_reversed_braces_yield_none() {
		assert_eq!(extract_json_object("no braces here"), None);
		assert_eq!(extract_json_object("only { open"), None);
		assert_eq!(extract_json_object("only } close"), None);
		assert_eq!(extract_json_object("} reversed {"), None);
	}

	#[test]
	fn spans_from_first_open_to_last_close() {
		let completion = "x {\"a\": {\"b\": 1}} y {\"c\": 2} z";
		assert_eq!(
			extract_json_object(completion),
			Some("{\"a\": {\"b\": 1}} y {\"c\": 2}")
		);
	}

	#[test]
	fn parses_valid_analysis() {
		let completion = r#"{"suggestions": ["Vary sentence length", "Cut filler words"], "tone": "neutral", "alternative_text": "Det här är ett test."}"#;
		let result = parse_analysis(completion).unwrap().unwrap();
		assert_eq!(result.suggestions, vec!["Vary sentence length", "Cut filler words"]);
		assert_eq!(result.tone, Tone::Neutral);
		assert_eq!(result.alternative_text, "Det här är ett test.");
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let completion = r#"{"suggestions": ["a", "b"], "tone": "positive", "alternative_text": "t", "confidence": 0.9}"#;
		assert!(parse_analysis(completion).unwrap().is_some());
	}

	#[test]
	fn no_json_is_not_a_schema_error() {
		assert!(parse_analysis("I cannot help with that.").unwrap().is_none());
	}

	#[test]
	fn free_text_tone_is_schema_error() {
		let completion = r#"{"suggestions": ["a", "b"], "tone": "cheerful", "alternative_text": "t"}"#;
		assert!(matches!(parse_analysis(completion), Err(SchemaError::Json(_))));
	}

	#[test]
	fn missing_field_is_schema_error() {
		let completion = r#"{"suggestions": ["a", "b"], "tone": "neutral"}"#;
		assert!(parse_analysis(completion).is_err());
	}

	#[test]
	fn blank_alternative_is_schema_error() {
		let completion = r#"{"suggestions": ["a", "b"], "tone": "neutral", "alternative_text": "  "}"#;
		assert!(matches!(
			parse_analysis(completion),
			Err(SchemaError::EmptyAlternative)
		));
	}

	#[test]
	fn pads_when_too_few() {
		assert_eq!(
			normalize_suggestions(vec!["  ".to_string()]),
			vec!["Use more active verbs", "Shorten the sentences"]
		);
		assert_eq!(
			normalize_suggestions(vec![" Cut adverbs ".to_string()]),
			vec!["Cut adverbs", "Use more active verbs"]
		);
	}

	#[test]
	fn padding_skips_duplicates() {
		assert_eq!(
			normalize_suggestions(vec!["Use more active verbs".to_string()]),
			vec!["Use more active verbs", "Shorten the sentences"]
		);
	}

	#[test]
	fn truncates_to_three() {
		let raw = (1..=5).map(|i| format!("s{i}")).collect();
		assert_eq!(normalize_suggestions(raw), vec!["s1", "s2", "s3"]);
	}

	#[test]
	fn summary_truncates_by_characters() {
		let short = "Detta är ett test.";
		assert_eq!(fallback_summary(short), short);

		let exact: String = "å".repeat(150);
		assert_eq!(fallback_summary(&exact), exact);

		let long: String = "ö".repeat(151);
		let summary = fallback_summary(&long);
		assert_eq!(summary, format!("{}...", "ö".repeat(150)));
	}

	#[test]
	fn fallback_is_neutral_pair() {
		let result = fallback_analysis("text");
		assert_eq!(result.suggestions, vec!["Shorten long sentences", "Use more active verbs"]);
		assert_eq!(result.tone, Tone::Neutral);
		assert_eq!(result.alternative_text, "text");
	}

	proptest! {
		#[test]
		fn extracted_span_is_brace_delimited(s in ".*") {
			if let Some(fragment) = extract_json_object(&s) {
				prop_assert!(fragment.starts_with('{'), "fragment must open with a brace");
				prop_assert!(fragment.ends_with('}'), "fragment must close with a brace");
				prop_assert!(s.contains(fragment));
			} else {
				let start = s.find('{');
				let end = s.rfind('}');
				prop_assert!(start.is_none() || end.is_none() || end <= start);
			}
		}

		#[test]
		fn braces_inside_strings_do_not_panic(
			prefix in "[^{}]*",
			inner in ".*",
			suffix in "[^{}]*",
		) {
			let completion = format!("{prefix}{{\"alternative_text\": \"{inner}}}\"}}{suffix}");
			let _ = parse_analysis(&completion);
		}

		#[test]
		fn parsed_suggestions_always_in_range(
			raw in proptest::collection::vec(".{0,20}", 0..8),
		) {
			let suggestions = normalize_suggestions(raw);
			prop_assert!(suggestions.len() >= MIN_SUGGESTIONS);
			prop_assert!(suggestions.len() <= MAX_SUGGESTIONS);
			prop_assert!(suggestions.iter().all(|s| !s.trim().is_empty()));
		}

		#[test]
		fn summary_is_prefix_of_input(text in ".{0,400}") {
			let summary = fallback_summary(&text);
			if text.chars().count() > SUMMARY_CHARS {
				prop_assert!(summary.ends_with("..."));
				prop_assert_eq!(summary.chars().count(), SUMMARY_CHARS + 3);
				prop_assert!(text.starts_with(&summary[..summary.len() - 3]));
			} else {
				prop_assert_eq!(summary, text);
			}
		}
	}
}
