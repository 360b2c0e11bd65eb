// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Instructions sent to the completion API.

use std::fmt::Write;

use crate::budget::WordBudget;

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const GENERATION_SYSTEM_PROMPT: &str = "You are a precise editor. Apply ONLY the specific \
	suggestions provided. Ignore all other possible improvements. Make MINIMAL changes. Keep at \
	least 80% of the text identical. CRITICAL: the returned text MUST stay within the specified \
	word count range. Never summarize; edit only to apply the given suggestions.";

/// Shape the model is shown for its answer.
pub const ANALYSIS_EXAMPLE_JSON: &str = r#"{
  "suggestions": ["Suggestion 1 with detail", "Suggestion 2 with detail"],
  "tone": "neutral",
  "alternative_text": "Improved version of roughly the same length as the original, with the same structure but improved according to the suggestions."
}"#;

pub fn analysis_prompt(text: &str, budget: &WordBudget) -> String {
	let WordBudget {
		original_words,
		min_words,
		max_words,
	} = *budget;

	format!(
		"You are a professional language expert who gives constructive feedback on written text. \
Your task is to analyze the text below and give concrete, useful suggestions for improvement.\n\n\
INSTRUCTIONS:\n\
1. Give 2-3 CONCRETE and SPECIFIC suggestions that directly address this text.\n\
2. Focus the suggestions on structure, clarity, word choice, sentence construction and engagement.\n\
3. Give an example or a short contextual explanation for each suggestion.\n\
4. Analyze the TONE and return EXACTLY one of: \"positive\", \"neutral\", \"negative\".\n\
5. Write an IMPROVED VERSION of the text that applies the most important suggestions.\n\
- IMPORTANT: alternative_text must be between {min_words} and {max_words} words (original: {original_words} words)\n\
- Keep about 80-90% of the original wording and structure\n\
- Make minimal changes to implement the suggestions\n\
- NOT a summary: same length and structure as the original\n\
6. Write the suggestions and alternative_text in the same language as the original text.\n\
7. Return ONLY a single JSON object (no extra text) with these EXACT keys:\n\
- \"suggestions\": array of 2-3 strings\n\
- \"tone\": one of \"positive\", \"neutral\", \"negative\"\n\
- \"alternative_text\": the improved text ({min_words}-{max_words} words)\n\n\
EXAMPLE OF THE EXPECTED JSON:\n\
{ANALYSIS_EXAMPLE_JSON}\n\n\
ORIGINAL TEXT ({original_words} words):\n\
{text}\n\n\
Return ONLY the JSON object, nothing else."
	)
}

pub fn generation_prompt(text: &str, budget: &WordBudget, selected: &[&str]) -> String {
	let WordBudget {
		original_words,
		min_words,
		max_words,
	} = *budget;

	let mut listed = String::new();
	for suggestion in selected {
		let _ = writeln!(listed, "- {suggestion}");
	}
	let count = selected.len();

	format!(
		"You are an experienced editor. Your ONLY task is to apply THESE editing suggestions and NOTHING ELSE.\n\n\
THESE SUGGESTIONS MUST BE APPLIED:\n\
{listed}\n\
CRITICAL INSTRUCTIONS:\n\
1. Apply ONLY the suggestions listed above. IGNORE every other possible improvement.\n\
2. The returned text MUST be between {min_words} and {max_words} words (original: {original_words} words).\n\
3. Keep at least 80% of the original text word for word.\n\
4. Make ONLY minimal, surgical changes for these specific suggestions.\n\
5. NOT a summary: same length and structure as the original.\n\
6. Keep the language of the original text.\n\
7. Return ONLY the edited text. No JSON, no commentary.\n\n\
ORIGINAL TEXT ({original_words} words):\n\
{text}\n\n\
Apply ONLY the {count} suggestion(s) above. Return the edited text with {min_words}-{max_words} words."
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn analysis_prompt_embeds_text_budget_and_example() {
		let text = "Detta är ett test.";
		let budget = WordBudget::for_text(text);
		let prompt = analysis_prompt(text, &budget);

		assert!(prompt.contains(text));
		assert!(prompt.contains("between 50 and 54 words (original: 4 words)"));
		assert!(prompt.contains(ANALYSIS_EXAMPLE_JSON));
		assert!(prompt.contains("\"suggestions\""));
		assert!(prompt.contains("\"alternative_text\""));
		assert!(prompt.ends_with("Return ONLY the JSON object, nothing else."));
	}

	#[test]
	fn example_json_parses_as_analysis() {
		let parsed = crate::extract::parse_analysis(ANALYSIS_EXAMPLE_JSON)
			.unwrap()
			.unwrap();
		assert_eq!(parsed.suggestions.len(), 2);
	}

	#[test]
	fn generation_prompt_lists_only_selected() {
		let text = "One two three.";
		let budget = WordBudget::for_text(text);
		let prompt = generation_prompt(text, &budget, &["A", "C"]);

		assert!(prompt.contains("- A\n- C\n"));
		assert!(!prompt.contains("- B"));
		assert!(prompt.contains("Apply ONLY the 2 suggestion(s) above."));
		assert!(prompt.contains(text));
	}

	#[test]
	fn prompts_are_deterministic() {
		let text = "Same input every time.";
		let budget = WordBudget::for_text(text);
		assert_eq!(analysis_prompt(text, &budget), analysis_prompt(text, &budget));
	}
}
