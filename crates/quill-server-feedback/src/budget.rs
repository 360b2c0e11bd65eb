// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Word-count window for rewritten text.

/// Words a rewrite may gain or lose relative to the original.
pub const WORD_MARGIN: usize = 50;

/// Lower bound never drops below this, so very short inputs may grow.
pub const MIN_WORD_FLOOR: usize = 50;

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
	text.split_whitespace().count()
}

/// Acceptable output length, derived fresh from each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBudget {
	pub original_words: usize,
	pub min_words: usize,
	pub max_words: usize,
}

impl WordBudget {
	pub fn for_text(text: &str) -> Self {
		let original_words = word_count(text);
		Self {
			original_words,
			min_words: original_words.saturating_sub(WORD_MARGIN).max(MIN_WORD_FLOOR),
			max_words: original_words + WORD_MARGIN,
		}
	}

	/// Acceptance gate for generated text.
	pub fn accepts(&self, candidate: &str) -> bool {
		let words = word_count(candidate);
		self.min_words <= words && words <= self.max_words
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn empty_text_has_degenerate_window() {
		let budget = WordBudget::for_text("");
		assert_eq!(budget.original_words, 0);
		assert_eq!(budget.min_words, 50);
		assert_eq!(budget.max_words, 50);
	}

	#[test]
	fn long_text_window_is_symmetric() {
		let text = vec!["word"; 200].join(" ");
		let budget = WordBudget::for_text(&text);
		assert_eq!(budget.min_words, 150);
		assert_eq!(budget.max_words, 250);
	}

	#[test]
	fn counts_any_unicode_whitespace() {
		assert_eq!(word_count("Detta  är\tett\ntest."), 4);
		assert_eq!(word_count("   "), 0);
	}

	#[test]
	fn gate_is_inclusive() {
		let budget = WordBudget::for_text(&vec!["a"; 100].join(" "));
		assert!(budget.accepts(&vec!["b"; 50].join(" ")));
		assert!(budget.accepts(&vec!["b"; 150].join(" ")));
		assert!(!budget.accepts(&vec!["b"; 49].join(" ")));
		assert!(!budget.accepts(&vec!["b"; 151].join(" ")));
	}

	#[test]
	fn short_input_rejects_equally_short_reply() {
		let text = "Detta är ett test.";
		let budget = WordBudget::for_text(text);
		assert!(!budget.accepts(text));
	}

	proptest! {
		#[test]
		fn window_bounds_hold(words in 0usize..2000) {
			let text = vec!["w"; words].join(" ");
			let budget = WordBudget::for_text(&text);
			prop_assert_eq!(budget.original_words, words);
			prop_assert!(budget.min_words >= MIN_WORD_FLOOR);
			prop_assert!(budget.min_words <= budget.max_words);
			prop_assert_eq!(budget.max_words, words + WORD_MARGIN);
		}
	}
}
