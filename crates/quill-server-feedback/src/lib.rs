// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Writing feedback on top of an untrusted completion API.
//!
//! Two flows are provided by [`FeedbackService`]:
//!
//! - **analyze**: ask for 2-3 suggestions, a tone label and a lightly edited
//!   alternative text, then dig a JSON object out of the free-form reply.
//! - **generate**: apply only the suggestions the user selected, and accept the
//!   reply only when its length stays within the [`WordBudget`].
//!
//! Neither flow surfaces remote failures to the caller. Once the retry budget
//! is spent, analysis returns a fixed result and generation echoes the input.

pub mod budget;
pub mod extract;
pub mod prompt;
pub mod request;
pub mod service;
pub mod types;

pub use budget::{word_count, WordBudget};
pub use extract::{
	extract_json_object, fallback_analysis, fallback_summary, normalize_suggestions,
	parse_analysis, SchemaError,
};
pub use request::{AnalysisRequest, FeedbackError, GenerationRequest};
pub use service::FeedbackService;
pub use types::{AnalysisResult, Tone};
