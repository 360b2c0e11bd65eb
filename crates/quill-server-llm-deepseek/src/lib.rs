// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! DeepSeek chat completions client.
//!
//! DeepSeek speaks the OpenAI-compatible chat completions protocol. This crate
//! performs a single call per [`quill_common_core::LlmClient::complete`];
//! retrying is left to the caller.

mod client;
mod types;

pub use client::DeepSeekClient;
pub use types::{
	DeepSeekChoice, DeepSeekConfig, DeepSeekError, DeepSeekErrorDetail, DeepSeekMessage,
	DeepSeekRequest, DeepSeekResponse, DeepSeekUsage, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
