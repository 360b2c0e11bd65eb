// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Quill.
//!
//! This crate provides:
//! - A pre-configured HTTP client with a consistent User-Agent and timeouts
//! - A bounded retry driver with exponential backoff, driven by explicit
//!   per-attempt outcomes instead of error-type inspection

mod client;
mod retry;

pub use client::{builder, builder_with_timeouts, user_agent, Timeouts};
pub use retry::{retry, Attempt, RetryConfig, RetryError, RetryableError};
