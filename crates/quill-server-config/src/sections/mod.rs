// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for quill-server.

pub mod cors;
pub mod http;
pub mod llm;
pub mod logging;
pub mod retry;

pub use cors::{CorsConfig, CorsConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use llm::{LlmConfig, LlmConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use retry::{RetrySettings, RetryConfigLayer};
