// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! JSON body extractor with enveloped rejections.

use axum::extract::FromRequest;

use crate::error::ServerError;

/// Like `axum::Json`, but rejections render as [`ServerError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
