// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Quill writing feedback server.
//!
//! Serves `POST /analyze`, `POST /generate` and `GET /health` on top of the
//! flows in `quill-server-feedback`.

pub mod api;
pub mod correlation;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;
pub mod version;

pub use api::{cors_layer, create_app_state, create_router, AppState};
pub use error::{ErrorResponse, ServerError};
pub use quill_server_config::ServerConfig;
