// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Quill writing feedback server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quill_server::{create_app_state, create_router, logging, version};

/// Quill server - writing feedback over a completion API.
#[derive(Parser, Debug)]
#[command(name = "quill-server", about = "Quill writing feedback server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/quill/server.toml)
	#[arg(long, env = "QUILL_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for quill-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => quill_server_config::load_config_with_file(path)?,
		None => quill_server_config::load_config()?,
	};

	logging::init_tracing(&config.logging)?;

	tracing::info!(
			host = %config.http.host,
			port = config.http.port,
			model = %config.llm.model,
			cors_origins = ?config.cors.allowed_origins,
			"starting quill-server"
	);

	let state = create_app_state(&config)?;
	let app = create_router(state, &config.cors);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
