// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snip_server::{create_app_state, create_router};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// snip-server - HTTP server for encrypted code snippets.
#[derive(Parser, Debug)]
#[command(name = "snip-server", about = "Encrypted code snippet server", version)]
struct Args {
	/// Path to a TOML config file (default: /etc/snip/server.toml)
	#[arg(long, env = "SNIP_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for snip-server (e.g., `version`)
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

	let config = match &args.config {
		Some(path) => snip_server_config::load_config_with_file(path)?,
		None => snip_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		token_ttl_secs = config.auth.token_ttl_secs,
		"starting snip-server"
	);

	let state = create_app_state(&config)?;

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("Server shutdown complete");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("Received shutdown signal");
}
