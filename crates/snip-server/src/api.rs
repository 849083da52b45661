// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Json, Router,
};
use snip_server_auth::{CredentialStore, InMemoryUserStore, PasswordWorkFactor, SessionTokenService};
use snip_server_config::ServerConfig;
use snip_server_snippets::{InMemorySnippetStore, SnippetCipher, SnippetService};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub snippets: Arc<SnippetService>,
	pub credentials: Arc<CredentialStore>,
	pub tokens: Arc<SessionTokenService>,
}

/// Build the stores and crypto services from resolved configuration.
///
/// Fails if the encryption key is not 32 bytes, the signing secret is empty,
/// or the Argon2 parameters are rejected.
pub fn create_app_state(config: &ServerConfig) -> Result<AppState, ServerError> {
	let cipher = SnippetCipher::new(config.secrets.encryption_key.expose().as_bytes())?;
	let snippets = SnippetService::new(Arc::new(InMemorySnippetStore::new()), cipher);

	let work = PasswordWorkFactor {
		memory_kib: config.auth.argon2_memory_kib,
		iterations: config.auth.argon2_iterations,
		parallelism: config.auth.argon2_parallelism,
	};
	let credentials = CredentialStore::new(Arc::new(InMemoryUserStore::new()), work)?;

	let tokens = SessionTokenService::new(&config.secrets.jwt_secret, config.auth.token_ttl_secs)?;

	Ok(AppState {
		snippets: Arc::new(snippets),
		credentials: Arc::new(credentials),
		tokens: Arc::new(tokens),
	})
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/snippets",
			post(routes::snippets::create_snippet).get(routes::snippets::list_snippets),
		)
		.route("/snippets/{id}", get(routes::snippets::get_snippet))
		.route("/users", post(routes::users::register))
		.route("/login", post(routes::users::login))
		.route(
			"/api/openapi.json",
			get(|| async { Json(crate::api_docs::ApiDoc::openapi()) }),
		)
		.with_state(state)
}
