// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI document, served at `/api/openapi.json`.

use snip_server_api::{
	CreateSnippetRequest, ErrorResponse, HealthResponse, HealthStatus, LoginRequest, LoginResponse,
	MessageResponse, RegisterRequest, SealedSnippetResponse, SnippetResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

/// Served as JSON at `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
	info(
		title = "Snip Server API",
		version = "1.0.0",
		description = "Code snippets encrypted at rest, readable with a bearer token.",
		license(name = "Proprietary")
	),
	servers(
		(url = "/", description = "Local server")
	),
	paths(
		routes::health::health_check,
		routes::snippets::create_snippet,
		routes::snippets::list_snippets,
		routes::snippets::get_snippet,
		routes::users::register,
		routes::users::login,
	),
	components(schemas(
		CreateSnippetRequest,
		SealedSnippetResponse,
		SnippetResponse,
		RegisterRequest,
		LoginRequest,
		LoginResponse,
		MessageResponse,
		HealthResponse,
		HealthStatus,
		ErrorResponse,
	)),
	modifiers(&BearerAuth),
	tags(
		(name = "snippets", description = "Encrypted snippet storage"),
		(name = "users", description = "Registration and login"),
		(name = "health", description = "Liveness")
	)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
		if let Some(components) = openapi.components.as_mut() {
			components.add_security_scheme(
				"bearer",
				SecurityScheme::Http(
					HttpBuilder::new()
						.scheme(HttpAuthScheme::Bearer)
						.bearer_format("JWT")
						.build(),
				),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn document_lists_every_route() {
		let doc = ApiDoc::openapi();
		let paths: Vec<&String> = doc.paths.paths.keys().collect();
		for expected in ["/health", "/snippets", "/snippets/{id}", "/users", "/login"] {
			assert!(
				paths.iter().any(|p| p.as_str() == expected),
				"missing {expected}"
			);
		}
	}

	#[test]
	fn bearer_scheme_is_registered() {
		let doc = ApiDoc::openapi();
		let components = doc.components.unwrap();
		assert!(components.security_schemes.contains_key("bearer"));
	}
}
