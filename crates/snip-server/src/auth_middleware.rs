// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Axum extractor guarding bearer-protected routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use snip_server_auth::{authenticate_headers, SessionClaims};

use crate::api::AppState;
use crate::error::ServerError;

/// Claims of a verified session token.
///
/// Rejects with 401 when no token is presented and 403 when the token is
/// invalid or expired.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub SessionClaims);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = ServerError;

	#[tracing::instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		let claims = authenticate_headers(&parts.headers, &state.tokens)
			.inspect_err(|e| tracing::debug!(error = %e, "Authentication required: rejected"))?;
		tracing::debug!(user = %claims.sub, "Authentication required: success");
		Ok(RequireAuth(claims))
	}
}
