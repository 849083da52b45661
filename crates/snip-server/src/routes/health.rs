// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, Json};
use snip_server_api::{HealthResponse, HealthStatus};

use crate::{api::AppState, error::ServerError};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Liveness and store sizes.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ServerError> {
	let snippets = state.snippets.count().await?;
	let users = state.credentials.users().count().await?;

	Ok(Json(HealthResponse {
		status: HealthStatus::Healthy,
		version: env!("CARGO_PKG_VERSION").to_string(),
		snippets,
		users,
	}))
}
