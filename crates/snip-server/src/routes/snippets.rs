// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet HTTP handlers.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::StatusCode,
	Json,
};
use snip_server_api::{CreateSnippetRequest, ErrorResponse, SealedSnippetResponse, SnippetResponse};
use snip_server_snippets::{DecryptedSnippet, SnippetError};

use crate::{api::AppState, auth_middleware::RequireAuth, error::ServerError};

fn to_response(snippet: DecryptedSnippet) -> SnippetResponse {
	SnippetResponse {
		id: snippet.id,
		language: snippet.language,
		code: snippet.code,
	}
}

#[utoipa::path(
    post,
    path = "/snippets",
    request_body = CreateSnippetRequest,
    responses(
        (status = 201, description = "Snippet stored; code is returned sealed", body = SealedSnippetResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Encryption failed", body = ErrorResponse)
    ),
    tag = "snippets"
)]
/// POST /snippets - Store a snippet, encrypting its body.
#[tracing::instrument(skip_all)]
pub async fn create_snippet(
	State(state): State<AppState>,
	payload: Result<Json<CreateSnippetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SealedSnippetResponse>), ServerError> {
	let Json(payload) = payload?;

	let (Some(language), Some(code)) = (payload.language, payload.code) else {
		return Err(SnippetError::MissingField.into());
	};

	let snippet = state.snippets.create(&language, &code).await?;

	Ok((
		StatusCode::CREATED,
		Json(SealedSnippetResponse {
			id: snippet.id,
			language: snippet.language,
			code: snippet.code.to_string(),
		}),
	))
}

#[utoipa::path(
    get,
    path = "/snippets",
    responses(
        (status = 200, description = "All snippets, decrypted, in insertion order", body = Vec<SnippetResponse>),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "snippets"
)]
/// GET /snippets - List every snippet.
#[tracing::instrument(skip_all, fields(user = %claims.sub))]
pub async fn list_snippets(
	RequireAuth(claims): RequireAuth,
	State(state): State<AppState>,
) -> Result<Json<Vec<SnippetResponse>>, ServerError> {
	let snippets = state.snippets.list().await?;
	Ok(Json(snippets.into_iter().map(to_response).collect()))
}

#[utoipa::path(
    get,
    path = "/snippets/{id}",
    params(
        ("id" = u64, Path, description = "Snippet id")
    ),
    responses(
        (status = 200, description = "The snippet, decrypted", body = SnippetResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Snippet not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "snippets"
)]
/// GET /snippets/{id} - Fetch one snippet.
#[tracing::instrument(skip_all, fields(user = %claims.sub, id = %id))]
pub async fn get_snippet(
	RequireAuth(claims): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<SnippetResponse>, ServerError> {
	let id: u64 = id
		.parse()
		.map_err(|_| ServerError::BadRequest("Invalid snippet id".to_string()))?;

	let snippet = state.snippets.get(id).await?;
	Ok(Json(to_response(snippet)))
}
