// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration and login handlers.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	Json,
};
use snip_server_api::{ErrorResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use snip_server_auth::AuthError;

use crate::{api::AppState, error::ServerError};

#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "users"
)]
/// POST /users - Register an account.
#[tracing::instrument(skip_all)]
pub async fn register(
	State(state): State<AppState>,
	payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ServerError> {
	let Json(payload) = payload?;

	let (Some(email), Some(password)) = (payload.email, payload.password) else {
		return Err(AuthError::MissingField.into());
	};

	state
		.credentials
		.register(&email, password.expose())
		.await?;

	Ok((
		StatusCode::CREATED,
		Json(MessageResponse {
			message: "User registered successfully!".to_string(),
		}),
	))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted; bearer token issued", body = LoginResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "users"
)]
/// POST /login - Exchange credentials for a session token.
#[tracing::instrument(skip_all)]
pub async fn login(
	State(state): State<AppState>,
	payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
	let Json(payload) = payload?;

	let (Some(email), Some(password)) = (payload.email, payload.password) else {
		return Err(AuthError::MissingField.into());
	};

	let user = state.credentials.verify(&email, password.expose()).await?;
	let issued = state.tokens.issue(&user.email)?;

	Ok(Json(LoginResponse {
		message: "Login successful!".to_string(),
		token: issued.token.expose().clone(),
	}))
}
