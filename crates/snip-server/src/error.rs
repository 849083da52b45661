// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP boundary error type.
//!
//! Every error response has the body `{"error": "<message>"}`. Server-side
//! faults are logged in full and answered with a generic message.

use axum::{
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use snip_server_api::ErrorResponse;
use snip_server_auth::AuthError;
use snip_server_config::ConfigError;
use snip_server_snippets::SnippetError;
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Client-facing message for any body that fails JSON extraction.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body.";

#[derive(Debug, Error)]
pub enum ServerError {
	#[error(transparent)]
	Snippet(#[from] SnippetError),

	#[error(transparent)]
	Auth(#[from] AuthError),

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("{0}")]
	BadRequest(String),
}

impl ServerError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServerError::Snippet(e) => e.status_code(),
			ServerError::Auth(e) => e.status_code(),
			ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
		}
	}

	pub fn is_internal(&self) -> bool {
		match self {
			ServerError::Snippet(e) => e.is_internal(),
			ServerError::Auth(e) => e.is_internal(),
			ServerError::Config(_) => true,
			ServerError::BadRequest(_) => false,
		}
	}
}

impl From<JsonRejection> for ServerError {
	fn from(rejection: JsonRejection) -> Self {
		tracing::debug!(rejection = %rejection.body_text(), "json body rejected");
		ServerError::BadRequest(INVALID_JSON_MESSAGE.to_string())
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		let message = if self.is_internal() {
			tracing::error!(error = %self, "request failed");
			INTERNAL_ERROR_MESSAGE.to_string()
		} else {
			tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
			self.to_string()
		};

		(status, Json(ErrorResponse::new(message))).into_response()
	}
}
