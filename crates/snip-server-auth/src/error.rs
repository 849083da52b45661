// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication error types.

use http::StatusCode;
use thiserror::Error;

/// Message returned when a protected route is called without a bearer token.
pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided.";

/// Message returned for any bearer token that fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token.";

#[derive(Debug, Error)]
pub enum AuthError {
	#[error("Email and password are both required!")]
	MissingField,

	#[error("A user with that email already exists.")]
	EmailAlreadyRegistered,

	/// Unknown email and wrong password share this variant so responses do
	/// not reveal which accounts exist.
	#[error("Invalid email or password.")]
	InvalidCredentials,

	#[error("{}", NO_TOKEN_MESSAGE)]
	NoToken,

	#[error("{}", INVALID_TOKEN_MESSAGE)]
	InvalidToken,

	#[error("{}", INVALID_TOKEN_MESSAGE)]
	TokenExpired,

	#[error("auth configuration error: {0}")]
	Configuration(String),

	#[error("password hashing failed: {0}")]
	PasswordHash(String),

	#[error("internal error: {0}")]
	Internal(String),
}

impl AuthError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			AuthError::MissingField => StatusCode::BAD_REQUEST,
			AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
			AuthError::InvalidCredentials | AuthError::NoToken => StatusCode::UNAUTHORIZED,
			AuthError::InvalidToken | AuthError::TokenExpired => StatusCode::FORBIDDEN,
			AuthError::Configuration(_) | AuthError::PasswordHash(_) | AuthError::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// True for failures the caller did not cause. These are logged and
	/// replaced with a generic message at the HTTP boundary.
	pub fn is_internal(&self) -> bool {
		matches!(
			self,
			AuthError::Configuration(_) | AuthError::PasswordHash(_) | AuthError::Internal(_)
		)
	}
}
