// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token extraction and validation for protected routes.
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Authorization header → "Bearer <token>" → verify → SessionClaims
//!               │                       │                │
//!               └── absent ─────────────┴── empty ───────┴── bad/expired
//!                   401 NoToken             401 NoToken      403 InvalidToken
//! ```
//!
//! # Security Notes
//!
//! - Token values are never logged.
//! - A header that is present but not a `Bearer` credential counts as an
//!   invalid token (403), not a missing one.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};

use crate::error::AuthError;
use crate::session_token::SessionTokenService;
use crate::types::SessionClaims;

const BEARER_PREFIX: &str = "Bearer ";

/// Validate an `Authorization` header value.
///
/// - absent, `Bearer`, or `Bearer ` with nothing after it → [`AuthError::NoToken`]
/// - any other scheme, or a token that fails verification → [`AuthError::InvalidToken`]
///   or [`AuthError::TokenExpired`]
pub fn authenticate_header(
	header: Option<&HeaderValue>,
	tokens: &SessionTokenService,
) -> Result<SessionClaims, AuthError> {
	let Some(header) = header else {
		return Err(AuthError::NoToken);
	};
	let value = header.to_str().map_err(|_| AuthError::InvalidToken)?.trim();

	if value == BEARER_PREFIX.trim_end() {
		return Err(AuthError::NoToken);
	}

	let token = value
		.strip_prefix(BEARER_PREFIX)
		.ok_or(AuthError::InvalidToken)?
		.trim();
	if token.is_empty() {
		return Err(AuthError::NoToken);
	}

	tokens.verify(token)
}

/// [`authenticate_header`] over a request's header map.
pub fn authenticate_headers(
	headers: &HeaderMap,
	tokens: &SessionTokenService,
) -> Result<SessionClaims, AuthError> {
	authenticate_header(headers.get(AUTHORIZATION), tokens)
}
