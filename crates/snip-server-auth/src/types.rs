// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core authentication types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snip_common_secret::SecretString;

/// A registered account.
///
/// `password_hash` is a PHC string (`$argon2id$v=19$...`). It is skipped
/// during serialization and elided from `Debug`.
#[derive(Clone, Serialize)]
pub struct User {
	pub email: String,
	#[serde(skip_serializing)]
	pub password_hash: String,
	pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("User")
			.field("email", &self.email)
			.field("password_hash", &snip_common_secret::REDACTED)
			.field("created_at", &self.created_at)
			.finish()
	}
}

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
	/// Subject: the authenticated user's email.
	pub sub: String,
	/// Issued-at, seconds since the Unix epoch.
	pub iat: i64,
	/// Expiry, seconds since the Unix epoch.
	pub exp: i64,
}

impl SessionClaims {
	pub fn is_expired_at(&self, now: i64) -> bool {
		self.exp <= now
	}
}

/// A freshly minted session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
	pub token: SecretString,
	pub expires_at: DateTime<Utc>,
}
