// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use snip_common_secret::SecretString;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create an account.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterRequest {
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Password))]
	pub password: Option<SecretString>,
}

/// Request to log in.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Password))]
	pub password: Option<SecretString>,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageResponse {
	pub message: String,
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginResponse {
	pub message: String,
	/// Bearer token for `Authorization: Bearer <token>`. Valid for 24 hours by default.
	pub token: String,
}
