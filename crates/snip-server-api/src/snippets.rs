// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to store a snippet.
///
/// Both fields are optional at the parsing stage so that a missing field and a
/// malformed body produce the same `400 {error}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateSnippetRequest {
	#[serde(default)]
	pub language: Option<String>,
	#[serde(default)]
	pub code: Option<String>,
}

/// A just-stored snippet. `code` is the sealed form `"<hex nonce>:<hex ciphertext>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SealedSnippetResponse {
	pub id: u64,
	pub language: String,
	#[cfg_attr(feature = "openapi", schema(example = "9f1c2a...:4be0..."))]
	pub code: String,
}

/// A snippet with its body decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SnippetResponse {
	pub id: u64,
	pub language: String,
	pub code: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn create_request_tolerates_missing_fields() {
		let req: CreateSnippetRequest = serde_json::from_str(r#"{"language":"python"}"#).unwrap();
		assert_eq!(req.language.as_deref(), Some("python"));
		assert!(req.code.is_none());

		let empty: CreateSnippetRequest = serde_json::from_str("{}").unwrap();
		assert!(empty.language.is_none());
	}

	#[test]
	fn snippet_response_shape() {
		let json = serde_json::to_value(SnippetResponse {
			id: 1,
			language: "python".to_string(),
			code: "print(1)".to_string(),
		})
		.unwrap();
		assert_eq!(
			json,
			serde_json::json!({"id": 1, "language": "python", "code": "print(1)"})
		);
	}
}
