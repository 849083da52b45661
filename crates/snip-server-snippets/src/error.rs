// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use http::StatusCode;
use thiserror::Error;

pub type SnippetResult<T> = Result<T, SnippetError>;

#[derive(Debug, Error)]
pub enum SnippetError {
	#[error("Language AND code are both required!")]
	MissingField,

	#[error("Snippet not found")]
	NotFound(u64),

	#[error("invalid key size: expected {expected} bytes, got {actual}")]
	InvalidKeySize { expected: usize, actual: usize },

	#[error("malformed ciphertext: {0}")]
	MalformedCiphertext(String),

	#[error("encryption failed: {0}")]
	Encryption(String),

	#[error("decryption failed: {0}")]
	Decryption(String),
}

impl SnippetError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			SnippetError::MissingField => StatusCode::BAD_REQUEST,
			SnippetError::NotFound(_) => StatusCode::NOT_FOUND,
			SnippetError::InvalidKeySize { .. }
			| SnippetError::MalformedCiphertext(_)
			| SnippetError::Encryption(_)
			| SnippetError::Decryption(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	pub fn is_internal(&self) -> bool {
		self.status_code().is_server_error()
	}
}
