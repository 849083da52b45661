// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet records and their sealed payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SnippetError;

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Encrypted snippet body: nonce plus AES-GCM ciphertext (tag included).
///
/// Rendered as `"<hex nonce>:<hex ciphertext>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedCode {
	pub nonce: [u8; NONCE_SIZE],
	pub ciphertext: Vec<u8>,
}

impl fmt::Display for SealedCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", hex::encode(self.nonce), hex::encode(&self.ciphertext))
	}
}

impl FromStr for SealedCode {
	type Err = SnippetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s.split(':');
		let (Some(nonce_hex), Some(ciphertext_hex), None) = (parts.next(), parts.next(), parts.next())
		else {
			return Err(SnippetError::MalformedCiphertext(
				"expected exactly two ':'-separated components".to_string(),
			));
		};

		let nonce_bytes = hex::decode(nonce_hex)
			.map_err(|e| SnippetError::MalformedCiphertext(format!("nonce: {e}")))?;
		let nonce: [u8; NONCE_SIZE] = nonce_bytes.as_slice().try_into().map_err(|_| {
			SnippetError::MalformedCiphertext(format!(
				"nonce must be {NONCE_SIZE} bytes, got {}",
				nonce_bytes.len()
			))
		})?;

		let ciphertext = hex::decode(ciphertext_hex)
			.map_err(|e| SnippetError::MalformedCiphertext(format!("ciphertext: {e}")))?;

		Ok(Self { nonce, ciphertext })
	}
}

impl Serialize for SealedCode {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// A stored snippet. `code` is never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
	pub id: u64,
	pub language: String,
	pub code: SealedCode,
}

/// A snippet with its body decrypted for a read response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptedSnippet {
	pub id: u64,
	pub language: String,
	pub code: String,
}
