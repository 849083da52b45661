// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet body encryption.
//!
//! AES-256-GCM with a fresh random 96-bit nonce per encryption. The key is
//! validated once when the cipher is built; per-call failures only come from
//! authentication (wrong key or tampering) or non-UTF-8 plaintext.

use aes_gcm::{
	aead::{Aead, KeyInit, OsRng},
	Aes256Gcm, Nonce,
};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{SnippetError, SnippetResult};
use crate::types::{SealedCode, NONCE_SIZE};

/// Size of the encryption key in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Substituted for a snippet body that fails to decrypt on the read path.
pub const DECRYPTION_FAILED_PLACEHOLDER: &str = "[decryption failed]";

#[derive(Clone)]
pub struct SnippetCipher {
	cipher: Aes256Gcm,
}

impl std::fmt::Debug for SnippetCipher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SnippetCipher").finish_non_exhaustive()
	}
}

/// Generate a random nonce.
///
/// 96-bit random nonces from OsRng. The same (key, nonce) pair must never be
/// reused; collision probability reaches 2^-32 only after roughly 2^32
/// encryptions under one key.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
	let mut nonce = [0u8; NONCE_SIZE];
	OsRng.fill_bytes(&mut nonce);
	nonce
}

impl SnippetCipher {
	/// Build a cipher from raw key bytes. `key` must be exactly [`KEY_SIZE`] long.
	pub fn new(key: &[u8]) -> SnippetResult<Self> {
		if key.len() != KEY_SIZE {
			return Err(SnippetError::InvalidKeySize {
				expected: KEY_SIZE,
				actual: key.len(),
			});
		}

		let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| SnippetError::InvalidKeySize {
			expected: KEY_SIZE,
			actual: key.len(),
		})?;
		Ok(Self { cipher })
	}

	pub fn encrypt(&self, plaintext: &str) -> SnippetResult<SealedCode> {
		let nonce_bytes = generate_nonce();
		let nonce = Nonce::from_slice(&nonce_bytes);

		let ciphertext = self
			.cipher
			.encrypt(nonce, plaintext.as_bytes())
			.map_err(|e| SnippetError::Encryption(format!("snippet encryption failed: {e}")))?;

		Ok(SealedCode {
			nonce: nonce_bytes,
			ciphertext,
		})
	}

	pub fn decrypt(&self, sealed: &SealedCode) -> SnippetResult<String> {
		let nonce = Nonce::from_slice(&sealed.nonce);

		let plaintext = Zeroizing::new(
			self.cipher
				.decrypt(nonce, sealed.ciphertext.as_slice())
				.map_err(|e| SnippetError::Decryption(format!("snippet decryption failed: {e}")))?,
		);

		std::str::from_utf8(&plaintext)
			.map(str::to_string)
			.map_err(|e| SnippetError::Decryption(format!("plaintext is not UTF-8: {e}")))
	}

	/// Decrypt, falling back to [`DECRYPTION_FAILED_PLACEHOLDER`].
	pub fn decrypt_or_placeholder(&self, sealed: &SealedCode) -> String {
		match self.decrypt(sealed) {
			Ok(plaintext) => plaintext,
			Err(e) => {
				tracing::warn!(error = %e, "snippet failed to decrypt, returning placeholder");
				DECRYPTION_FAILED_PLACEHOLDER.to_string()
			}
		}
	}
}
