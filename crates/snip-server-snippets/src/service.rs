// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet operations: encrypt on the way in, decrypt on the way out.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::cipher::SnippetCipher;
use crate::error::{SnippetError, SnippetResult};
use crate::store::SnippetStore;
use crate::types::{DecryptedSnippet, Snippet};

pub struct SnippetService {
	store: Arc<dyn SnippetStore>,
	cipher: SnippetCipher,
}

impl SnippetService {
	pub fn new(store: Arc<dyn SnippetStore>, cipher: SnippetCipher) -> Self {
		Self { store, cipher }
	}

	/// Encrypt `code` and store it. Returns the sealed record.
	#[instrument(skip(self, code), fields(code_len = code.len()))]
	pub async fn create(&self, language: &str, code: &str) -> SnippetResult<Snippet> {
		if language.is_empty() || code.is_empty() {
			return Err(SnippetError::MissingField);
		}

		let sealed = self.cipher.encrypt(code)?;
		let snippet = self.store.insert(language.to_string(), sealed).await?;

		info!(id = snippet.id, "snippet stored");
		Ok(snippet)
	}

	/// All snippets, decrypted. Bodies that fail to decrypt are replaced by
	/// [`crate::DECRYPTION_FAILED_PLACEHOLDER`].
	#[instrument(skip(self))]
	pub async fn list(&self) -> SnippetResult<Vec<DecryptedSnippet>> {
		let snippets = self.store.list().await?;
		Ok(snippets.into_iter().map(|s| self.open(s)).collect())
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: u64) -> SnippetResult<DecryptedSnippet> {
		let snippet = self.store.get_by_id(id).await?;
		Ok(self.open(snippet))
	}

	pub async fn count(&self) -> SnippetResult<usize> {
		self.store.count().await
	}

	fn open(&self, snippet: Snippet) -> DecryptedSnippet {
		let code = self.cipher.decrypt_or_placeholder(&snippet.code);
		DecryptedSnippet {
			id: snippet.id,
			language: snippet.language,
			code,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cipher::DECRYPTION_FAILED_PLACEHOLDER;
	use crate::store::InMemorySnippetStore;
	use crate::types::SealedCode;

	const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

	fn service_with_store() -> (SnippetService, Arc<InMemorySnippetStore>) {
		let store = Arc::new(InMemorySnippetStore::new());
		let service = SnippetService::new(store.clone(), SnippetCipher::new(KEY).unwrap());
		(service, store)
	}

	#[tokio::test]
	async fn create_stores_ciphertext_not_plaintext() {
		let (service, store) = service_with_store();
		let created = service.create("python", "print(1)").await.unwrap();

		assert_eq!(created.id, 1);
		assert_eq!(created.language, "python");

		let raw = store.get_by_id(1).await.unwrap();
		assert!(!raw.code.to_string().contains("print"));
		assert_ne!(raw.code.ciphertext.as_slice(), b"print(1)".as_slice());
	}

	#[tokio::test]
	async fn get_returns_plaintext() {
		let (service, _) = service_with_store();
		service.create("python", "print(1)").await.unwrap();

		let snippet = service.get(1).await.unwrap();
		assert_eq!(
			snippet,
			DecryptedSnippet {
				id: 1,
				language: "python".to_string(),
				code: "print(1)".to_string(),
			}
		);
	}

	#[tokio::test]
	async fn list_decrypts_in_order() {
		let (service, _) = service_with_store();
		service.create("python", "print(1)").await.unwrap();
		service.create("rust", "fn main() {}").await.unwrap();

		let all = service.list().await.unwrap();
		assert_eq!(all.len(), 2);
		assert_eq!(all[0].code, "print(1)");
		assert_eq!(all[1].code, "fn main() {}");
		assert_eq!(all[1].id, 2);
	}

	#[tokio::test]
	async fn missing_fields_are_rejected() {
		let (service, _) = service_with_store();
		assert!(matches!(
			service.create("", "print(1)").await,
			Err(SnippetError::MissingField)
		));
		assert!(matches!(
			service.create("python", "").await,
			Err(SnippetError::MissingField)
		));
		assert_eq!(service.count().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn unknown_id_is_not_found() {
		let (service, _) = service_with_store();
		assert!(matches!(
			service.get(42).await,
			Err(SnippetError::NotFound(42))
		));
	}

	#[tokio::test]
	async fn undecryptable_record_reads_as_placeholder() {
		let (service, store) = service_with_store();
		store
			.insert(
				"python".to_string(),
				SealedCode {
					nonce: [0; 12],
					ciphertext: vec![0xde, 0xad],
				},
			)
			.await
			.unwrap();
		service.create("rust", "fn main() {}").await.unwrap();

		let all = service.list().await.unwrap();
		assert_eq!(all[0].code, DECRYPTION_FAILED_PLACEHOLDER);
		assert_eq!(all[1].code, "fn main() {}");
	}
}
