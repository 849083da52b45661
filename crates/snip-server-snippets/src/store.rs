// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet storage. Stores only ever see sealed bodies.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{SnippetError, SnippetResult};
use crate::types::{SealedCode, Snippet};

#[async_trait]
pub trait SnippetStore: Send + Sync {
	/// Assign the next id and append. Ids start at 1 and follow insertion order.
	async fn insert(&self, language: String, code: SealedCode) -> SnippetResult<Snippet>;
	/// All snippets in insertion order.
	async fn list(&self) -> SnippetResult<Vec<Snippet>>;
	async fn get_by_id(&self, id: u64) -> SnippetResult<Snippet>;
	async fn count(&self) -> SnippetResult<usize>;
}

/// Volatile snippet storage. Contents are lost when the process exits.
pub struct InMemorySnippetStore {
	snippets: RwLock<Vec<Snippet>>,
	next_id: AtomicU64,
}

impl Default for InMemorySnippetStore {
	fn default() -> Self {
		Self {
			snippets: RwLock::new(Vec::new()),
			next_id: AtomicU64::new(1),
		}
	}
}

impl InMemorySnippetStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SnippetStore for InMemorySnippetStore {
	async fn insert(&self, language: String, code: SealedCode) -> SnippetResult<Snippet> {
		// Id is taken under the write lock so vector order equals id order.
		let mut snippets = self.snippets.write().await;
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		let snippet = Snippet { id, language, code };
		snippets.push(snippet.clone());
		Ok(snippet)
	}

	async fn list(&self) -> SnippetResult<Vec<Snippet>> {
		Ok(self.snippets.read().await.clone())
	}

	async fn get_by_id(&self, id: u64) -> SnippetResult<Snippet> {
		self.snippets
			.read()
			.await
			.iter()
			.find(|s| s.id == id)
			.cloned()
			.ok_or(SnippetError::NotFound(id))
	}

	async fn count(&self) -> SnippetResult<usize> {
		Ok(self.snippets.read().await.len())
	}
}
