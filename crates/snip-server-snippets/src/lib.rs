// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Encrypted-at-rest snippet storage.
//!
//! Snippet bodies are sealed with AES-256-GCM before they reach a
//! [`SnippetStore`] and opened again on the read path by [`SnippetService`].

pub mod cipher;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use cipher::{SnippetCipher, DECRYPTION_FAILED_PLACEHOLDER, KEY_SIZE};
pub use error::{SnippetError, SnippetResult};
pub use service::SnippetService;
pub use store::{InMemorySnippetStore, SnippetStore};
pub use types::{DecryptedSnippet, SealedCode, Snippet, NONCE_SIZE};
