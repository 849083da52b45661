// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for sensitive values held by the snippet server.
//!
//! The server keeps three kinds of secret material in memory: the AES key used
//! to seal snippet bodies, the secret used to sign session tokens, and
//! plaintext passwords while they are being hashed or verified. All of them
//! travel wrapped in [`Secret<T>`], which:
//!
//! - formats as `[REDACTED]` through `Debug`, `Display` and `Serialize`
//! - zeroizes the inner value on drop
//! - has no `Deref`; callers reach the value only through [`Secret::expose`]
//!
//! ```
//! use snip_common_secret::SecretString;
//!
//! let jwt_secret = SecretString::new("signing-secret".to_string());
//! assert_eq!(format!("{jwt_secret}"), "[REDACTED]");
//! assert_eq!(jwt_secret.expose(), "signing-secret");
//! ```
//!
//! Structured logging goes through `Display`/`Debug`, so
//! `tracing::info!(key = %secret)` records the placeholder, never the value.

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed in place of any secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value that refuses to print itself.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Secret text: signing secrets, passwords.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the wrapped value. Every read of secret material goes through here.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// Returns true when the wrapped string has no characters.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Secret::new(value)
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	// Serializing writes the placeholder so config dumps and JSON responses stay clean.
	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}
