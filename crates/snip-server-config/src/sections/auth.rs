// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration: session token horizon and password work factor.

use serde::Deserialize;

/// Session tokens expire this long after issuance unless overridden.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Longest accepted token horizon: one year.
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Argon2id defaults (OWASP minimum: 19 MiB, 2 passes, 1 lane).
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
	pub token_ttl_secs: u64,
	pub argon2_memory_kib: u32,
	pub argon2_iterations: u32,
	pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
			argon2_memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
			argon2_iterations: DEFAULT_ARGON2_ITERATIONS,
			argon2_parallelism: DEFAULT_ARGON2_PARALLELISM,
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub token_ttl_secs: Option<u64>,
	#[serde(default)]
	pub argon2_memory_kib: Option<u32>,
	#[serde(default)]
	pub argon2_iterations: Option<u32>,
	#[serde(default)]
	pub argon2_parallelism: Option<u32>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.token_ttl_secs.is_some() {
			self.token_ttl_secs = other.token_ttl_secs;
		}
		if other.argon2_memory_kib.is_some() {
			self.argon2_memory_kib = other.argon2_memory_kib;
		}
		if other.argon2_iterations.is_some() {
			self.argon2_iterations = other.argon2_iterations;
		}
		if other.argon2_parallelism.is_some() {
			self.argon2_parallelism = other.argon2_parallelism;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			token_ttl_secs: self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
			argon2_memory_kib: self.argon2_memory_kib.unwrap_or(DEFAULT_ARGON2_MEMORY_KIB),
			argon2_iterations: self.argon2_iterations.unwrap_or(DEFAULT_ARGON2_ITERATIONS),
			argon2_parallelism: self
				.argon2_parallelism
				.unwrap_or(DEFAULT_ARGON2_PARALLELISM),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_ttl_defaults_to_one_day() {
		let config = AuthConfigLayer::default().finalize();
		assert_eq!(config.token_ttl_secs, 86_400);
	}

	#[test]
	fn test_work_factor_override() {
		let layer = AuthConfigLayer {
			argon2_iterations: Some(4),
			..Default::default()
		};
		let config = layer.finalize();
		assert_eq!(config.argon2_iterations, 4);
		assert_eq!(config.argon2_memory_kib, DEFAULT_ARGON2_MEMORY_KIB);
	}

	#[test]
	fn test_deserialize_partial_toml() {
		let layer: AuthConfigLayer = toml::from_str("token_ttl_secs = 60").unwrap();
		assert_eq!(layer.token_ttl_secs, Some(60));
		assert!(layer.argon2_memory_kib.is_none());
	}
}
