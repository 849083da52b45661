// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process secrets: the snippet encryption key and the session signing secret.
//!
//! Both are required. [`SecretsConfigLayer::finalize`] refuses to produce a
//! [`SecretsConfig`] when either is absent or when the encryption key is not
//! exactly [`ENCRYPTION_KEY_BYTES`] long, so a misconfigured server never binds
//! its listener.

use serde::Deserialize;
use snip_common_secret::SecretString;

use crate::error::ConfigError;

pub const ENCRYPTION_KEY_VAR: &str = "SNIP_SERVER_ENCRYPTION_KEY";
pub const JWT_SECRET_VAR: &str = "SNIP_SERVER_JWT_SECRET";

/// AES-256 key length. The key is taken as the raw bytes of the configured value.
pub const ENCRYPTION_KEY_BYTES: usize = 32;

/// Resolved secrets.
#[derive(Debug, Clone)]
pub struct SecretsConfig {
	pub encryption_key: SecretString,
	pub jwt_secret: SecretString,
}

/// Secrets layer (partial, for merging). Values may come from TOML or env.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsConfigLayer {
	#[serde(default)]
	pub encryption_key: Option<SecretString>,
	#[serde(default)]
	pub jwt_secret: Option<SecretString>,
}

impl SecretsConfigLayer {
	pub fn merge(&mut self, other: SecretsConfigLayer) {
		if other.encryption_key.is_some() {
			self.encryption_key = other.encryption_key;
		}
		if other.jwt_secret.is_some() {
			self.jwt_secret = other.jwt_secret;
		}
	}

	pub fn finalize(self) -> Result<SecretsConfig, ConfigError> {
		let encryption_key = self
			.encryption_key
			.filter(|k| !k.is_empty())
			.ok_or_else(|| ConfigError::MissingSecret {
				var: ENCRYPTION_KEY_VAR.to_string(),
			})?;

		let key_len = encryption_key.expose().len();
		if key_len != ENCRYPTION_KEY_BYTES {
			return Err(ConfigError::InvalidValue {
				key: ENCRYPTION_KEY_VAR.to_string(),
				message: format!("must be exactly {ENCRYPTION_KEY_BYTES} bytes, got {key_len}"),
			});
		}

		let jwt_secret = self
			.jwt_secret
			.filter(|s| !s.is_empty())
			.ok_or_else(|| ConfigError::MissingSecret {
				var: JWT_SECRET_VAR.to_string(),
			})?;

		Ok(SecretsConfig {
			encryption_key,
			jwt_secret,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layer(key: Option<&str>, jwt: Option<&str>) -> SecretsConfigLayer {
		SecretsConfigLayer {
			encryption_key: key.map(|k| SecretString::new(k.to_string())),
			jwt_secret: jwt.map(|s| SecretString::new(s.to_string())),
		}
	}

	#[test]
	fn finalize_accepts_valid_secrets() {
		let config = layer(Some("0123456789abcdef0123456789abcdef"), Some("sign-me"))
			.finalize()
			.unwrap();
		assert_eq!(config.encryption_key.expose().len(), 32);
		assert_eq!(config.jwt_secret.expose(), "sign-me");
	}

	#[test]
	fn missing_encryption_key_fails() {
		let err = layer(None, Some("sign-me")).finalize().unwrap_err();
		assert!(matches!(err, ConfigError::MissingSecret { ref var } if var == ENCRYPTION_KEY_VAR));
	}

	#[test]
	fn missing_jwt_secret_fails() {
		let err = layer(Some("0123456789abcdef0123456789abcdef"), None)
			.finalize()
			.unwrap_err();
		assert!(matches!(err, ConfigError::MissingSecret { ref var } if var == JWT_SECRET_VAR));
	}

	#[test]
	fn empty_jwt_secret_counts_as_missing() {
		let err = layer(Some("0123456789abcdef0123456789abcdef"), Some(""))
			.finalize()
			.unwrap_err();
		assert!(matches!(err, ConfigError::MissingSecret { .. }));
	}

	#[test]
	fn short_key_is_rejected() {
		let err = layer(Some("too-short"), Some("sign-me")).finalize().unwrap_err();
		assert!(err.to_string().contains("exactly 32 bytes, got 9"));
	}

	#[test]
	fn long_key_is_rejected() {
		let long = "k".repeat(33);
		let err = layer(Some(&long), Some("sign-me")).finalize().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}

	#[test]
	fn merge_keeps_base_when_overlay_empty() {
		let mut base = layer(Some("a"), Some("b"));
		base.merge(SecretsConfigLayer::default());
		assert_eq!(base.encryption_key.unwrap().expose(), "a");
		assert_eq!(base.jwt_secret.unwrap().expose(), "b");
	}

	#[test]
	fn debug_output_is_redacted() {
		let config = layer(Some("0123456789abcdef0123456789abcdef"), Some("sign-me"))
			.finalize()
			.unwrap();
		let out = format!("{config:?}");
		assert!(!out.contains("sign-me"));
		assert!(!out.contains("0123456789abcdef"));
	}
}
