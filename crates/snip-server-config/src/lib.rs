// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the snippet server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - `VAR` / `VAR_FILE` loading for the encryption key and signing secret
//! - Consistent environment variable naming (`SNIP_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use snip_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod secret_env;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use secret_env::{load_secret_env, SecretEnvError};
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub auth: AuthConfig,
	pub secrets: SecretsConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`SNIP_SERVER_*`, then `PORT`)
/// 2. Config file (`/etc/snip/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let secrets = layer.secrets.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&auth)?;

	info!(
		host = %http.host,
		port = http.port,
		token_ttl_secs = auth.token_ttl_secs,
		argon2_memory_kib = auth.argon2_memory_kib,
		argon2_iterations = auth.argon2_iterations,
		log_level = %logging.level,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		auth,
		secrets,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.token_ttl_secs == 0 {
		return Err(ConfigError::Validation(
			"SNIP_SERVER_TOKEN_TTL_SECS must be greater than zero".to_string(),
		));
	}

	if auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
		return Err(ConfigError::Validation(format!(
			"SNIP_SERVER_TOKEN_TTL_SECS must be at most {MAX_TOKEN_TTL_SECS}, got {}",
			auth.token_ttl_secs
		)));
	}

	if auth.argon2_iterations == 0 || auth.argon2_parallelism == 0 {
		return Err(ConfigError::Validation(
			"SNIP_SERVER_ARGON2_ITERATIONS and SNIP_SERVER_ARGON2_PARALLELISM must be at least 1"
				.to_string(),
		));
	}

	// Argon2 requires at least 8 KiB of memory per lane.
	if auth.argon2_memory_kib < 8 * auth.argon2_parallelism {
		return Err(ConfigError::Validation(format!(
			"SNIP_SERVER_ARGON2_MEMORY_KIB must be at least {} for parallelism {}",
			8 * auth.argon2_parallelism,
			auth.argon2_parallelism
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use snip_common_secret::SecretString;

	fn valid_secrets() -> SecretsConfigLayer {
		SecretsConfigLayer {
			encryption_key: Some(SecretString::new(
				"0123456789abcdef0123456789abcdef".to_string(),
			)),
			jwt_secret: Some(SecretString::new("test-signing-secret".to_string())),
		}
	}

	#[test]
	fn test_zero_ttl_is_rejected() {
		let auth = AuthConfig {
			token_ttl_secs: 0,
			..Default::default()
		};
		let result = validate_config(&auth);
		assert!(result.unwrap_err().to_string().contains("greater than zero"));
	}

	#[test]
	fn test_oversized_ttl_is_rejected() {
		let auth = AuthConfig {
			token_ttl_secs: 9_000_000_000_000_000,
			..Default::default()
		};
		let err = validate_config(&auth).unwrap_err();
		assert!(err.to_string().contains("must be at most 31536000"));
	}

	#[test]
	fn test_one_year_ttl_is_accepted() {
		let auth = AuthConfig {
			token_ttl_secs: MAX_TOKEN_TTL_SECS,
			..Default::default()
		};
		assert!(validate_config(&auth).is_ok());
	}

	#[test]
	fn test_default_auth_is_valid() {
		assert!(validate_config(&AuthConfig::default()).is_ok());
	}

	#[test]
	fn test_too_little_argon2_memory_is_rejected() {
		let auth = AuthConfig {
			argon2_memory_kib: 4,
			..Default::default()
		};
		assert!(validate_config(&auth).is_err());
	}

	#[test]
	fn test_finalize_requires_secrets() {
		let err = finalize(ServerConfigLayer::default()).unwrap_err();
		assert!(matches!(err, ConfigError::MissingSecret { .. }));
	}

	#[test]
	fn test_finalize_applies_defaults() {
		let config = finalize(ServerConfigLayer {
			secrets: Some(valid_secrets()),
			..Default::default()
		})
		.unwrap();
		assert_eq!(config.http.port, 3000);
		assert_eq!(config.auth.token_ttl_secs, 86_400);
		assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
	}

	#[test]
	fn test_socket_addr() {
		let config = finalize(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: Some("127.0.0.1".to_string()),
				port: Some(9000),
			}),
			secrets: Some(valid_secrets()),
			..Default::default()
		})
		.unwrap();
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}
}
