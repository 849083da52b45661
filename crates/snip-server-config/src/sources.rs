// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::secret_env::load_secret_env;
use crate::sections::{
	AuthConfigLayer, HttpConfigLayer, LoggingConfigLayer, SecretsConfigLayer, ENCRYPTION_KEY_VAR,
	JWT_SECRET_VAR,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/snip/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::FileRead {
			path: self.path.clone(),
			source,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
				path: self.path.clone(),
				source,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `SNIP_SERVER_<FIELD>`. `PORT` is honoured as a fallback for the
/// listener port so the server runs unchanged on platforms that inject it.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			auth: Some(load_auth_from_env()?),
			secrets: Some(load_secrets_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u32(name: &str) -> Result<Option<u32>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u32 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	let port = match env_u16("SNIP_SERVER_PORT")? {
		Some(port) => Some(port),
		None => env_u16("PORT")?,
	};

	Ok(HttpConfigLayer {
		host: env_var("SNIP_SERVER_HOST"),
		port,
	})
}

fn load_auth_from_env() -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		token_ttl_secs: env_u64("SNIP_SERVER_TOKEN_TTL_SECS")?,
		argon2_memory_kib: env_u32("SNIP_SERVER_ARGON2_MEMORY_KIB")?,
		argon2_iterations: env_u32("SNIP_SERVER_ARGON2_ITERATIONS")?,
		argon2_parallelism: env_u32("SNIP_SERVER_ARGON2_PARALLELISM")?,
	})
}

fn load_secrets_from_env() -> Result<SecretsConfigLayer, ConfigError> {
	Ok(SecretsConfigLayer {
		encryption_key: load_secret_env(ENCRYPTION_KEY_VAR)?,
		jwt_secret: load_secret_env(JWT_SECRET_VAR)?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("SNIP_SERVER_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.secrets.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/snip/server.toml").load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[http]\nport = 7000").unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(layer.http.unwrap().port, Some(7000));
	}

	#[test]
	fn test_toml_source_rejects_garbage() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[http\nport = ").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_u64_rejects_non_numeric() {
		let var = "SNIP_TEST_TTL_NOT_A_NUMBER_5173";
		std::env::set_var(var, "one-day");
		let err = env_u64(var).unwrap_err();
		assert!(err.to_string().contains("invalid u64 value 'one-day'"));
		std::env::remove_var(var);
	}

	#[test]
	fn test_env_var_treats_empty_as_unset() {
		let var = "SNIP_TEST_EMPTY_VALUE_5173";
		std::env::set_var(var, "");
		assert!(env_var(var).is_none());
		std::env::remove_var(var);
	}

	mod env_source {
		use super::*;
		use std::sync::Mutex;

		static ENV_MUTEX: Mutex<()> = Mutex::new(());

		/// Every variable `EnvSource` reads. Cleared before each test so the
		/// host environment cannot leak in.
		const SERVER_VARS: &[&str] = &[
			"SNIP_SERVER_HOST",
			"SNIP_SERVER_PORT",
			"PORT",
			"SNIP_SERVER_TOKEN_TTL_SECS",
			"SNIP_SERVER_ARGON2_MEMORY_KIB",
			"SNIP_SERVER_ARGON2_ITERATIONS",
			"SNIP_SERVER_ARGON2_PARALLELISM",
			"SNIP_SERVER_LOG_LEVEL",
			"SNIP_SERVER_ENCRYPTION_KEY",
			"SNIP_SERVER_ENCRYPTION_KEY_FILE",
			"SNIP_SERVER_JWT_SECRET",
			"SNIP_SERVER_JWT_SECRET_FILE",
		];

		fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> std::thread::Result<R>
		where
			F: FnOnce() -> R + std::panic::UnwindSafe,
		{
			let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
			let original: Vec<_> = SERVER_VARS
				.iter()
				.map(|k| (*k, std::env::var(k).ok()))
				.collect();

			for k in SERVER_VARS {
				std::env::remove_var(k);
			}
			for (k, v) in vars {
				std::env::set_var(k, v);
			}

			let result = std::panic::catch_unwind(f);

			for (k, original_val) in &original {
				match original_val {
					Some(v) => std::env::set_var(k, v),
					None => std::env::remove_var(k),
				}
			}

			result
		}

		#[test]
		fn server_port_wins_over_port() {
			let layer = with_env_vars(
				&[("SNIP_SERVER_PORT", "4100"), ("PORT", "5100")],
				|| EnvSource.load().unwrap(),
			)
			.unwrap();
			assert_eq!(layer.http.unwrap().port, Some(4100));
		}

		#[test]
		fn port_is_used_when_server_port_is_unset() {
			let layer = with_env_vars(&[("PORT", "5200")], || EnvSource.load().unwrap()).unwrap();
			assert_eq!(layer.http.unwrap().port, Some(5200));
		}

		#[test]
		fn snip_server_vars_are_parsed() {
			let layer = with_env_vars(
				&[
					("SNIP_SERVER_HOST", "127.0.0.1"),
					("SNIP_SERVER_TOKEN_TTL_SECS", "3600"),
					("SNIP_SERVER_ARGON2_MEMORY_KIB", "65536"),
					("SNIP_SERVER_LOG_LEVEL", "debug"),
				],
				|| EnvSource.load().unwrap(),
			)
			.unwrap();

			let http = layer.http.unwrap();
			assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
			assert_eq!(http.port, None);
			let auth = layer.auth.unwrap();
			assert_eq!(auth.token_ttl_secs, Some(3600));
			assert_eq!(auth.argon2_memory_kib, Some(65_536));
			assert_eq!(auth.argon2_iterations, None);
			assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
		}

		#[test]
		fn bad_argon2_value_is_invalid_value() {
			let err = with_env_vars(&[("SNIP_SERVER_ARGON2_ITERATIONS", "two")], || {
				EnvSource.load().unwrap_err()
			})
			.unwrap();
			assert!(matches!(
				err,
				ConfigError::InvalidValue { ref key, .. } if key == "SNIP_SERVER_ARGON2_ITERATIONS"
			));
		}

		#[test]
		fn env_overrides_toml_overrides_defaults() {
			let mut file = NamedTempFile::new().unwrap();
			writeln!(
				file,
				r#"[http]
host = "10.0.0.1"
port = 7000

[auth]
token_ttl_secs = 60

[secrets]
encryption_key = "0123456789abcdef0123456789abcdef"
jwt_secret = "from-file""#
			)
			.unwrap();
			let path = file.path().to_path_buf();

			let config = with_env_vars(
				&[
					("SNIP_SERVER_PORT", "4300"),
					("SNIP_SERVER_JWT_SECRET", "from-env"),
				],
				move || {
					crate::load_from_sources(vec![
						Box::new(EnvSource),
						Box::new(TomlSource::new(path)),
						Box::new(DefaultsSource),
					])
					.unwrap()
				},
			)
			.unwrap();

			assert_eq!(config.http.port, 4300);
			assert_eq!(config.http.host, "10.0.0.1");
			assert_eq!(config.auth.token_ttl_secs, 60);
			assert_eq!(config.auth.argon2_iterations, 2);
			assert_eq!(config.secrets.jwt_secret.expose(), "from-env");
			assert_eq!(
				config.secrets.encryption_key.expose(),
				"0123456789abcdef0123456789abcdef"
			);
		}
	}
}
