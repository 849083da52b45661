// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `VAR` / `VAR_FILE` secret loading.
//!
//! Both the snippet encryption key and the token signing secret may be handed
//! to the process either directly in the environment or as a path to a mounted
//! file (Docker and Kubernetes secrets). The file form wins when both are set.

use std::path::PathBuf;
use std::{env, fs};

use snip_common_secret::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load `var` from `{var}_FILE` (one trailing newline stripped) or from `var`.
///
/// Returns `Ok(None)` when neither is set. An empty direct value counts as unset.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(SecretString::new(value))),
		_ => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn unset_var_is_none() {
		let var = "SNIP_TEST_SECRET_UNSET_4821";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn empty_direct_value_is_none() {
		let var = "SNIP_TEST_SECRET_EMPTY_4821";
		env::set_var(var, "");
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());

		env::remove_var(var);
	}

	#[test]
	fn direct_value_is_loaded() {
		let var = "SNIP_TEST_SECRET_DIRECT_4821";
		env::set_var(var, "jwt-signing-secret");
		env::remove_var(format!("{var}_FILE"));

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "jwt-signing-secret");

		env::remove_var(var);
	}

	#[test]
	fn file_value_wins_and_drops_trailing_newline() {
		let var = "SNIP_TEST_SECRET_FILE_4821";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "0123456789abcdef0123456789abcdef").unwrap();

		env::set_var(var, "ignored");
		env::set_var(format!("{var}_FILE"), file.path().to_str().unwrap());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "0123456789abcdef0123456789abcdef");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn missing_file_is_an_error() {
		let var = "SNIP_TEST_SECRET_MISSING_FILE_4821";
		env::set_var(format!("{var}_FILE"), "/nonexistent/snip/secret");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::Io { .. })
		));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "SNIP_TEST_SECRET_EMPTY_PATH_4821";
		env::set_var(format!("{var}_FILE"), "");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::EmptyPath { .. })
		));

		env::remove_var(format!("{var}_FILE"));
	}
}
