// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2id password hashing.
//!
//! Both functions are CPU-bound and synchronous. Async callers run them on the
//! blocking pool (see [`crate::credentials::CredentialStore`]).

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::argon2_config::{argon2_instance, PasswordWorkFactor};
use crate::error::AuthError;

/// Hash `password` with a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str, work: PasswordWorkFactor) -> Result<String, AuthError> {
	let salt = SaltString::generate(&mut OsRng);
	let argon2 = argon2_instance(work)?;

	argon2
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// The cost parameters are read from the hash itself, so hashes produced under
/// an older work factor keep verifying. Comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
	let parsed = PasswordHash::new(hash)
		.map_err(|e| AuthError::PasswordHash(format!("invalid stored hash: {e}")))?;

	Ok(Argon2::default()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok())
}
