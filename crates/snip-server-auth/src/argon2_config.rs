// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2 configuration for password hashing.
//!
//! The work factor comes from server configuration. Unit tests in this crate
//! swap in cheap parameters so the suite stays fast.
//!
//! # Security Note
//!
//! The default work factor is Argon2id with:
//! - Memory: 19456 KiB (~19 MiB)
//! - Iterations: 2
//! - Parallelism: 1
//!
//! Test parameters are intentionally weak and MUST NOT be used in production.

use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthError;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordWorkFactor {
	pub memory_kib: u32,
	pub iterations: u32,
	pub parallelism: u32,
}

impl Default for PasswordWorkFactor {
	fn default() -> Self {
		Self {
			memory_kib: Params::DEFAULT_M_COST,
			iterations: Params::DEFAULT_T_COST,
			parallelism: Params::DEFAULT_P_COST,
		}
	}
}

/// Returns an Argon2id instance for `work`.
///
/// In this crate's unit tests (`#[cfg(test)]`) the requested work factor is
/// ignored in favour of 1 MiB / 1 pass / 1 lane.
pub(crate) fn argon2_instance(work: PasswordWorkFactor) -> Result<Argon2<'static>, AuthError> {
	#[cfg(test)]
	let work = {
		let _ = work;
		PasswordWorkFactor {
			memory_kib: 1024,
			iterations: 1,
			parallelism: 1,
		}
	};

	let params = Params::new(work.memory_kib, work.iterations, work.parallelism, None)
		.map_err(|e| AuthError::Configuration(format!("invalid Argon2 parameters: {e}")))?;
	Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
