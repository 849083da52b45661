// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration and login.
//!
//! Password work runs on the blocking pool via `tokio::task::spawn_blocking`
//! so that Argon2 never stalls the async executor.
//!
//! Login for an unknown email still verifies the supplied password against a
//! dummy hash computed at startup with the same work factor, so the response
//! time does not reveal whether the account exists.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::argon2_config::PasswordWorkFactor;
use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::types::User;
use crate::user_store::UserStore;

const DUMMY_PASSWORD: &str = "snip-dummy-password-for-timing";

pub struct CredentialStore {
	users: Arc<dyn UserStore>,
	work: PasswordWorkFactor,
	dummy_hash: String,
}

impl CredentialStore {
	/// Build a credential store. Computes the dummy hash, so this does one
	/// Argon2 run and should be called at startup, not per request.
	pub fn new(users: Arc<dyn UserStore>, work: PasswordWorkFactor) -> Result<Self, AuthError> {
		let dummy_hash = hash_password(DUMMY_PASSWORD, work)?;
		Ok(Self {
			users,
			work,
			dummy_hash,
		})
	}

	pub fn users(&self) -> &Arc<dyn UserStore> {
		&self.users
	}

	#[instrument(skip(self, password), fields(email = %email))]
	pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
		if email.is_empty() || password.is_empty() {
			return Err(AuthError::MissingField);
		}

		// Skip the hash for an obvious duplicate. The store re-checks atomically.
		if self.users.find_by_email(email).await?.is_some() {
			return Err(AuthError::EmailAlreadyRegistered);
		}

		let password = password.to_string();
		let work = self.work;
		let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, work))
			.await
			.map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))??;

		let user = self
			.users
			.insert(User {
				email: email.to_string(),
				password_hash,
				created_at: Utc::now(),
			})
			.await?;

		info!("user registered");
		Ok(user)
	}

	#[instrument(skip(self, password), fields(email = %email))]
	pub async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
		if email.is_empty() || password.is_empty() {
			return Err(AuthError::MissingField);
		}

		let user = self.users.find_by_email(email).await?;
		let stored_hash = match &user {
			Some(user) => user.password_hash.clone(),
			None => self.dummy_hash.clone(),
		};

		let password = password.to_string();
		let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
			.await
			.map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))??;

		match user {
			Some(user) if matches => Ok(user),
			_ => {
				warn!("login rejected");
				Err(AuthError::InvalidCredentials)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::user_store::InMemoryUserStore;

	fn store() -> CredentialStore {
		CredentialStore::new(
			Arc::new(InMemoryUserStore::new()),
			PasswordWorkFactor::default(),
		)
		.unwrap()
	}

	mod register {
		use super::*;

		#[tokio::test]
		async fn stores_a_hash_not_the_password() {
			let creds = store();
			let user = creds.register("ada@example.com", "s3cret").await.unwrap();

			assert_eq!(user.email, "ada@example.com");
			assert!(user.password_hash.starts_with("$argon2id$"));
			assert!(!user.password_hash.contains("s3cret"));
		}

		#[tokio::test]
		async fn rejects_missing_fields() {
			let creds = store();
			assert!(matches!(
				creds.register("", "pw").await,
				Err(AuthError::MissingField)
			));
			assert!(matches!(
				creds.register("ada@example.com", "").await,
				Err(AuthError::MissingField)
			));
		}

		#[tokio::test]
		async fn rejects_duplicate_email() {
			let creds = store();
			creds.register("ada@example.com", "first").await.unwrap();

			let err = creds.register("ada@example.com", "second").await.unwrap_err();
			assert!(matches!(err, AuthError::EmailAlreadyRegistered));
		}
	}

	mod verify {
		use super::*;

		#[tokio::test]
		async fn accepts_correct_password() {
			let creds = store();
			creds.register("ada@example.com", "s3cret").await.unwrap();

			let user = creds.verify("ada@example.com", "s3cret").await.unwrap();
			assert_eq!(user.email, "ada@example.com");
		}

		#[tokio::test]
		async fn wrong_password_and_unknown_email_are_indistinguishable() {
			let creds = store();
			creds.register("ada@example.com", "s3cret").await.unwrap();

			let wrong_password = creds.verify("ada@example.com", "nope").await.unwrap_err();
			let unknown_email = creds.verify("bob@example.com", "s3cret").await.unwrap_err();

			assert!(matches!(wrong_password, AuthError::InvalidCredentials));
			assert!(matches!(unknown_email, AuthError::InvalidCredentials));
			assert_eq!(wrong_password.to_string(), unknown_email.to_string());
			assert_eq!(wrong_password.status_code(), unknown_email.status_code());
		}

		#[tokio::test]
		async fn dummy_password_does_not_log_in_unknown_user() {
			let creds = store();
			let err = creds
				.verify("ghost@example.com", DUMMY_PASSWORD)
				.await
				.unwrap_err();
			assert!(matches!(err, AuthError::InvalidCredentials));
		}
	}
}
