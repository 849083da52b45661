// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::AuthError;
use crate::types::User;

#[async_trait]
pub trait UserStore: Send + Sync {
	/// Insert a new account. Fails with [`AuthError::EmailAlreadyRegistered`]
	/// if the email is taken; the check and the insert are one atomic step.
	async fn insert(&self, user: User) -> Result<User, AuthError>;
	async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
	async fn count(&self) -> Result<usize, AuthError>;
}

/// Volatile account storage. Contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryUserStore {
	users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl UserStore for InMemoryUserStore {
	async fn insert(&self, user: User) -> Result<User, AuthError> {
		let mut users = self.users.write().await;
		if users.contains_key(&user.email) {
			debug!("email already registered");
			return Err(AuthError::EmailAlreadyRegistered);
		}
		users.insert(user.email.clone(), user.clone());
		Ok(user)
	}

	async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
		Ok(self.users.read().await.get(email).cloned())
	}

	async fn count(&self) -> Result<usize, AuthError> {
		Ok(self.users.read().await.len())
	}
}
