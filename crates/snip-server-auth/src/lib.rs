// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication for the snippet server.
//!
//! This crate provides:
//! - [`CredentialStore`] - registration and login over Argon2id password hashes
//! - [`SessionTokenService`] - HS256-signed session tokens with a fixed lifetime
//! - [`authenticate_header`] - bearer token validation for protected routes
//!
//! # Security Principles
//!
//! - Passwords are hashed with a per-user random salt and never stored or logged
//! - Login failures do not reveal whether an account exists
//! - Token signatures are compared in constant time

pub mod argon2_config;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod password;
pub mod session_token;
pub mod types;
pub mod user_store;

pub use argon2_config::PasswordWorkFactor;
pub use credentials::CredentialStore;
pub use error::{AuthError, INVALID_TOKEN_MESSAGE, NO_TOKEN_MESSAGE};
pub use middleware::{authenticate_header, authenticate_headers};
pub use password::{hash_password, verify_password};
pub use session_token::SessionTokenService;
pub use types::{IssuedToken, SessionClaims, User};
pub use user_store::{InMemoryUserStore, UserStore};
