// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Snippet server.
//!
//! This crate provides an HTTP server that stores code snippets encrypted at
//! rest and serves them back, decrypted, to callers holding a session token.

pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use snip_server_config::ServerConfig;
