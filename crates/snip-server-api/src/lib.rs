// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod error;
pub mod health;
pub mod snippets;
pub mod users;

pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use snippets::{CreateSnippetRequest, SealedSnippetResponse, SnippetResponse};
pub use users::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
