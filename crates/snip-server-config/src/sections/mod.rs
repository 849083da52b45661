// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod auth;
mod http;
mod logging;
mod secrets;

pub use auth::*;
pub use http::*;
pub use logging::*;
pub use secrets::*;
