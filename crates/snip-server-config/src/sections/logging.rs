// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration.

use serde::Deserialize;

/// Default `tracing_subscriber::EnvFilter` directive.
pub const DEFAULT_LOG_LEVEL: &str = "info,tower_http=debug";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
	/// EnvFilter directive string, e.g. `info` or `snip_server=debug,info`.
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: DEFAULT_LOG_LEVEL.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfigLayer {
	#[serde(default)]
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: LoggingConfigLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
		}
	}
}
