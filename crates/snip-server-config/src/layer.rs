// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by a single source.

use serde::Deserialize;

use crate::sections::{AuthConfigLayer, HttpConfigLayer, LoggingConfigLayer, SecretsConfigLayer};

/// One source's view of the configuration. Every section is optional so that
/// later sources only override what they actually set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
	#[serde(default)]
	pub secrets: Option<SecretsConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(&mut self.auth, other.auth, AuthConfigLayer::merge);
		merge_option(&mut self.secrets, other.secrets, SecretsConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T>(base: &mut Option<T>, overlay: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), overlay) {
		(Some(b), Some(o)) => merge(b, o),
		(None, Some(o)) => *base = Some(o),
		(_, None) => {}
	}
}
