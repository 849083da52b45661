// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying `{sub, iat, exp}`. Validity is signature
//! plus expiry only: there is no revocation list, so a leaked token stays
//! usable until `exp`.
//!
//! ```text
//! unissued ──issue──▶ valid ──(now ≥ exp)──▶ expired
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use snip_common_secret::SecretString;
use tracing::{debug, instrument};

use crate::error::AuthError;
use crate::types::{IssuedToken, SessionClaims};

pub struct SessionTokenService {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	ttl: Duration,
}

impl SessionTokenService {
	/// Create a service signing with `secret`. Tokens live for `ttl_secs`.
	///
	/// Fails when the secret is empty or when `now + ttl` is not representable,
	/// so an unusable horizon is caught at startup instead of on first login.
	pub fn new(secret: &SecretString, ttl_secs: u64) -> Result<Self, AuthError> {
		if secret.is_empty() {
			return Err(AuthError::Configuration(
				"session signing secret must not be empty".to_string(),
			));
		}
		let too_large = || AuthError::Configuration(format!("token ttl {ttl_secs}s is too large"));
		let ttl = i64::try_from(ttl_secs)
			.ok()
			.and_then(Duration::try_seconds)
			.ok_or_else(too_large)?;
		Utc::now().checked_add_signed(ttl).ok_or_else(too_large)?;

		let mut validation = Validation::new(Algorithm::HS256);
		validation.leeway = 0;
		validation.set_required_spec_claims(&["exp", "sub"]);

		Ok(Self {
			encoding_key: EncodingKey::from_secret(secret.expose().as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.expose().as_bytes()),
			validation,
			ttl,
		})
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	#[instrument(skip_all, fields(sub = %subject))]
	pub fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
		self.issue_at(subject, Utc::now())
	}

	/// Issue a token as if the current time were `now`.
	pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
		let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
			AuthError::Configuration(format!("token expiry overflows after {now}"))
		})?;
		let claims = SessionClaims {
			sub: subject.to_string(),
			iat: now.timestamp(),
			exp: expires_at.timestamp(),
		};

		let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
			.map_err(|e| AuthError::Internal(format!("failed to encode session token: {e}")))?;

		debug!(exp = claims.exp, "session token issued");
		Ok(IssuedToken {
			token: SecretString::new(token),
			expires_at,
		})
	}

	/// Verify algorithm, signature, then expiry.
	pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
		let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
			.map(|data| data.claims)
			.map_err(|e| match e.kind() {
				ErrorKind::ExpiredSignature => {
					debug!("token expired");
					AuthError::TokenExpired
				}
				kind => {
					debug!(?kind, "token rejected");
					AuthError::InvalidToken
				}
			})?;

		// The decoder accepts `exp == now`; a token is already expired at that second.
		if claims.is_expired_at(Utc::now().timestamp()) {
			debug!(exp = claims.exp, "token expired");
			return Err(AuthError::TokenExpired);
		}

		Ok(claims)
	}
}
