//! Access token values, the two-state token lifecycle, and token endpoint decoding.

// self
use crate::{_prelude::*, error::AuthError};

/// Bearer access token plus the instant it stops being usable.
#[derive(Clone)]
pub struct AccessToken {
	secret: oauth2::AccessToken,
	issued_at: OffsetDateTime,
	expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Wraps a token issued at `issued_at` that expires at `expires_at`.
	pub fn new(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_at: OffsetDateTime,
	) -> Self {
		Self { secret: oauth2::AccessToken::new(secret.into()), issued_at, expires_at }
	}

	/// Builds a token from a relative lifetime, as reported by `expires_in`.
	pub fn expiring_in(
		secret: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Result<Self, AuthError> {
		if !expires_in.is_positive() {
			return Err(AuthError::NonPositiveExpiresIn);
		}

		let expires_at =
			issued_at.checked_add(expires_in).ok_or(AuthError::ExpiresInOutOfRange)?;

		Ok(Self::new(secret, issued_at, expires_at))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn secret(&self) -> &str {
		self.secret.secret()
	}

	/// Instant the token endpoint answered.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// First instant at which the token is no longer valid.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// Returns `true` if the token is still valid at `instant`.
	///
	/// The comparison is strict: a token whose expiry equals `instant` is already expired, so a
	/// request is never sent with a token the API is about to reject.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at > instant
	}

	/// Returns `true` if the token is valid relative to the current clock.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Value for the `Authorization` header of resource requests.
	pub fn authorization(&self) -> String {
		format!("bearer {}", self.secret())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Token manager state: either nothing cached or a fully populated token.
#[derive(Clone, Debug, Default)]
pub enum TokenState {
	/// No exchange has succeeded yet (or the token was invalidated).
	#[default]
	NoToken,
	/// A token and its expiry, always set together.
	HasToken(AccessToken),
}
impl TokenState {
	/// Returns the token if one is stored and still valid at `instant`.
	pub fn valid_at(&self, instant: OffsetDateTime) -> Option<&AccessToken> {
		match self {
			Self::HasToken(token) if token.is_valid_at(instant) => Some(token),
			_ => None,
		}
	}

	/// Returns `true` if a token (valid or not) is stored.
	pub fn has_token(&self) -> bool {
		matches!(self, Self::HasToken(_))
	}
}

/// Fields read from a successful token endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenResponse {
	access_token: String,
	expires_in: i64,
}
impl TokenResponse {
	pub(crate) fn parse(body: &[u8]) -> Result<Self, AuthError> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| AuthError::TokenResponseParse { source: Arc::new(source) })
	}

	pub(crate) fn into_token(self, issued_at: OffsetDateTime) -> Result<AccessToken, AuthError> {
		AccessToken::expiring_in(self.access_token, issued_at, Duration::seconds(self.expires_in))
	}
}
