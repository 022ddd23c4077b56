//! Construction options for [`ShlClient`](crate::client::ShlClient).
//!
//! [`ClientConfig`] is the validated, immutable configuration consumed once at client creation.
//! [`ClientOptions`] mirrors the loosely typed options object (`clientId`, `clientSecret`,
//! `cacheTimeout`, `debug`) so configuration can be deserialized from files or the environment
//! and validated in one place.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{_prelude::*, error::ConfigError};

/// Production base URL of the SHL open API.
pub const DEFAULT_BASE_URL: &str = "https://openapi.shl.se";
/// Path of the client-credentials token endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/oauth2/token";
/// Response cache time-to-live applied when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::seconds(60);

/// OAuth2 client credentials; immutable for the lifetime of a client.
#[derive(Clone)]
pub struct Credentials {
	client_id: ClientId,
	client_secret: ClientSecret,
}
impl Credentials {
	/// Validates and wraps the credential pair.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();

		if client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		Ok(Self { client_id: ClientId::new(client_id), client_secret: ClientSecret::new(client_secret) })
	}

	/// OAuth2 client identifier.
	pub fn client_id(&self) -> &str {
		self.client_id.as_str()
	}

	/// OAuth2 client secret. Callers must avoid logging this string.
	pub fn client_secret(&self) -> &str {
		self.client_secret.secret()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id.as_str())
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

/// Immutable client configuration.
///
/// Credentials are validated lazily so the builder methods stay infallible; the check happens in
/// [`ClientConfig::validate`], which every client constructor calls before doing anything else.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// OAuth2 client identifier.
	pub client_id: Option<String>,
	/// OAuth2 client secret.
	pub client_secret: Option<String>,
	/// Prefix for every token and resource request.
	pub base_url: String,
	/// Path of the token endpoint, appended to `base_url`.
	pub token_path: String,
	/// Lifetime of cached responses.
	pub cache_ttl: Duration,
	/// Emits diagnostic events for cache hits, token refreshes, and request URLs.
	pub debug: bool,
}
impl ClientConfig {
	/// Creates a configuration for the production API with the given credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			..Self::default()
		}
	}

	/// Overrides the API base URL (defaults to [`DEFAULT_BASE_URL`]).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();

		self
	}

	/// Overrides the token endpoint path (defaults to [`DEFAULT_TOKEN_PATH`]).
	pub fn with_token_path(mut self, token_path: impl Into<String>) -> Self {
		self.token_path = token_path.into();

		self
	}

	/// Overrides the response cache lifetime; non-positive values fall back to the default.
	pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
		self.cache_ttl = if ttl.is_positive() { ttl } else { DEFAULT_CACHE_TTL };

		self
	}

	/// Sets the response cache lifetime in whole seconds; `0` falls back to the default.
	pub fn with_cache_timeout(self, seconds: u32) -> Self {
		self.with_cache_ttl(Duration::seconds(i64::from(seconds)))
	}

	/// Enables or disables diagnostic logging.
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Checks credentials and the base URL, producing the values the client runs on.
	pub fn validate(&self) -> Result<(Credentials, Url), ConfigError> {
		let client_id = self.client_id.clone().ok_or(ConfigError::MissingClientId)?;
		let client_secret = self.client_secret.clone().ok_or(ConfigError::MissingClientSecret)?;
		let credentials = Credentials::new(client_id, client_secret)?;
		let base_url = Url::parse(&self.base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: self.base_url.clone() });
		}

		Ok((credentials, base_url))
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			client_id: None,
			client_secret: None,
			base_url: DEFAULT_BASE_URL.into(),
			token_path: DEFAULT_TOKEN_PATH.into(),
			cache_ttl: DEFAULT_CACHE_TTL,
			debug: false,
		}
	}
}

/// Loosely typed options record, deserializable from camelCase sources.
///
/// ```
/// use open_shl_client::config::{ClientConfig, ClientOptions};
///
/// let options: ClientOptions =
/// 	serde_json::from_str(r#"{"clientId":"id","clientSecret":"secret","cacheTimeout":120}"#)
/// 		.unwrap();
/// let config = ClientConfig::from(options);
///
/// assert_eq!(config.cache_ttl.whole_seconds(), 120);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
	/// OAuth2 client identifier.
	#[serde(default)]
	pub client_id: Option<String>,
	/// OAuth2 client secret.
	#[serde(default, skip_serializing)]
	pub client_secret: Option<String>,
	/// Response cache lifetime in seconds.
	#[serde(default)]
	pub cache_timeout: Option<u32>,
	/// Diagnostic logging toggle.
	#[serde(default)]
	pub debug: bool,
	/// Optional base URL override.
	#[serde(default)]
	pub base_url: Option<String>,
}
impl From<ClientOptions> for ClientConfig {
	fn from(options: ClientOptions) -> Self {
		let mut config = Self {
			client_id: options.client_id,
			client_secret: options.client_secret,
			debug: options.debug,
			..Self::default()
		};

		if let Some(seconds) = options.cache_timeout {
			config = config.with_cache_timeout(seconds);
		}
		if let Some(base_url) = options.base_url {
			config = config.with_base_url(base_url);
		}

		config
	}
}
