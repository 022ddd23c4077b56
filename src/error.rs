//! Client-level error types shared by the token manager, executor, and facade.
//!
//! Every type here is `Clone` so the outcome of a coalesced token exchange can be handed to each
//! caller that waited on it.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type SharedError = Arc<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Clone, Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; the client cannot be used.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A public operation received a malformed argument.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// The client-credentials exchange failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// A resource request returned a failure status.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A successful resource response carried a body that is not JSON.
	#[error("Response body for `{url}` is not valid JSON.")]
	Decode {
		/// Path and query of the request.
		url: String,
		/// Underlying decoding failure.
		#[source]
		source: Arc<serde_json::Error>,
	},
}

/// Configuration failures raised while building a client.
#[derive(Clone, Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier is absent or empty.
	#[error("clientId must be set.")]
	MissingClientId,
	/// Client secret is absent or empty.
	#[error("clientSecret must be set.")]
	MissingClientSecret,
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry a path (e.g. `mailto:` or `data:` URLs).
	#[error("Base URL `{url}` cannot be used as a request prefix.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: SharedError,
	},
	/// HTTP request construction failed.
	#[error("HTTP request could not be constructed.")]
	HttpRequest {
		/// Underlying request builder failure.
		#[source]
		source: Arc<oauth2::http::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Arc::new(src) }
	}
}
impl From<oauth2::http::Error> for ConfigError {
	fn from(e: oauth2::http::Error) -> Self {
		Self::HttpRequest { source: Arc::new(e) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Argument validation failures; raised before any cache or network activity.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// The argument is not an integer (fractional number, string, or other JSON type).
	#[error("{parameter} must be an integer.")]
	NotAnInteger {
		/// Offending parameter name.
		parameter: &'static str,
	},
	/// The argument is a negative integer.
	#[error("{parameter} must not be negative.")]
	Negative {
		/// Offending parameter name.
		parameter: &'static str,
	},
	/// The argument does not fit the accepted integer range.
	#[error("{parameter} is out of range.")]
	OutOfRange {
		/// Offending parameter name.
		parameter: &'static str,
	},
	/// The argument is an empty string.
	#[error("{parameter} must be a non-empty string.")]
	Empty {
		/// Offending parameter name.
		parameter: &'static str,
	},
	/// The argument contains whitespace.
	#[error("{parameter} must not contain whitespace.")]
	ContainsWhitespace {
		/// Offending parameter name.
		parameter: &'static str,
	},
	/// The argument contains a URL delimiter.
	#[error("{parameter} must not contain `{character}`.")]
	ForbiddenCharacter {
		/// Offending parameter name.
		parameter: &'static str,
		/// Rejected character.
		character: char,
	},
	/// The argument exceeds the maximum length.
	#[error("{parameter} exceeds {max} characters.")]
	TooLong {
		/// Offending parameter name.
		parameter: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}
impl ValidationError {
	/// Name of the parameter that failed validation.
	pub fn parameter(&self) -> &'static str {
		match self {
			Self::NotAnInteger { parameter }
			| Self::Negative { parameter }
			| Self::OutOfRange { parameter }
			| Self::Empty { parameter }
			| Self::ContainsWhitespace { parameter }
			| Self::ForbiddenCharacter { parameter, .. }
			| Self::TooLong { parameter, .. } => parameter,
		}
	}
}

/// Client-credentials exchange failures.
#[derive(Clone, Debug, ThisError)]
pub enum AuthError {
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the request: {status} - {status_text}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		status_text: String,
	},
	/// Token endpoint responded with JSON that does not match the token shape.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: Arc<serde_path_to_error::Error<serde_json::Error>>,
	},
	/// Token endpoint returned a non-positive `expires_in`.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an `expires_in` the clock cannot represent.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl AuthError {
	/// HTTP status of a rejected exchange, if the endpoint answered with one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Failure status returned by a resource request.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Invalid response: {status} - {status_text} ({url}).")]
pub struct HttpError {
	/// HTTP status code.
	pub status: u16,
	/// Canonical reason phrase for the status.
	pub status_text: String,
	/// Path and query of the failed request.
	pub url: String,
}

/// Transport-level failures (network, IO).
#[derive(Clone, Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: SharedError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io {
		/// Underlying IO failure.
		#[source]
		source: Arc<std::io::Error>,
	},
	/// Transport reported a failure without a structured error.
	#[error("HTTP client error occurred while calling the API: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Arc::new(src) }
	}
}
impl From<std::io::Error> for TransportError {
	fn from(e: std::io::Error) -> Self {
		Self::Io { source: Arc::new(e) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
