//! Transport primitives for token exchanges and resource requests.
//!
//! The client's only dependency on an HTTP stack is [`ApiHttpClient`]. Requests and responses use
//! the `http` crate types re-exported by `oauth2` ([`HttpRequest`], [`HttpResponse`]), so any
//! stack that can execute an `http::Request<Vec<u8>>` can be plugged in. Two implementations ship
//! with the crate:
//!
//! - [`ReqwestHttpClient`] (feature `reqwest`, on by default), the default transport.
//! - [`FnHttpClient`], which adapts a plain async closure, handy for tests and for wrapping a
//!   transport that owns its own timeout or proxy policy.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute token exchanges and resource requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients, and
/// the returned future must be `Send` so client futures can hop executors. A non-success status
/// is not a transport failure: implementations return the response as-is and let the client
/// classify it.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the full response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Adapter that turns an async closure into an [`ApiHttpClient`].
///
/// ```
/// use open_shl_client::{
/// 	http::FnHttpClient,
/// 	oauth2::{HttpClientError, HttpRequest, HttpResponse},
/// };
///
/// let transport = FnHttpClient::new(|_request: HttpRequest| async move {
/// 	Ok::<_, HttpClientError<std::io::Error>>(HttpResponse::new(b"{}".to_vec()))
/// });
/// # let _ = transport;
/// ```
#[derive(Clone)]
pub struct FnHttpClient<F>(F);
impl<F> FnHttpClient<F> {
	/// Wraps `fetch`, called once per outbound request.
	pub fn new(fetch: F) -> Self {
		Self(fetch)
	}
}
impl<F, Fut, E> ApiHttpClient for FnHttpClient<F>
where
	F: 'static + Send + Sync + Fn(HttpRequest) -> Fut,
	Fut: 'static + Send + Future<Output = Result<HttpResponse, HttpClientError<E>>>,
	E: 'static + Send + Sync + StdError,
{
	type TransportError = E;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin((self.0)(request))
	}
}
impl<F> Debug for FnHttpClient<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnHttpClient(..)")
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Converts a transport failure into the client's [`TransportError`] (or a configuration error
/// when the request itself could not be built).
pub(crate) fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::from(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized transport failure".into() }.into(),
	}
}

/// Canonical reason phrase for a status code, or an empty string for unregistered codes.
pub(crate) fn status_text(status: oauth2::http::StatusCode) -> String {
	status.canonical_reason().unwrap_or_default().to_owned()
}
