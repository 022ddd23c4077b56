// self
use crate::{_prelude::*, obs::RequestKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used around outbound requests.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided request kind + stage.
	pub fn new(kind: RequestKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("open_shl.request", kind = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Diagnostic side channel switched on by the client's `debug` option.
///
/// Events go to the `open_shl` target at debug level; nothing is emitted when the option is off
/// or the `tracing` feature is disabled. Secrets never reach these events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugLog {
	enabled: bool,
}
impl DebugLog {
	/// Creates a log that emits only when `enabled` is set.
	pub const fn new(enabled: bool) -> Self {
		Self { enabled }
	}

	/// Returns `true` if events are emitted.
	pub const fn is_enabled(self) -> bool {
		self.enabled
	}

	/// Client construction finished.
	pub fn configured(self, base_url: &str, cache_ttl: Duration) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(
					target: "open_shl",
					base_url,
					cache_ttl_secs = cache_ttl.whole_seconds(),
					"Config setup done."
				);
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = (self, base_url, cache_ttl);
	}

	/// A live cache entry answered the request.
	pub fn cache_hit(self, url: &str) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", url, "Returning cached data.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = (self, url);
	}

	/// A fresh response was stored.
	pub fn cache_store(self, url: &str) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", url, "Caching result.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = (self, url);
	}

	/// The stored access token is still valid.
	pub fn token_reused(self) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", "Using cached token.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = self;
	}

	/// A client-credentials exchange is starting.
	pub fn token_requested(self) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", "Getting a new access token.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = self;
	}

	/// The caller adopted the outcome of an exchange that finished while it waited.
	pub fn token_shared(self) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(
					target: "open_shl",
					"Reusing the outcome of a concurrent token exchange."
				);
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = self;
	}

	/// A resource request is about to be sent.
	pub fn request(self, url: &str) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", url, "Requesting resource.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = (self, url);
	}

	/// The API answered with a failure status.
	pub fn rejected(self, url: &str, status: u16, status_text: &str) {
		#[cfg(feature = "tracing")]
		{
			if self.enabled {
				tracing::debug!(target: "open_shl", url, status, status_text, "Invalid response.");
			}
		}
		#[cfg(not(feature = "tracing"))]
		let _ = (self, url, status, status_text);
	}
}
