//! Observability helpers for token exchanges, resource requests, and the response cache.
//!
//! # Feature Flags
//!
//! - `tracing` (default) emits spans named `open_shl.request` with the `kind` and `stage` fields,
//!   plus the debug events controlled by [`ClientConfig::debug`](crate::config::ClientConfig).
//! - `metrics` increments `open_shl_request_total` (labeled by `kind` + `outcome`) and
//!   `open_shl_cache_total` (labeled by `outcome`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outbound request kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// Client-credentials token exchange.
	TokenExchange,
	/// Bearer-authorized resource request.
	Resource,
}
impl RequestKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestKind::TokenExchange => "token_exchange",
			RequestKind::Resource => "resource",
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Request about to be sent.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Response cache lookups and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
	/// A live entry was returned.
	Hit,
	/// No live entry existed.
	Miss,
	/// A fresh response was stored.
	Store,
}
impl CacheOutcome {
	/// Returns a stable label suitable for metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheOutcome::Hit => "hit",
			CacheOutcome::Miss => "miss",
			CacheOutcome::Store => "store",
		}
	}
}
impl Display for CacheOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
