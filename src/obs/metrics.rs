// self
use crate::obs::{CacheOutcome, RequestKind, RequestOutcome};

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(kind: RequestKind, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"open_shl_request_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a response cache lookup or write (when enabled).
pub fn record_cache_outcome(outcome: CacheOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("open_shl_cache_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
