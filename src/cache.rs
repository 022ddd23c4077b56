//! Thread-safe TTL cache for decoded resource responses.
//!
//! Entries are keyed by request path-and-query and stay live for exactly the configured TTL from
//! insertion. Expired entries are dropped lazily when read and swept in bulk at most once per TTL
//! period on write. There is no size bound; the client issues a handful of distinct requests, so
//! the TTL alone keeps the map small.

// self
use crate::_prelude::*;

/// One cached response.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
	/// Decoded response body.
	pub value: Value,
	/// Instant the entry was written.
	pub inserted_at: OffsetDateTime,
}
impl CacheEntry {
	/// Returns `true` if the entry is still live at `instant` for the given TTL.
	///
	/// A TTL whose deadline falls past the representable range never expires.
	pub fn is_live_at(&self, instant: OffsetDateTime, ttl: Duration) -> bool {
		self.inserted_at.checked_add(ttl).is_none_or(|deadline| instant < deadline)
	}
}

/// Time-to-live keyed store mapping request URLs to response bodies.
#[derive(Debug)]
pub struct ResponseCache {
	ttl: Duration,
	entries: RwLock<HashMap<String, CacheEntry>>,
	last_sweep: Mutex<OffsetDateTime>,
}
impl ResponseCache {
	/// Creates an empty cache whose entries live for `ttl`.
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			entries: Default::default(),
			last_sweep: Mutex::new(OffsetDateTime::now_utc()),
		}
	}

	/// Lifetime of each entry.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Returns the live value stored under `key`.
	pub fn get(&self, key: &str) -> Option<Value> {
		self.get_at(key, OffsetDateTime::now_utc())
	}

	/// Returns the value stored under `key` if it is live at `instant`, evicting it otherwise.
	pub fn get_at(&self, key: &str, instant: OffsetDateTime) -> Option<Value> {
		{
			let entries = self.entries.read();
			let entry = entries.get(key)?;

			if entry.is_live_at(instant, self.ttl) {
				return Some(entry.value.clone());
			}
		}

		let mut entries = self.entries.write();

		// A concurrent writer may have refreshed the entry between the two locks.
		if entries.get(key).is_some_and(|entry| !entry.is_live_at(instant, self.ttl)) {
			entries.remove(key);
		}

		None
	}

	/// Stores `value` under `key`, replacing any prior entry and resetting its clock.
	pub fn insert(&self, key: impl Into<String>, value: Value) {
		self.insert_at(key, value, OffsetDateTime::now_utc());
	}

	/// Stores `value` under `key` as if written at `instant`.
	pub fn insert_at(&self, key: impl Into<String>, value: Value, instant: OffsetDateTime) {
		self.sweep_if_due(instant);
		self.entries.write().insert(key.into(), CacheEntry { value, inserted_at: instant });
	}

	/// Removes the entry stored under `key`, live or not.
	pub fn remove(&self, key: &str) -> Option<CacheEntry> {
		self.entries.write().remove(key)
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.entries.write().clear();
	}

	/// Drops every entry that is expired at `instant`, returning how many were removed.
	pub fn purge_expired_at(&self, instant: OffsetDateTime) -> usize {
		let mut entries = self.entries.write();
		let before = entries.len();

		entries.retain(|_, entry| entry.is_live_at(instant, self.ttl));

		before - entries.len()
	}

	/// Drops every entry that is expired now.
	pub fn purge_expired(&self) -> usize {
		self.purge_expired_at(OffsetDateTime::now_utc())
	}

	/// Number of stored entries, including expired ones not yet swept.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns `true` if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	fn sweep_if_due(&self, instant: OffsetDateTime) {
		{
			let mut last_sweep = self.last_sweep.lock();

			if instant - *last_sweep < self.ttl {
				return;
			}

			*last_sweep = instant;
		}

		self.purge_expired_at(instant);
	}
}
