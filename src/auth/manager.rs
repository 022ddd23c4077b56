//! Client-credentials token manager with caching + singleflight refresh.
//!
//! [`TokenManager::ensure_token`] reuses the stored token while it is valid and otherwise performs
//! one client-credentials exchange. Concurrent callers never stampede the token endpoint: the
//! exchange runs under an async guard, and a caller that was already waiting when an exchange
//! finished adopts that exchange's outcome (token or error) instead of starting another one.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::token::{AccessToken, TokenResponse, TokenState},
	config::Credentials,
	error::{AuthError, ConfigError},
	http::{self, ApiHttpClient},
	obs::{self, DebugLog, RequestKind, RequestOutcome, RequestSpan},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const GRANT_TYPE: &str = "client_credentials";

/// Owns the access token for one client instance.
pub struct TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	token_url: String,
	credentials: Credentials,
	log: DebugLog,
	state: RwLock<TokenState>,
	// Outcome of the most recent exchange, read by callers that queued behind it.
	exchange: AsyncMutex<Option<Result<AccessToken>>>,
	completed: AtomicU64,
}
impl<C> TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a manager in the [`TokenState::NoToken`] state.
	pub fn new(
		http_client: Arc<C>,
		token_url: impl Into<String>,
		credentials: Credentials,
		log: DebugLog,
	) -> Self {
		Self {
			http_client,
			token_url: token_url.into(),
			credentials,
			log,
			state: Default::default(),
			exchange: Default::default(),
			completed: AtomicU64::new(0),
		}
	}

	/// Full URL of the token endpoint.
	pub fn token_url(&self) -> &str {
		&self.token_url
	}

	/// Returns a snapshot of the current state.
	pub fn state(&self) -> TokenState {
		self.state.read().clone()
	}

	/// Returns the stored token if it is valid at `instant`.
	pub fn current_at(&self, instant: OffsetDateTime) -> Option<AccessToken> {
		self.state.read().valid_at(instant).cloned()
	}

	/// Returns the stored token if it is valid now.
	pub fn current(&self) -> Option<AccessToken> {
		self.current_at(OffsetDateTime::now_utc())
	}

	/// Drops the stored token so the next [`ensure_token`](Self::ensure_token) re-authenticates.
	pub fn invalidate(&self) {
		*self.state.write() = TokenState::NoToken;
	}

	/// Returns a valid token, exchanging credentials only when none is stored.
	pub async fn ensure_token(&self) -> Result<AccessToken> {
		let observed = self.completed.load(Ordering::Acquire);

		if let Some(token) = self.current() {
			self.log.token_reused();

			return Ok(token);
		}

		let mut last = self.exchange.lock().await;

		if self.completed.load(Ordering::Acquire) != observed {
			if let Some(outcome) = last.as_ref() {
				self.log.token_shared();

				return outcome.clone();
			}
		}

		let outcome = self.exchange_client_credentials().await;

		if let Ok(token) = &outcome {
			*self.state.write() = TokenState::HasToken(token.clone());
		}

		*last = Some(outcome.clone());

		self.completed.fetch_add(1, Ordering::AcqRel);

		outcome
	}

	async fn exchange_client_credentials(&self) -> Result<AccessToken> {
		const KIND: RequestKind = RequestKind::TokenExchange;

		let span = RequestSpan::new(KIND, "ensure_token");

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);
		self.log.token_requested();

		let result = span.instrument(self.request_token()).await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	async fn request_token(&self) -> Result<AccessToken> {
		let body = url::form_urlencoded::Serializer::new(String::new())
			.append_pair("client_id", self.credentials.client_id())
			.append_pair("client_secret", self.credentials.client_secret())
			.append_pair("grant_type", GRANT_TYPE)
			.finish();
		let request = Request::builder()
			.method(Method::POST)
			.uri(&self.token_url)
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.header(ACCEPT, "application/json")
			.body(body.into_bytes())
			.map_err(ConfigError::from)?;
		let response =
			self.http_client.execute(request).await.map_err(http::map_transport_error)?;
		let status = response.status();

		if !status.is_success() {
			let status_text = http::status_text(status);

			self.log.rejected(&self.token_url, status.as_u16(), &status_text);

			return Err(AuthError::Rejected { status: status.as_u16(), status_text }.into());
		}

		let token =
			TokenResponse::parse(response.body())?.into_token(OffsetDateTime::now_utc())?;

		Ok(token)
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("token_url", &self.token_url)
			.field("credentials", &self.credentials)
			.field("state", &*self.state.read())
			.finish()
	}
}
