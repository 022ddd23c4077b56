//! Authorized, cached JSON GET execution.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenManager},
	cache::ResponseCache,
	config::Credentials,
	error::{ConfigError, HttpError},
	http::{self, ApiHttpClient},
	obs::{self, CacheOutcome, DebugLog, RequestKind, RequestOutcome, RequestSpan},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Sends bearer-authorized GET requests and memoizes their decoded bodies.
///
/// A live cache entry short-circuits everything, including the token check. Only successful,
/// well-formed JSON responses are cached; failures always reach the network again on the next call.
pub struct RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	base_url: Url,
	tokens: TokenManager<C>,
	cache: ResponseCache,
	log: DebugLog,
}
impl<C> RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Wires a token manager (pointed at `token_path`) and an empty cache to `http_client`.
	pub fn new(
		http_client: Arc<C>,
		base_url: Url,
		token_path: &str,
		credentials: Credentials,
		cache_ttl: Duration,
		log: DebugLog,
	) -> Self {
		let tokens =
			TokenManager::new(http_client.clone(), join_url(&base_url, token_path), credentials, log);

		Self { http_client, base_url, tokens, cache: ResponseCache::new(cache_ttl), log }
	}

	/// API base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Token manager backing this executor.
	pub fn tokens(&self) -> &TokenManager<C> {
		&self.tokens
	}

	/// Response cache backing this executor.
	pub fn cache(&self) -> &ResponseCache {
		&self.cache
	}

	/// Returns the JSON body for `path_and_query`, served from cache when a live entry exists.
	pub async fn fetch_json(&self, path_and_query: &str) -> Result<Value> {
		if let Some(value) = self.cache.get(path_and_query) {
			obs::record_cache_outcome(CacheOutcome::Hit);
			self.log.cache_hit(path_and_query);

			return Ok(value);
		}

		obs::record_cache_outcome(CacheOutcome::Miss);

		let token = self.tokens.ensure_token().await?;
		let value = self.fetch_resource(path_and_query, &token).await?;

		self.log.cache_store(path_and_query);
		self.cache.insert(path_and_query, value.clone());
		obs::record_cache_outcome(CacheOutcome::Store);

		Ok(value)
	}

	async fn fetch_resource(&self, path_and_query: &str, token: &AccessToken) -> Result<Value> {
		const KIND: RequestKind = RequestKind::Resource;

		let span = RequestSpan::new(KIND, "fetch_json");

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);

		let result = span.instrument(self.get_json(path_and_query, token)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	async fn get_json(&self, path_and_query: &str, token: &AccessToken) -> Result<Value> {
		let url = join_url(&self.base_url, path_and_query);

		self.log.request(&url);

		let request = Request::builder()
			.method(Method::GET)
			.uri(&url)
			.header(AUTHORIZATION, token.authorization())
			.header(ACCEPT, JSON_CONTENT_TYPE)
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let response =
			self.http_client.execute(request).await.map_err(http::map_transport_error)?;
		let status = response.status();

		if !status.is_success() {
			let status_text = http::status_text(status);

			self.log.rejected(&url, status.as_u16(), &status_text);

			return Err(HttpError {
				status: status.as_u16(),
				status_text,
				url: path_and_query.to_owned(),
			}
			.into());
		}

		serde_json::from_slice(response.body()).map_err(|source| Error::Decode {
			url: path_and_query.to_owned(),
			source: Arc::new(source),
		})
	}
}
impl<C> Debug for RequestExecutor<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestExecutor")
			.field("base_url", &self.base_url.as_str())
			.field("tokens", &self.tokens)
			.field("cached_entries", &self.cache.len())
			.finish()
	}
}

/// Appends `path` to `base`, yielding exactly one `/` between them.
pub(crate) fn join_url(base: &Url, path: &str) -> String {
	let base = base.as_str().trim_end_matches('/');

	if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::{
		error::AuthError,
		http::{FnHttpClient, TransportFuture},
	};

	type Fetch = dyn Fn(HttpRequest) -> TransportFuture<'static, std::io::Error> + Send + Sync;
	type Transport = FnHttpClient<Box<Fetch>>;

	#[derive(Default)]
	struct Counters {
		token: AtomicUsize,
		resource: AtomicUsize,
		authorization: Mutex<Option<String>>,
	}

	fn reply(status: StatusCode, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		response
	}

	fn transport(
		counters: Arc<Counters>,
		token_status: StatusCode,
		resource_status: StatusCode,
		resource_body: &'static str,
	) -> Transport {
		let fetch: Box<Fetch> = Box::new(
			move |request: HttpRequest| -> TransportFuture<'static, std::io::Error> {
				let response = if request.uri().path() == "/oauth2/token" {
					counters.token.fetch_add(1, Ordering::SeqCst);

					reply(token_status, r#"{"access_token":"tok","expires_in":3600}"#)
				} else {
					counters.resource.fetch_add(1, Ordering::SeqCst);
					*counters.authorization.lock() = request
						.headers()
						.get(AUTHORIZATION)
						.and_then(|value| value.to_str().ok())
						.map(ToOwned::to_owned);

					reply(resource_status, resource_body)
				};

				Box::pin(async move { Ok(response) })
			},
		);

		FnHttpClient::new(fetch)
	}

	fn executor(transport: Transport) -> RequestExecutor<Transport> {
		RequestExecutor::new(
			Arc::new(transport),
			Url::parse("https://api.example.com").expect("Fixture URL should parse."),
			"/oauth2/token",
			Credentials::new("id", "secret").expect("Credential fixture should be valid."),
			Duration::seconds(60),
			DebugLog::new(true),
		)
	}

	#[test]
	fn join_url_inserts_exactly_one_slash() {
		let base = Url::parse("https://api.example.com").expect("Fixture URL should parse.");
		let nested = Url::parse("https://api.example.com/v1/").expect("Fixture URL should parse.");

		assert_eq!(join_url(&base, "/teams"), "https://api.example.com/teams");
		assert_eq!(join_url(&base, "teams"), "https://api.example.com/teams");
		assert_eq!(join_url(&nested, "/teams?sort=a"), "https://api.example.com/v1/teams?sort=a");
	}

	#[tokio::test]
	async fn successful_responses_are_cached() {
		let counters = Arc::new(Counters::default());
		let executor =
			executor(transport(counters.clone(), StatusCode::OK, StatusCode::OK, r#"{"a":1}"#));
		let first = executor.fetch_json("/teams").await.expect("First fetch should succeed.");
		let second = executor.fetch_json("/teams").await.expect("Second fetch should hit cache.");

		assert_eq!(first, serde_json::json!({"a": 1}));
		assert_eq!(first, second);
		assert_eq!(counters.token.load(Ordering::SeqCst), 1);
		assert_eq!(counters.resource.load(Ordering::SeqCst), 1);
		assert_eq!(counters.authorization.lock().as_deref(), Some("bearer tok"));
		assert_eq!(executor.cache().len(), 1);
	}

	#[tokio::test]
	async fn failure_status_is_not_cached() {
		let counters = Arc::new(Counters::default());
		let executor = executor(transport(
			counters.clone(),
			StatusCode::OK,
			StatusCode::INTERNAL_SERVER_ERROR,
			"oops",
		));

		for _ in 0..2 {
			let err = executor.fetch_json("/teams").await.expect_err("500 should fail.");

			match err {
				Error::Http(e) => {
					assert_eq!(e.status, 500);
					assert_eq!(e.status_text, "Internal Server Error");
					assert_eq!(e.url, "/teams");
				},
				other => panic!("Unexpected error variant: {other:?}."),
			}
		}

		assert_eq!(counters.token.load(Ordering::SeqCst), 1);
		assert_eq!(counters.resource.load(Ordering::SeqCst), 2);
		assert!(executor.cache().is_empty());
	}

	#[tokio::test]
	async fn non_json_body_is_a_decode_error() {
		let counters = Arc::new(Counters::default());
		let executor =
			executor(transport(counters.clone(), StatusCode::OK, StatusCode::OK, "<html>"));
		let err = executor.fetch_json("/teams").await.expect_err("HTML should not decode.");

		assert!(matches!(err, Error::Decode { ref url, .. } if url == "/teams"));
		assert!(executor.cache().is_empty());
	}

	#[tokio::test]
	async fn token_failure_skips_resource_request() {
		let counters = Arc::new(Counters::default());
		let executor = executor(transport(
			counters.clone(),
			StatusCode::UNAUTHORIZED,
			StatusCode::OK,
			"{}",
		));
		let err = executor.fetch_json("/teams").await.expect_err("Rejected token should fail.");

		assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 401, .. })));
		assert_eq!(counters.resource.load(Ordering::SeqCst), 0);
	}
}
