//! Public facade over the SHL open API.
//!
//! Each operation validates its arguments, renders the endpoint path plus query string, and hands
//! the result to the [`RequestExecutor`], which serves it from cache or fetches it with a bearer
//! token. Responses are returned as raw [`Value`]s; the API's document shapes are not modeled.

pub mod endpoint;
pub mod params;

pub use endpoint::*;
pub use params::*;

// self
use crate::{
	_prelude::*,
	cache::ResponseCache,
	config::ClientConfig,
	http::ApiHttpClient,
	obs::DebugLog,
	query::{self, Filters, UrlBuilder},
	request::RequestExecutor,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestShlClient = ShlClient<ReqwestHttpClient>;

/// Authenticated, caching client for the SHL open API.
///
/// One instance owns its token, its cache, and its transport handle; separate instances never
/// share state. The client is `Send + Sync`, so wrap it in an [`Arc`] to share it across tasks.
pub struct ShlClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	executor: RequestExecutor<C>,
	config: ClientConfig,
}
impl<C> ShlClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that sends every request through `http_client`.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let (credentials, base_url) = config.validate()?;
		let log = DebugLog::new(config.debug);
		let executor = RequestExecutor::new(
			http_client.into(),
			base_url,
			&config.token_path,
			credentials,
			config.cache_ttl,
			log,
		);

		log.configured(executor.base_url().as_str(), config.cache_ttl);

		Ok(Self { executor, config })
	}

	/// Configuration the client was built from.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Response cache backing this client.
	pub fn cache(&self) -> &ResponseCache {
		self.executor.cache()
	}

	/// Lists news articles, optionally restricted to the given teams.
	///
	/// Pass an empty collection (e.g. `None::<&str>`) to list articles for every team.
	pub async fn articles<I>(&self, team_ids: I) -> Result<Value>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let url = UrlBuilder::new(Endpoint::Articles.path()).team_ids(team_ids).finish();

		self.executor.fetch_json(&url).await
	}

	/// Lists videos, optionally restricted to the given teams.
	pub async fn videos<I>(&self, team_ids: I) -> Result<Value>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let url = UrlBuilder::new(Endpoint::Videos.path()).team_ids(team_ids).finish();

		self.executor.fetch_json(&url).await
	}

	/// Lists every game of `season`.
	pub async fn games_in_season(&self, season: impl IntoParam<Season>) -> Result<Value> {
		let endpoint = Endpoint::GamesInSeason(season.into_param()?);

		self.executor.fetch_json(&endpoint.path()).await
	}

	/// Fetches one game of `season`.
	pub async fn game(
		&self,
		season: impl IntoParam<Season>,
		game_id: impl IntoParam<GameId>,
	) -> Result<Value> {
		let endpoint = Endpoint::Game(season.into_param()?, game_id.into_param()?);

		self.executor.fetch_json(&endpoint.path()).await
	}

	/// Lists all teams.
	pub async fn teams(&self) -> Result<Value> {
		self.executor.fetch_json(&Endpoint::Teams.path()).await
	}

	/// Fetches one team.
	pub async fn team(&self, team_id: impl IntoParam<TeamId>) -> Result<Value> {
		let endpoint = Endpoint::Team(team_id.into_param()?);

		self.executor.fetch_json(&endpoint.path()).await
	}

	/// League table for `season`, optionally restricted to the given teams.
	pub async fn standings<I>(&self, season: impl IntoParam<Season>, team_ids: I) -> Result<Value>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let endpoint = Endpoint::Standings(season.into_param()?);
		let url = UrlBuilder::new(endpoint.path()).team_ids(team_ids).finish();

		self.executor.fetch_json(&url).await
	}

	/// Goalkeeper statistics for `season`, sorted and filtered by `filters`.
	pub async fn goalkeeper_stats(
		&self,
		season: impl IntoParam<Season>,
		filters: &Filters,
	) -> Result<Value> {
		let endpoint = Endpoint::GoalkeeperStats(season.into_param()?);

		self.executor.fetch_json(&query::build_url(&endpoint.path(), filters)).await
	}

	/// Skater statistics for `season`, sorted and filtered by `filters`.
	pub async fn player_stats(
		&self,
		season: impl IntoParam<Season>,
		filters: &Filters,
	) -> Result<Value> {
		let endpoint = Endpoint::PlayerStats(season.into_param()?);

		self.executor.fetch_json(&query::build_url(&endpoint.path(), filters)).await
	}

	/// Fetches an arbitrary path-and-query relative to the base URL, with the same caching and
	/// authorization as the typed operations.
	pub async fn fetch_json(&self, path_and_query: &str) -> Result<Value> {
		self.executor.fetch_json(path_and_query).await
	}

	/// Drops every cached response.
	pub fn clear_cache(&self) {
		self.executor.cache().clear();
	}

	/// Drops the stored access token; the next uncached request re-authenticates.
	pub fn invalidate_token(&self) {
		self.executor.tokens().invalidate();
	}
}
#[cfg(feature = "reqwest")]
impl ShlClient<ReqwestHttpClient> {
	/// Creates a client backed by a freshly built reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Self::with_http_client(config, ReqwestHttpClient::with_client(client))
	}
}
impl<C> Debug for ShlClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ShlClient")
			.field("base_url", &self.config.base_url)
			.field("cache_ttl", &self.config.cache_ttl)
			.field("debug", &self.config.debug)
			.field("executor", &self.executor)
			.finish()
	}
}
