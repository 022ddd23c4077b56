// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use open_shl_client::{
	client::{ReqwestShlClient, ShlClient},
	config::ClientConfig,
	error::{AuthError, Error, HttpError, ValidationError},
	query::Filters,
};

const CLIENT_ID: &str = "shl-client";
const CLIENT_SECRET: &str = "shl-secret";
const TOKEN_FORM: &str =
	"client_id=shl-client&client_secret=shl-secret&grant_type=client_credentials";

fn build_client(
	server: &MockServer,
	configure: impl FnOnce(ClientConfig) -> ClientConfig,
) -> ReqwestShlClient {
	let config =
		configure(ClientConfig::new(CLIENT_ID, CLIENT_SECRET).with_base_url(server.base_url()));

	ShlClient::new(config).expect("Client should build against the mock server.")
}

async fn mock_token<'a>(server: &'a MockServer, access_token: &str, expires_in: i64) -> Mock<'a> {
	mock_token_for(server, TOKEN_FORM, access_token, expires_in).await
}

async fn mock_token_for<'a>(
	server: &'a MockServer,
	form: &str,
	access_token: &str,
	expires_in: i64,
) -> Mock<'a> {
	let body = json!({ "access_token": access_token, "expires_in": expires_in });

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body(form);
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

async fn mock_resource<'a>(
	server: &'a MockServer,
	path: &str,
	access_token: &str,
	body: serde_json::Value,
) -> Mock<'a> {
	let authorization = format!("bearer {access_token}");

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(path)
				.header("authorization", authorization)
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

#[tokio::test]
async fn responses_are_cached_within_ttl() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-1", 3600).await;
	let games =
		mock_resource(&server, "/seasons/2024/games", "tok-1", json!({ "games": [1, 2] })).await;
	let client = build_client(&server, |config| config);
	let first = client.games_in_season(2024).await.expect("First fetch should succeed.");
	let second = client.games_in_season(2024).await.expect("Cached fetch should succeed.");

	assert_eq!(first, json!({ "games": [1, 2] }));
	assert_eq!(first, second);

	token.assert_calls_async(1).await;
	games.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_requests_share_one_token_exchange() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(200))
				.json_body(json!({ "access_token": "shared", "expires_in": 3600 }));
		})
		.await;
	let teams = mock_resource(&server, "/teams", "shared", json!(["a"])).await;
	let games = mock_resource(&server, "/seasons/2024/games", "shared", json!(["g"])).await;
	let client = build_client(&server, |config| config);
	let (first, second) = tokio::join!(client.teams(), client.games_in_season(2024));

	assert_eq!(first.expect("Teams fetch should succeed."), json!(["a"]));
	assert_eq!(second.expect("Games fetch should succeed."), json!(["g"]));

	token.assert_calls_async(1).await;
	teams.assert_calls_async(1).await;
	games.assert_calls_async(1).await;
}

#[tokio::test]
async fn failure_status_is_surfaced_and_not_cached() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-1", 3600).await;
	let teams = server
		.mock_async(|when, then| {
			when.method(GET).path("/teams");
			then.status(500).body("upstream exploded");
		})
		.await;
	let client = build_client(&server, |config| config);

	for _ in 0..2 {
		let err = client.teams().await.expect_err("500 response should fail.");

		match err {
			Error::Http(HttpError { status, status_text, url }) => {
				assert_eq!(status, 500);
				assert_eq!(status_text, "Internal Server Error");
				assert_eq!(url, "/teams");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	assert!(client.cache().is_empty());

	token.assert_calls_async(1).await;
	teams.assert_calls_async(2).await;
}

#[tokio::test]
async fn invalid_arguments_fail_before_any_request() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-1", 3600).await;
	let client = build_client(&server, |config| config);
	let err = client.games_in_season(2021.5).await.expect_err("Fractional season should fail.");

	assert!(matches!(err, Error::Validation(ValidationError::NotAnInteger { parameter: "season" })));

	let err = client.game(json!("2021"), 1).await.expect_err("String season should fail.");

	assert!(matches!(err, Error::Validation(ValidationError::NotAnInteger { parameter: "season" })));

	let err = client.game(2024, -4).await.expect_err("Negative game id should fail.");

	assert!(matches!(err, Error::Validation(ValidationError::Negative { parameter: "gameId" })));

	let err = client.team("").await.expect_err("Empty team id should fail.");

	assert!(matches!(err, Error::Validation(ValidationError::Empty { parameter: "teamId" })));

	let err = client.team("a/../b").await.expect_err("Team id with a slash should fail.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::ForbiddenCharacter {
			parameter: "teamId",
			character: '/'
		})
	));

	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn expired_entries_are_refetched() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-1", 3600).await;
	let teams = mock_resource(&server, "/teams", "tok-1", json!(["a"])).await;
	let client =
		build_client(&server, |config| config.with_cache_ttl(time::Duration::milliseconds(150)));

	client.teams().await.expect("First fetch should succeed.");
	client.teams().await.expect("Cached fetch should succeed.");
	tokio::time::sleep(StdDuration::from_millis(250)).await;
	client.teams().await.expect("Expired fetch should succeed.");

	token.assert_calls_async(1).await;
	teams.assert_calls_async(2).await;
}

#[tokio::test]
async fn expired_token_is_exchanged_again() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "short-lived", 1).await;
	let teams = mock_resource(&server, "/teams", "short-lived", json!(["a"])).await;
	let client = build_client(&server, |config| config);

	client.teams().await.expect("First fetch should succeed.");
	client.clear_cache();
	tokio::time::sleep(StdDuration::from_millis(1_100)).await;
	client.teams().await.expect("Fetch after token expiry should succeed.");

	token.assert_calls_async(2).await;
	teams.assert_calls_async(2).await;
}

#[tokio::test]
async fn cached_entries_outlive_an_expired_token() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "short-lived", 1).await;
	let teams = mock_resource(&server, "/teams", "short-lived", json!(["a"])).await;
	let client = build_client(&server, |config| config);
	let first = client.teams().await.expect("First fetch should succeed.");

	tokio::time::sleep(StdDuration::from_millis(1_100)).await;

	let second = client.teams().await.expect("Cached fetch should succeed without a token.");

	assert_eq!(first, second);

	token.assert_calls_async(1).await;
	teams.assert_calls_async(1).await;
}

#[tokio::test]
async fn separate_clients_keep_separate_tokens_and_caches() {
	let server = MockServer::start_async().await;
	let token_a = mock_token_for(
		&server,
		"client_id=client-a&client_secret=secret-a&grant_type=client_credentials",
		"tok-a",
		3600,
	)
	.await;
	let token_b = mock_token_for(
		&server,
		"client_id=client-b&client_secret=secret-b&grant_type=client_credentials",
		"tok-b",
		3600,
	)
	.await;
	let teams_a = mock_resource(&server, "/teams", "tok-a", json!(["seen by a"])).await;
	let teams_b = mock_resource(&server, "/teams", "tok-b", json!(["seen by b"])).await;
	let client_a =
		ShlClient::new(ClientConfig::new("client-a", "secret-a").with_base_url(server.base_url()))
			.expect("Client A should build.");
	let client_b =
		ShlClient::new(ClientConfig::new("client-b", "secret-b").with_base_url(server.base_url()))
			.expect("Client B should build.");

	for _ in 0..2 {
		assert_eq!(client_a.teams().await.expect("Client A fetch."), json!(["seen by a"]));
		assert_eq!(client_b.teams().await.expect("Client B fetch."), json!(["seen by b"]));
	}

	client_a.clear_cache();

	assert!(client_a.cache().is_empty());
	assert_eq!(client_b.cache().len(), 1);

	token_a.assert_calls_async(1).await;
	token_b.assert_calls_async(1).await;
	teams_a.assert_calls_async(1).await;
	teams_b.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_credentials_surface_auth_error() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(401).body("invalid_client");
		})
		.await;
	let teams = mock_resource(&server, "/teams", "never", json!([])).await;
	let client = build_client(&server, |config| config);
	let err = client.teams().await.expect_err("Rejected credentials should fail.");

	match err {
		Error::Auth(AuthError::Rejected { status, status_text }) => {
			assert_eq!(status, 401);
			assert_eq!(status_text, "Unauthorized");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	token.assert_calls_async(1).await;
	teams.assert_calls_async(0).await;
}

#[tokio::test]
async fn filters_reach_the_server_as_query_params() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-1", 3600).await;
	let players = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/seasons/2024/statistics/players")
				.query_param("sort", "points")
				.query_param("teamIds[]", "fbb")
				.query_param("teamIds[]", "lhf");
			then.status(200).json_body(json!({ "players": [] }));
		})
		.await;
	let articles = server
		.mock_async(|when, then| {
			when.method(GET).path("/articles").query_param("teamIds[]", "fbb");
			then.status(200).json_body(json!({ "articles": [] }));
		})
		.await;
	let client = build_client(&server, |config| config);
	let filters = Filters::new().sort("points").team_ids(["fbb", "lhf"]);

	client.player_stats(2024, &filters).await.expect("Player stats should succeed.");
	client.articles(["fbb"]).await.expect("Articles should succeed.");

	players.assert_calls_async(1).await;
	articles.assert_calls_async(1).await;
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-1", 3600).await;
	let videos = server
		.mock_async(|when, then| {
			when.method(GET).path("/videos");
			then.status(200).header("content-type", "text/html").body("<html></html>");
		})
		.await;
	let client = build_client(&server, |config| config);
	let err = client.videos(None::<&str>).await.expect_err("HTML body should not decode.");

	assert!(matches!(err, Error::Decode { ref url, .. } if url == "/videos"));
	assert!(client.cache().is_empty());

	videos.assert_calls_async(1).await;
}
