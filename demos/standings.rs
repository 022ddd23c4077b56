//! Fetches league standings and top scorers through the default reqwest transport, against a local
//! mock of the open API so the demo runs without credentials.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use open_shl_client::{client::ShlClient, config::ClientConfig, query::Filters};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "access_token": "demo-access", "expires_in": 900 }));
		})
		.await;
	let standings_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/seasons/2024/statistics/teams/standings");
			then.status(200).json_body(json!({
				"teams": [
					{ "name": "Frölunda HC", "points": 97 },
					{ "name": "Luleå HF", "points": 90 },
				]
			}));
		})
		.await;
	let players_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/seasons/2024/statistics/players").query_param("sort", "points");
			then.status(200)
				.json_body(json!({ "players": [{ "name": "Demo Skater", "points": 51 }] }));
		})
		.await;
	let client = ShlClient::new(
		ClientConfig::new("demo-client", "demo-secret")
			.with_base_url(server.base_url())
			.with_cache_timeout(30),
	)?;
	let standings = client.standings(2024, None::<&str>).await?;
	let scorers = client.player_stats(2024, &Filters::new().sort("points")).await?;
	// Served from cache; no second request reaches the server.
	let again = client.standings(2024, None::<&str>).await?;

	println!("Standings: {}", serde_json::to_string_pretty(&standings)?);
	println!("Top scorers: {}", serde_json::to_string_pretty(&scorers)?);
	assert_eq!(standings, again);

	token_mock.assert_async().await;
	standings_mock.assert_async().await;
	players_mock.assert_async().await;

	Ok(())
}
