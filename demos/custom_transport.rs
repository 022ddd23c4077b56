//! Plugs a caller-owned transport into the client: a reqwest client with its own timeout policy,
//! wrapped in `FnHttpClient`.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use open_shl_client::{
	client::ShlClient,
	config::ClientConfig,
	http::FnHttpClient,
	oauth2::{HttpClientError, HttpRequest, HttpResponse},
	reqwest::Client,
};

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
	let team_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/teams/fhc").header("authorization", "bearer demo-access");
			then.status(200).json_body(json!({ "id": "fhc", "name": "Frölunda HC" }));
		})
		.await;
	let http = Client::builder().timeout(Duration::from_secs(5)).build()?;
	let transport = FnHttpClient::new(move |request: HttpRequest| {
		let http = http.clone();

		async move {
			let request = request.try_into().map_err(|e| HttpClientError::Reqwest(Box::new(e)))?;
			let response =
				http.execute(request).await.map_err(|e| HttpClientError::Reqwest(Box::new(e)))?;
			let status = response.status();
			let body = response.bytes().await.map_err(|e| HttpClientError::Reqwest(Box::new(e)))?;
			let mut converted = HttpResponse::new(body.to_vec());

			*converted.status_mut() = status;

			Ok::<_, HttpClientError<open_shl_client::reqwest::Error>>(converted)
		}
	});
	let client = ShlClient::with_http_client(
		ClientConfig::new("demo-client", "demo-secret")
			.with_base_url(server.base_url())
			.with_debug(true),
		transport,
	)?;
	let team = client.team("fhc").await?;

	println!("Team: {team}");

	token_mock.assert_async().await;
	team_mock.assert_async().await;

	Ok(())
}
