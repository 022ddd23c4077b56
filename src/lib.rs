//! Async client for the SHL open API: client-credentials authentication with coalesced token
//! refresh, TTL response caching, and typed query builders in one small crate.
//!
//! ```no_run
//! # async fn demo() -> open_shl_client::error::Result<()> {
//! use open_shl_client::{client::ShlClient, config::ClientConfig, query::Filters};
//!
//! let client = ShlClient::new(ClientConfig::new("client-id", "client-secret"))?;
//! let games = client.games_in_season(2024).await?;
//! let scorers = client.player_stats(2024, &Filters::new().sort("points")).await?;
//! # let _ = (games, scorers);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod query;
pub mod request;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use oauth2::{HttpClientError, HttpRequest, HttpResponse};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
