//! Resource endpoints and their path templates.

// self
use crate::{
	_prelude::*,
	client::params::{GameId, Season, TeamId},
};

/// One addressable resource of the open API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
	/// `/articles`
	Articles,
	/// `/videos`
	Videos,
	/// `/teams`
	Teams,
	/// `/teams/{teamId}`
	Team(TeamId),
	/// `/seasons/{season}/games`
	GamesInSeason(Season),
	/// `/seasons/{season}/games/{gameId}`
	Game(Season, GameId),
	/// `/seasons/{season}/statistics/teams/standings`
	Standings(Season),
	/// `/seasons/{season}/statistics/goalkeepers`
	GoalkeeperStats(Season),
	/// `/seasons/{season}/statistics/players`
	PlayerStats(Season),
}
impl Endpoint {
	/// Path relative to the API base URL, without a query string.
	pub fn path(&self) -> String {
		match self {
			Self::Articles => "/articles".into(),
			Self::Videos => "/videos".into(),
			Self::Teams => "/teams".into(),
			Self::Team(team_id) => format!("/teams/{team_id}"),
			Self::GamesInSeason(season) => format!("/seasons/{season}/games"),
			Self::Game(season, game_id) => format!("/seasons/{season}/games/{game_id}"),
			Self::Standings(season) => format!("/seasons/{season}/statistics/teams/standings"),
			Self::GoalkeeperStats(season) => format!("/seasons/{season}/statistics/goalkeepers"),
			Self::PlayerStats(season) => format!("/seasons/{season}/statistics/players"),
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.path())
	}
}
