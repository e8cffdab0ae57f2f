use crate::mapping::{map_game_row, map_ranking_row, RankingColumns};
use crate::swissunihockey::{LeagueContext, TableResponse};
use crate::{Game, GameLogos, GameMode, Rankings, Season};
use futures_util::future::join_all;
use log::{debug, warn};
use reqwest::{Client, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const SWISS_UNIHOCKEY_V2: &str = "https://api-v2.swissunihockey.ch/api";

/// Swiss Unihockey API client.
#[derive(Debug, Clone)]
pub struct UnihockeyApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for UnihockeyApi {
    fn default() -> Self {
        Self::with_base_url(SWISS_UNIHOCKEY_V2)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The upstream answered, but not with the table structure we map from.
    ShapeMismatch(String),
    Store(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::ShapeMismatch(path) => write!(f, "Upstream shape mismatch: missing {path}"),
            ApiError::Store(msg) => write!(f, "Player store error: {msg}"),
            ApiError::Other(s) => write!(f, "Error: {s}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Selects how rankings columns are read; see [`RankingColumns`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingColumnMode {
    #[default]
    Fixed,
    Headers,
}

impl UnihockeyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client against another API root, e.g. a mock server in tests.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent("unihockey-proxy/0.1")
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All games of a club in the given season, in upstream order.
    pub async fn fetch_club_games(&self, club_id: &str, season: Season) -> ApiResult<Vec<Game>> {
        let url = self.url(
            "games",
            &[("mode", "club"), ("club_id", club_id), ("season", &season.to_string())],
        )?;
        self.fetch_games(url, GameMode::Club).await
    }

    /// All games of a single team in the given season, in upstream order.
    pub async fn fetch_team_games(&self, team_id: &str, season: Season) -> ApiResult<Vec<Game>> {
        let url = self.url(
            "games",
            &[("mode", "team"), ("team_id", team_id), ("season", &season.to_string())],
        )?;
        self.fetch_games(url, GameMode::Team).await
    }

    async fn fetch_games(&self, url: Url, mode: GameMode) -> ApiResult<Vec<Game>> {
        let raw: TableResponse = self.get(url).await?;
        let games: Vec<Game> = raw
            .first_region_rows()?
            .iter()
            .map(|row| map_game_row(row, mode))
            .collect();
        debug!("mapped {} {} games", games.len(), mode.as_str());
        Ok(games)
    }

    /// League, game class and group the team plays in this season.
    pub async fn fetch_league_context(&self, team_id: &str, season: Season) -> ApiResult<LeagueContext> {
        let url = self.url(
            "games",
            &[("mode", "list"), ("team_id", team_id), ("season", &season.to_string())],
        )?;
        let raw: TableResponse = self.get(url).await?;
        raw.context().cloned()
    }

    /// Rankings of the team's league group. The league context has to be
    /// looked up first, so the two calls run one after the other.
    pub async fn fetch_team_rankings(
        &self,
        team_id: &str,
        season: Season,
        mode: RankingColumnMode,
    ) -> ApiResult<Rankings> {
        let context = self.fetch_league_context(team_id, season).await?;
        debug!("team {team_id} plays in {context:?}");

        let season = season.to_string();
        let url = self.url(
            "rankings",
            &[
                ("tabs", "off"),
                ("locale", "de_CH"),
                ("split", "on"),
                ("season", &season),
                ("league", context.league.as_deref().unwrap_or_default()),
                ("game_class", context.game_class.as_deref().unwrap_or_default()),
                ("view", "full"),
                ("group", context.group.as_deref().unwrap_or_default()),
            ],
        )?;
        let raw: TableResponse = self.get(url).await?;

        let columns = match mode {
            RankingColumnMode::Fixed => RankingColumns::Fixed,
            RankingColumnMode::Headers => RankingColumns::Headers(raw.headers().to_vec()),
        };
        let entries = raw
            .first_region_rows()?
            .iter()
            .map(|row| map_ranking_row(row, team_id, &columns))
            .collect();

        Ok(Rankings { title: raw.title().map(str::to_owned), entries })
    }

    /// Team logos from the game detail table. Logos are decoration, so any
    /// failure yields empty logos instead of an error.
    pub async fn fetch_game_logos(&self, game_id: &str) -> GameLogos {
        match self.try_fetch_game_logos(game_id).await {
            Ok(logos) => logos,
            Err(e) => {
                warn!("Error fetching game details for game {game_id}: {e}");
                GameLogos::default()
            }
        }
    }

    async fn try_fetch_game_logos(&self, game_id: &str) -> ApiResult<GameLogos> {
        let url = self.url(&format!("games/{game_id}"), &[])?;
        let raw: TableResponse = self.get(url).await?;
        let row = raw
            .first_region_rows()?
            .first()
            .ok_or_else(|| ApiError::ShapeMismatch("data.regions[0].rows[0]".into()))?;
        Ok(GameLogos {
            home_logo: row.cell(0).image_url().to_owned(),
            away_logo: row.cell(2).image_url().to_owned(),
        })
    }

    /// Logos for each game, looked up concurrently and returned in game order.
    pub async fn fetch_logos_for(&self, games: &[Game]) -> Vec<GameLogos> {
        join_all(games.iter().map(|game| async move {
            match game.game_id.as_deref() {
                Some(id) => self.fetch_game_logos(id).await,
                None => GameLogos::default(),
            }
        }))
        .await
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        let base = format!("{}/{path}", self.base_url);
        let url = if params.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, params)
        };
        url.map_err(|e| ApiError::Other(format!("invalid url {base}: {e}")))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_string())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_string()))
                }
            }
        }
    }
}
