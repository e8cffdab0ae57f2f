pub mod client;
pub mod dates;
pub mod mapping;
pub mod roster;
pub mod swissunihockey;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use dates::{current_season, parse_date, sort_games_newest_first};
pub use mapping::{build_map_url, map_game_row, map_ranking_row, parse_team_id};
pub use roster::{position_label, Position};

/// League season identifier, e.g. 2024 for the 2024/25 season.
pub type Season = i32;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the upstream table format
// ---------------------------------------------------------------------------

/// Which games query a row came from. The cell layout differs per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Club,
    Team,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Club => "club",
            GameMode::Team => "team",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: Option<String>,
    pub date: String, // "15.03.2024" or "gestern"
    pub time: String,
    pub location: String,
    pub location_url: String, // empty when the venue has no coordinates
    pub league: Option<String>, // None in team mode
    pub home_team: String,
    pub away_team: String,
    pub result: String,
}

/// Team logos from the per-game detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogos {
    pub home_logo: String,
    pub away_logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatColumn {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: String,
    pub team_name: String,
    pub team_logo_url: String,
    pub stats: Vec<StatColumn>,
    pub is_current_team: bool,
}

impl RankingEntry {
    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats.iter().find(|s| s.label == label).map(|s| s.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rankings {
    pub title: Option<String>,
    pub entries: Vec<RankingEntry>,
}

impl Rankings {
    pub fn current_team(&self) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.is_current_team)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub jersey_number: Option<u32>,
    pub birth_date: Option<NaiveDate>,
}

impl Player {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (true, _) => self.last_name.clone(),
            (_, true) => self.first_name.clone(),
        }
    }
}
