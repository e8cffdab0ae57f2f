/// Team rosters. Players do not come from the league API but from a small
/// key-value store keyed by team identifier.
use crate::client::{ApiError, ApiResult};
use crate::swissunihockey::{lenient_i64, lenient_string};
use crate::Player;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Unset,
    Forward,
    Center,
    Defense,
    Goalie,
    /// Code outside the known table.
    Unknown,
}

impl Position {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Position::Unset,
            2 => Position::Forward,
            3 => Position::Center,
            4 => Position::Defense,
            5 => Position::Goalie,
            _ => Position::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Unset => "Nicht gesetzt",
            Position::Forward => "Stürmer",
            Position::Center => "Center",
            Position::Defense => "Verteidiger",
            Position::Goalie => "Torhüter",
            Position::Unknown => "Keine Position",
        }
    }
}

pub fn position_label(code: i64) -> &'static str {
    Position::from_code(code).label()
}

/// A player row as stored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub position: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jersey_number: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub birth_date: Option<String>,
}

pub fn map_player(record: &PlayerRecord) -> Player {
    Player {
        id: record.id.clone().unwrap_or_default(),
        first_name: record.first_name.clone().unwrap_or_default(),
        last_name: record.last_name.clone().unwrap_or_default(),
        position: record.position.map(Position::from_code).unwrap_or(Position::Unknown),
        jersey_number: record.jersey_number.and_then(|n| u32::try_from(n).ok()),
        birth_date: record.birth_date.as_deref().and_then(parse_birth_date),
    }
}

fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Stored dates are usually ISO, some older entries use the Swiss format.
    let s = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .ok()
}

/// Jersey number ascending; players without a number go last.
pub fn sort_roster(players: &mut [Player]) {
    players.sort_by_key(|p| (p.jersey_number.is_none(), p.jersey_number));
}

pub trait PlayerStore: Send + Sync {
    /// Unknown teams have an empty roster.
    fn players_for_team(&self, team_key: &str) -> ApiResult<Vec<PlayerRecord>>;
}

/// Player store backed by one JSON document: `{ "<team>": [ {player}, ... ] }`.
#[derive(Debug, Clone, Default)]
pub struct JsonPlayerStore {
    teams: HashMap<String, Vec<PlayerRecord>>,
}

impl JsonPlayerStore {
    pub fn from_json_str(content: &str) -> ApiResult<Self> {
        let teams = serde_json::from_str(content)
            .map_err(|e| ApiError::Store(format!("invalid player store json: {e}")))?;
        Ok(Self { teams })
    }

    pub fn load(path: &Path) -> ApiResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Store(format!("could not read {}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

impl PlayerStore for JsonPlayerStore {
    fn players_for_team(&self, team_key: &str) -> ApiResult<Vec<PlayerRecord>> {
        Ok(self.teams.get(team_key.trim()).cloned().unwrap_or_default())
    }
}

/// Load a team's roster through any store and shape it for display.
pub fn team_roster(store: &dyn PlayerStore, team_key: &str) -> ApiResult<Vec<Player>> {
    let mut players: Vec<Player> = store.players_for_team(team_key)?.iter().map(map_player).collect();
    sort_roster(&mut players);
    Ok(players)
}
