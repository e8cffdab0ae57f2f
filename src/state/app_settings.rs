use log::warn;
use std::path::PathBuf;
use unihockey_api::client::SWISS_UNIHOCKEY_V2;

/// Club whose games `/api/games` shows.
const DEFAULT_CLUB_ID: &str = "447636";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub api_base: String,
    pub club_id: String,
    /// JSON player store; rosters are empty without one.
    pub players_path: Option<PathBuf>,
    pub club_game_limit: usize,
    pub team_game_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            api_base: SWISS_UNIHOCKEY_V2.into(),
            club_id: DEFAULT_CLUB_ID.into(),
            players_path: None,
            club_game_limit: 10,
            team_game_limit: 5,
        }
    }
}

impl ServerSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let limit = |key: &str, default: usize| match var(key) {
            Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
                warn!("ignoring {key}={raw:?}: not a number, using {default}");
                default
            }),
            None => default,
        };

        let defaults = Self::default();
        Self {
            bind_addr: var("UNIHOCKEY_BIND").unwrap_or(defaults.bind_addr),
            api_base: var("UNIHOCKEY_API_BASE").unwrap_or(defaults.api_base),
            club_id: var("UNIHOCKEY_CLUB_ID").unwrap_or(defaults.club_id),
            players_path: var("UNIHOCKEY_PLAYERS_JSON").map(PathBuf::from),
            club_game_limit: limit("UNIHOCKEY_CLUB_GAMES", defaults.club_game_limit),
            team_game_limit: limit("UNIHOCKEY_TEAM_GAMES", defaults.team_game_limit),
        }
    }
}
