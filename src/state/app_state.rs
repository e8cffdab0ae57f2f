use crate::state::app_settings::ServerSettings;
use anyhow::Context;
use log::info;
use std::sync::Arc;
use unihockey_api::client::UnihockeyApi;
use unihockey_api::roster::{JsonPlayerStore, PlayerStore};

/// Shared, read-only per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub api: UnihockeyApi,
    pub players: Arc<dyn PlayerStore>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    pub fn new(settings: ServerSettings) -> anyhow::Result<Self> {
        let players = match &settings.players_path {
            Some(path) => {
                let store = JsonPlayerStore::load(path)
                    .with_context(|| format!("loading player store {}", path.display()))?;
                info!("loaded rosters for {} teams from {}", store.team_count(), path.display());
                store
            }
            None => {
                info!("no player store configured, rosters will be empty");
                JsonPlayerStore::default()
            }
        };
        Ok(Self::with_store(settings, Arc::new(players)))
    }

    pub fn with_store(settings: ServerSettings, players: Arc<dyn PlayerStore>) -> Self {
        Self {
            api: UnihockeyApi::with_base_url(&settings.api_base),
            players,
            settings: Arc::new(settings),
        }
    }
}
