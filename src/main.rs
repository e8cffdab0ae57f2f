mod render;
mod routes;
mod state;
mod theme;

use crate::state::app_settings::ServerSettings;
use crate::state::app_state::AppState;
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();
    setup_logging();

    let settings = ServerSettings::load();
    let bind_addr = settings.bind_addr.clone();
    info!(
        "using {} (club {}), showing {} club / {} team games",
        settings.api_base, settings.club_id, settings.club_game_limit, settings.team_game_limit
    );

    let state = AppState::new(settings)?;
    let app = routes::router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server running at http://{bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins when set, otherwise `UNIHOCKEY_LOG` (default `info`).
fn setup_logging() {
    let env = if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Env::default()
    } else {
        env_logger::Env::new().filter_or("UNIHOCKEY_LOG", "info")
    };
    env_logger::Builder::from_env(env).init();
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("unihockey-proxy {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "unihockey-proxy - Swiss Unihockey games, rankings and rosters as HTML widgets

Usage:
  unihockey-proxy
  unihockey-proxy --help
  unihockey-proxy --version

Routes (append /dark or ?theme=dark for the dark theme):
  /api/games                       club games, newest first
  /api/team-games/{team_id}        team games, newest first
  /api/team-rankings/{team_id}     league table, team highlighted (?columns=headers)
  /api/team-players/{team_id}      roster from the player store

Environment:
  UNIHOCKEY_BIND           Listen address (default 0.0.0.0:3000)
  UNIHOCKEY_API_BASE       Upstream API root (default https://api-v2.swissunihockey.ch/api)
  UNIHOCKEY_CLUB_ID        Club shown by /api/games (default 447636)
  UNIHOCKEY_PLAYERS_JSON   Path to the JSON player store
  UNIHOCKEY_CLUB_GAMES     Club games shown (default 10)
  UNIHOCKEY_TEAM_GAMES     Team games shown (default 5)
  UNIHOCKEY_LOG            Log filter when RUST_LOG is unset (default info)"
}
