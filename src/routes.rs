use crate::render;
use crate::state::app_state::AppState;
use crate::theme::Theme;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use log::{debug, error};
use serde::Deserialize;
use serde_json::json;
use unihockey_api::client::{ApiError, RankingColumnMode};
use unihockey_api::roster::team_roster;
use unihockey_api::{current_season, sort_games_newest_first, Game};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/games", get(club_games))
        .route("/api/games/dark", get(club_games_dark))
        .route("/api/team-games/{team_id}", get(team_games))
        .route("/api/team-games/{team_id}/dark", get(team_games_dark))
        .route("/api/team-rankings/{team_id}", get(team_rankings))
        .route("/api/team-rankings/{team_id}/dark", get(team_rankings_dark))
        .route("/api/team-players/{team_id}", get(team_players))
        .route("/api/team-players/{team_id}/dark", get(team_players_dark))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

/// Query options shared by every widget route. Unknown values fall back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    theme: Option<String>,
    columns: Option<String>,
}

impl ViewParams {
    fn dark(mut self) -> Self {
        self.theme = Some("dark".into());
        self
    }

    fn theme(&self) -> Theme {
        self.theme.as_deref().and_then(Theme::from_name).unwrap_or_default()
    }

    fn column_mode(&self) -> RankingColumnMode {
        match self.columns.as_deref() {
            Some(c) if c.eq_ignore_ascii_case("headers") => RankingColumnMode::Headers,
            _ => RankingColumnMode::Fixed,
        }
    }
}

/// An upstream or store failure, turned into an error page.
#[derive(Debug)]
pub struct AppError(ApiError);

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Error: {}", self.0);
        let (status, message) = match self.0 {
            ApiError::ShapeMismatch(_) => {
                (StatusCode::BAD_GATEWAY, "Unexpected response from Swiss Unihockey API")
            }
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error reading player data"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching data from Swiss Unihockey API"),
        };
        (status, message).into_response()
    }
}

type PageResult = Result<Html<String>, AppError>;

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

async fn welcome() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the API" }))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn club_games(State(state): State<AppState>, Query(params): Query<ViewParams>) -> PageResult {
    let today = today();
    let games = state
        .api
        .fetch_club_games(&state.settings.club_id, current_season(today))
        .await?;
    let limit = state.settings.club_game_limit;
    Ok(games_page(&state, games, today, limit, "Swiss Unihockey Games", params.theme()).await)
}

async fn club_games_dark(state: State<AppState>, Query(params): Query<ViewParams>) -> PageResult {
    club_games(state, Query(params.dark())).await
}

async fn team_games(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    let today = today();
    let games = state.api.fetch_team_games(&team_id, current_season(today)).await?;
    let limit = state.settings.team_game_limit;
    Ok(games_page(&state, games, today, limit, "Swiss Unihockey Team Games", params.theme()).await)
}

async fn team_games_dark(
    state: State<AppState>,
    team_id: Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    team_games(state, team_id, Query(params.dark())).await
}

/// Newest games first, cut to the view's limit, with logos looked up concurrently.
async fn games_page(
    state: &AppState,
    mut games: Vec<Game>,
    today: NaiveDate,
    limit: usize,
    title: &str,
    theme: Theme,
) -> Html<String> {
    sort_games_newest_first(&mut games, today);
    games.truncate(limit);
    let logos = state.api.fetch_logos_for(&games).await;
    debug!("rendering {} games", games.len());
    Html(render::games_page(title, &games, &logos, theme))
}

async fn team_rankings(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    let season = current_season(today());
    let rankings = state
        .api
        .fetch_team_rankings(&team_id, season, params.column_mode())
        .await?;
    Ok(Html(render::rankings_page(&rankings, params.theme())))
}

async fn team_rankings_dark(
    state: State<AppState>,
    team_id: Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    team_rankings(state, team_id, Query(params.dark())).await
}

async fn team_players(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    let players = team_roster(state.players.as_ref(), &team_id)?;
    Ok(Html(render::players_page(&team_id, &players, params.theme())))
}

async fn team_players_dark(
    state: State<AppState>,
    team_id: Path<String>,
    Query(params): Query<ViewParams>,
) -> PageResult {
    team_players(state, team_id, Query(params.dark())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::ServerSettings;
    use axum::body::Body;
    use axum::http::Request;
    use mockito::{Matcher, Server};
    use std::sync::Arc;
    use tower::util::ServiceExt;
    use unihockey_api::roster::JsonPlayerStore;

    const PLAYERS: &str = r#"{"429611": [
        {"id": 7, "first_name": "Lena", "last_name": "Meier", "position": 5, "jersey_number": 1, "birth_date": "2001-04-12"}
    ]}"#;

    fn test_state(api_base: &str) -> AppState {
        let settings = ServerSettings { api_base: api_base.into(), ..Default::default() };
        let store = JsonPlayerStore::from_json_str(PLAYERS).unwrap();
        AppState::with_store(settings, Arc::new(store))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let cors = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap(), cors)
    }

    fn team_game_row(date: &str, home: &str) -> serde_json::Value {
        json!({"cells": [
            {"text": [date, "18:00"]},
            {"text": ["Halle"]},
            {"text": [home]},
            {"text": ["Gast"]},
            {"text": ["3:3"]}
        ]})
    }

    #[tokio::test]
    async fn welcome_is_json_with_cors() {
        let (status, body, cors) = get_page(router(test_state("http://127.0.0.1:9")), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"Welcome to the API"}"#);
        assert_eq!(cors.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn team_games_are_sorted_and_limited() {
        let mut server = Server::new_async().await;
        let rows: Vec<serde_json::Value> = [
            ("01.10.2023", "Oldest"),
            ("01.01.2024", "Newest"),
            ("kaputt", "Broken"),
            ("05.11.2023", "G3"),
            ("12.11.2023", "G4"),
            ("19.11.2023", "G5"),
            ("26.11.2023", "G6"),
        ]
        .iter()
        .map(|(date, home)| team_game_row(date, home))
        .collect();
        let _games = server
            .mock("GET", "/games")
            .match_query(Matcher::UrlEncoded("team_id".into(), "429611".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"regions": [{"rows": rows}]}}).to_string())
            .create_async()
            .await;

        let app = router(test_state(&server.url()));
        let (status, body, _) = get_page(app, "/api/team-games/429611/dark").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("rgb(25, 25, 25)"), "dark route renders the dark theme");
        assert_eq!(body.matches("class=\"game-card\"").count(), 5);
        let newest = body.find("Newest").unwrap();
        let g6 = body.find("G6").unwrap();
        assert!(newest < g6);
        assert!(!body.contains("Oldest"));
        assert!(!body.contains("Broken"));
    }

    #[tokio::test]
    async fn upstream_shape_mismatch_is_bad_gateway() {
        let mut server = Server::new_async().await;
        let _games = server
            .mock("GET", "/games")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {}}"#)
            .create_async()
            .await;

        let (status, body, _) = get_page(router(test_state(&server.url())), "/api/games").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, "Unexpected response from Swiss Unihockey API");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_internal_error() {
        let (status, body, _) =
            get_page(router(test_state("http://127.0.0.1:9")), "/api/team-games/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error fetching data from Swiss Unihockey API");
    }

    #[test]
    fn view_params_fall_back_on_unknown_values() {
        let params = |theme: Option<&str>, columns: Option<&str>| ViewParams {
            theme: theme.map(Into::into),
            columns: columns.map(Into::into),
        };
        assert_eq!(params(Some("Dark"), None).theme(), Theme::Dark);
        assert_eq!(params(Some("blue"), None).theme(), Theme::Light);
        assert_eq!(params(None, Some("HEADERS")).column_mode(), RankingColumnMode::Headers);
        assert_eq!(params(None, Some("x")).column_mode(), RankingColumnMode::Fixed);
        assert_eq!(params(Some("blue"), None).dark().theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn unknown_query_values_still_render() {
        let app = router(test_state("http://127.0.0.1:9"));

        let (status, body, _) = get_page(app.clone(), "/api/team-players/429611?theme=Dark").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("rgb(25, 25, 25)"));

        let (status, body, _) =
            get_page(app, "/api/team-players/429611?theme=blue&columns=x").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Lena Meier"));
        assert!(!body.contains("rgb(25, 25, 25)"));
    }

    #[tokio::test]
    async fn players_come_from_store() {
        let app = router(test_state("http://127.0.0.1:9"));
        let (status, body, _) = get_page(app.clone(), "/api/team-players/429611?theme=dark").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Lena Meier"));
        assert!(body.contains("Torhüter"));

        let (status, body, _) = get_page(app, "/api/team-players/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Keine Spieler gefunden"));
    }
}
