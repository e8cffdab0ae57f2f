// ---------------------------------------------------------------------------
// Mapping: Swiss Unihockey table rows → clean domain types
// ---------------------------------------------------------------------------

use crate::swissunihockey::{CellText, ColumnHeader, Link, RawCell, RawRow};
use crate::{Game, GameMode, RankingEntry, StatColumn};

const MAP_SERVICE: &str = "https://www.google.com/maps";
const NO_RESULT: &str = "-";

/// Cell positions of a games table. The upstream table has no column ids,
/// so each query mode gets its own fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub date_time: usize,
    pub location: usize,
    pub league: Option<usize>,
    pub home_team: usize,
    pub away_team: usize,
    pub result: usize,
}

impl GameLayout {
    pub const CLUB: GameLayout = GameLayout {
        date_time: 0,
        location: 1,
        league: Some(2),
        home_team: 3,
        away_team: 4,
        result: 5,
    };

    pub const TEAM: GameLayout = GameLayout {
        date_time: 0,
        location: 1,
        league: None,
        home_team: 2,
        away_team: 3,
        result: 4,
    };
}

impl GameMode {
    pub fn layout(&self) -> GameLayout {
        match self {
            GameMode::Club => GameLayout::CLUB,
            GameMode::Team => GameLayout::TEAM,
        }
    }
}

pub fn map_game_row(row: &RawRow, mode: GameMode) -> Game {
    let layout = mode.layout();
    let date_time = row.cell(layout.date_time);
    let location = row.cell(layout.location);

    Game {
        game_id: row.link.as_ref().and_then(Link::first_id),
        date: first_line(date_time),
        time: date_time.line(1).unwrap_or_default().to_owned(),
        location: location.lines().join(", "),
        location_url: location.link.as_ref().map(build_map_url).unwrap_or_default(),
        league: layout.league.map(|i| row.cell(i).lines().join(" - ")),
        home_team: first_line(row.cell(layout.home_team)),
        away_team: first_line(row.cell(layout.away_team)),
        result: row.cell(layout.result).line(0).unwrap_or(NO_RESULT).to_owned(),
    }
}

/// Map link for a venue. The upstream stores latitude in `y`, and the map
/// query wants latitude first.
pub fn build_map_url(link: &Link) -> String {
    match (link.is_map(), link.y, link.x) {
        (true, Some(lat), Some(lon)) => format!("{MAP_SERVICE}?q={lat},{lon}"),
        _ => String::new(),
    }
}

/// How the stat columns of a rankings row are read.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingColumns {
    /// The legacy full-view table with a known column order.
    Fixed,
    /// Every column after the team name, labelled by the response's headers.
    Headers(Vec<ColumnHeader>),
}

const RANK: usize = 0;
const TEAM_LOGO: usize = 1;
const TEAM_NAME: usize = 2;

/// Legacy full-view positions. Cell 4 (overtime wins) and 10 are not shown.
const FIXED_STATS: [(&str, usize); 7] = [
    ("Spiele", 3),
    ("Siege", 5),
    ("Unent.", 6),
    ("Nied.", 7),
    ("Tore", 8),
    ("TD", 9),
    ("Punkte", 11),
];

pub fn map_ranking_row(row: &RawRow, queried_team_id: &str, columns: &RankingColumns) -> RankingEntry {
    let stats = match columns {
        RankingColumns::Fixed => FIXED_STATS
            .iter()
            .map(|&(label, i)| StatColumn { label: label.to_owned(), value: stat_value(row.cell(i)) })
            .collect(),
        RankingColumns::Headers(headers) => row
            .cells
            .iter()
            .enumerate()
            .skip(TEAM_NAME + 1)
            .map(|(i, cell)| StatColumn {
                label: headers.get(i).map(ColumnHeader::label).unwrap_or_default().to_owned(),
                value: stat_value(cell),
            })
            .collect(),
    };

    let is_current_team = match (row.team_id(), parse_team_id(queried_team_id)) {
        (Some(row_team), Some(queried)) => row_team == queried,
        _ => false,
    };

    RankingEntry {
        rank: first_line(row.cell(RANK)),
        team_name: first_line(row.cell(TEAM_NAME)),
        team_logo_url: row.cell(TEAM_LOGO).image_url().to_owned(),
        stats,
        is_current_team,
    }
}

/// Leading decimal digits of a path parameter, so `"123"` and `"123-u21"`
/// both select team 123.
pub fn parse_team_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits = raw.len() - raw.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    raw[..digits].parse().ok()
}

fn first_line(cell: &RawCell) -> String {
    cell.line(0).unwrap_or_default().to_owned()
}

fn stat_value(cell: &RawCell) -> String {
    let value = match &cell.text {
        CellText::Lines(lines) => lines.first(),
        CellText::Scalar(s) => Some(s),
        CellText::Missing => None,
    };
    value.filter(|v| !v.is_empty()).map_or_else(|| NO_RESULT.to_owned(), String::clone)
}
