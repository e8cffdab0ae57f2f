use crate::{Game, Season};
use chrono::{Datelike, Days, NaiveDate};
use std::cmp::Reverse;

/// Relative date the upstream uses for games played the day before.
const YESTERDAY_TOKEN: &str = "gestern";

/// Seasons run July through June and are named after the year they start in.
pub fn current_season(today: NaiveDate) -> Season {
    if today.month() >= 7 { today.year() } else { today.year() - 1 }
}

/// Parse an upstream game date (`DD.MM.YYYY` or `gestern`).
///
/// Returns `None` for anything else, including impossible calendar dates
/// like `31.02.2024`.
pub fn parse_date(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim();
    if s.eq_ignore_ascii_case(YESTERDAY_TOKEN) {
        return today.checked_sub_days(Days::new(1));
    }

    let mut parts = s.split('.').map(|p| p.trim().parse::<i32>().ok());
    let (Some(Some(day)), Some(Some(month)), Some(Some(year)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Newest first. Games whose date does not parse go last; ties keep upstream order.
pub fn sort_games_newest_first(games: &mut [Game], today: NaiveDate) {
    games.sort_by_cached_key(|g| {
        let date = parse_date(&g.date, today);
        (date.is_none(), Reverse(date))
    });
}
