//! HTML pages for the widget routes. Every view shares one page shell and
//! differs only in its body and the selected theme.

use crate::theme::Theme;
use unihockey_api::{Game, GameLogos, Player, Rankings};

const ICONS_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn page(title: &str, theme: Theme, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="{ICONS_CSS}">
  <style>{styles}</style>
</head>
<body>
  <div class="container">
{body}
  </div>
</body>
</html>
"#,
        title = escape(title),
        styles = theme.stylesheet(),
    )
}

/// `logos` is parallel to `games`; missing entries render without a logo.
pub fn games_page(title: &str, games: &[Game], logos: &[GameLogos], theme: Theme) -> String {
    let mut body = String::from("<div class=\"games-list\">\n");
    if games.is_empty() {
        body.push_str("<p class=\"empty\">Keine Spiele gefunden</p>\n");
    }
    let no_logos = GameLogos::default();
    for (i, game) in games.iter().enumerate() {
        body.push_str(&game_card(game, logos.get(i).unwrap_or(&no_logos)));
    }
    body.push_str("</div>");
    page(title, theme, &body)
}

fn game_card(game: &Game, logos: &GameLogos) -> String {
    let location = if game.location_url.is_empty() {
        format!(
            r#"<i class="fas fa-map-marker-alt"></i><span>{}</span>"#,
            escape(&game.location)
        )
    } else {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="location-link"><i class="fas fa-map-marker-alt"></i><span>{}</span></a>"#,
            escape(&game.location_url),
            escape(&game.location)
        )
    };

    let league = match game.league.as_deref() {
        Some(league) if !league.is_empty() => format!(
            r#"<div class="info-item"><i class="fas fa-trophy"></i><span>{}</span></div>"#,
            escape(league)
        ),
        _ => String::new(),
    };

    format!(
        r#"<div class="game-card">
  <div class="teams">
    <div class="team"><img src="{home_logo}" alt="{home}" class="team-logo"><div class="team-name">{home}</div></div>
    <div class="vs-container"><div class="vs">VS</div><div class="result">{result}</div></div>
    <div class="team"><img src="{away_logo}" alt="{away}" class="team-logo"><div class="team-name">{away}</div></div>
  </div>
  <div class="game-info">
    <div class="info-item"><i class="far fa-calendar"></i><span>{date}</span></div>
    <div class="info-item"><i class="far fa-clock"></i><span>{time}</span></div>
    <div class="info-item">{location}</div>
    {league}
  </div>
</div>
"#,
        home_logo = escape(&logos.home_logo),
        away_logo = escape(&logos.away_logo),
        home = escape(&game.home_team),
        away = escape(&game.away_team),
        result = escape(&game.result),
        date = escape(&game.date),
        time = escape(&game.time),
    )
}

pub fn rankings_page(rankings: &Rankings, theme: Theme) -> String {
    let title = rankings.title.as_deref().unwrap_or("Swiss Unihockey Rankings");
    let mut body = String::from("<table class=\"rankings-table\">\n<thead><tr><th>Rang</th><th>Team</th>");
    // Every row of one table carries the same columns; the first row names them.
    let labels: Vec<&str> = rankings
        .entries
        .first()
        .map(|e| e.stats.iter().map(|s| s.label.as_str()).collect())
        .unwrap_or_default();
    for label in &labels {
        body.push_str(&format!("<th>{}</th>", escape(label)));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for entry in &rankings.entries {
        let class = if entry.is_current_team { "highlight" } else { "" };
        body.push_str(&format!(
            r#"<tr class="{class}"><td data-label="Rang">{rank}</td><td data-label="Team"><div class="team-cell"><img src="{logo}" alt="{name}" class="team-logo">{name}</div></td>"#,
            rank = escape(&entry.rank),
            logo = escape(&entry.team_logo_url),
            name = escape(&entry.team_name),
        ));
        for stat in &entry.stats {
            body.push_str(&format!(
                r#"<td data-label="{}">{}</td>"#,
                escape(&stat.label),
                escape(&stat.value)
            ));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>");
    page(title, theme, &body)
}

pub fn players_page(team_id: &str, players: &[Player], theme: Theme) -> String {
    let mut body = format!("<h1>Kader {}</h1>\n", escape(team_id));
    if players.is_empty() {
        body.push_str("<p class=\"empty\">Keine Spieler gefunden</p>\n");
        return page("Swiss Unihockey Kader", theme, &body);
    }

    body.push_str("<table>\n<thead><tr><th>#</th><th>Name</th><th>Position</th><th>Jahrgang</th></tr></thead>\n<tbody>\n");
    for player in players {
        let number = player.jersey_number.map(|n| n.to_string()).unwrap_or_default();
        let born = player.birth_date.map(|d| d.format("%d.%m.%Y").to_string()).unwrap_or_default();
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            number,
            escape(&player.full_name()),
            player.position.label(),
            born
        ));
    }
    body.push_str("</tbody>\n</table>");
    page("Swiss Unihockey Kader", theme, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unihockey_api::{Position, RankingEntry, StatColumn};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }

    #[test]
    fn game_card_links_location_only_with_map_url() {
        let mut game = Game { location: "Halle".into(), league: None, ..Default::default() };
        let html = games_page("Games", std::slice::from_ref(&game), &[], Theme::Light);
        // The stylesheet names both classes, so look for the markup itself.
        assert!(!html.contains(r#"class="location-link""#));
        assert!(!html.contains(r#"class="fas fa-trophy""#));
        assert!(html.contains("<span>Halle</span>"));

        game.location_url = "https://www.google.com/maps?q=47.1,8.5".into();
        game.league = Some("Herren GF".into());
        let html = games_page("Games", &[game], &[], Theme::Dark);
        assert!(html.contains(r#"href="https://www.google.com/maps?q=47.1,8.5""#));
        assert!(html.contains(r#"class="location-link""#));
        assert!(html.contains(r#"<i class="fas fa-trophy"></i><span>Herren GF</span>"#));
        assert!(html.contains("rgb(25, 25, 25)"));
    }

    #[test]
    fn rankings_highlight_current_team() {
        let entry = |name: &str, current: bool| RankingEntry {
            rank: "1".into(),
            team_name: name.into(),
            team_logo_url: String::new(),
            stats: vec![StatColumn { label: "Punkte".into(), value: "30".into() }],
            is_current_team: current,
        };
        let rankings = Rankings { title: None, entries: vec![entry("Other", false), entry("Mine", true)] };
        let html = rankings_page(&rankings, Theme::Light);
        assert!(html.contains("<th>Punkte</th>"));
        assert_eq!(html.matches(r#"<tr class="highlight">"#).count(), 1);
        assert!(html.contains("<title>Swiss Unihockey Rankings</title>"));
    }

    #[test]
    fn players_page_lists_roster() {
        let players = vec![Player {
            id: "7".into(),
            first_name: "Lena".into(),
            last_name: "Meier".into(),
            position: Position::Goalie,
            jersey_number: Some(1),
            birth_date: chrono::NaiveDate::from_ymd_opt(2001, 4, 12),
        }];
        let html = players_page("429611", &players, Theme::Light);
        assert!(html.contains("<td>1</td><td>Lena Meier</td><td>Torhüter</td><td>12.04.2001</td>"));
        assert!(players_page("1", &[], Theme::Dark).contains("Keine Spieler gefunden"));
    }
}
