#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Case-insensitive `light` / `dark`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("dark") {
            Some(Theme::Dark)
        } else if name.eq_ignore_ascii_case("light") {
            Some(Theme::Light)
        } else {
            None
        }
    }
}

/// Colors that differ between the light and the dark widgets.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
    pub shadow: &'static str,
    pub highlight: &'static str,
    pub accent: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#fff",
    card: "white",
    text: "#333",
    muted: "#666",
    border: "#eee",
    shadow: "rgba(0, 0, 0, 0.1)",
    highlight: "#e8f4ff",
    accent: "#0066cc",
};

const DARK: Palette = Palette {
    background: "rgb(25, 25, 25)",
    card: "rgb(35, 35, 35)",
    text: "#fff",
    muted: "#999",
    border: "rgb(50, 50, 50)",
    shadow: "rgba(0, 0, 0, 0.2)",
    highlight: "rgb(45, 60, 80)",
    accent: "#4da3ff",
};

impl Theme {
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn stylesheet(&self) -> String {
        let p = self.palette();
        format!(
            r#"
* {{ margin: 0; padding: 0; box-sizing: border-box;
     font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif; }}
body {{ background-color: {bg}; color: {text}; padding: 1rem; }}
.container {{ max-width: 1000px; margin: 0 auto; }}
h1 {{ font-size: 1.2rem; margin-bottom: 0.75rem; }}
.games-list {{ display: flex; flex-direction: column; gap: 0.75rem; }}
.game-card {{ background: {card}; border-radius: 8px; padding: 0.75rem; box-shadow: 0 4px 6px {shadow}; }}
.teams {{ display: flex; align-items: center; justify-content: space-between; gap: 1rem; }}
.team {{ display: flex; flex-direction: column; align-items: center; text-align: center; flex: 1; }}
.team-logo {{ width: 45px; height: 45px; object-fit: contain; margin-bottom: 0.5rem; }}
.team-name {{ font-weight: 600; font-size: 0.9rem; }}
.vs {{ font-size: 0.8rem; color: {muted}; }}
.result {{ font-size: 1.25rem; font-weight: 700; }}
.game-info {{ border-top: 1px solid {border}; margin-top: 0.75rem; padding-top: 0.5rem; display: flex;
              justify-content: center; gap: 1.5rem; flex-wrap: wrap; color: {muted}; font-size: 0.85rem; }}
.info-item {{ display: flex; align-items: center; gap: 0.5rem; }}
.location-link {{ color: inherit; text-decoration: none; }}
.location-link:hover {{ color: {accent}; }}
table {{ width: 100%; border-collapse: collapse; background: {card}; border-radius: 8px; overflow: hidden;
         box-shadow: 0 4px 6px {shadow}; }}
th, td {{ padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid {border}; }}
th {{ color: {muted}; font-weight: 600; }}
tr.highlight td {{ background-color: {highlight}; font-weight: 600; }}
.team-cell {{ display: flex; align-items: center; gap: 0.5rem; }}
.team-cell .team-logo {{ width: 24px; height: 24px; margin: 0; }}
.empty {{ color: {muted}; text-align: center; padding: 1rem; }}
@media (max-width: 768px) {{
  body {{ padding: 0.5rem; }}
  .team-name {{ font-size: 0.8rem; max-width: 80px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }}
  .vs {{ display: none; }}
  th, td {{ padding: 0.4rem; font-size: 0.8rem; }}
}}
"#,
            bg = p.background,
            text = p.text,
            card = p.card,
            shadow = p.shadow,
            muted = p.muted,
            border = p.border,
            accent = p.accent,
            highlight = p.highlight,
        )
    }
}
