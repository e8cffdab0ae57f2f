/// Swiss Unihockey API v2 raw wire types.
/// Every endpoint answers with the same generic table document:
/// `{ data: { regions: [ { rows: [ { cells: [...] } ] } ], context, headers, title } }`.
/// These are mapped to the domain types in mapping.rs.
use crate::client::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Table document
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TableResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<TableData>,
}

impl TableResponse {
    /// Rows of the first region. A document without `data.regions[0].rows`
    /// is not something the mappers can work with.
    pub fn first_region_rows(&self) -> ApiResult<&[RawRow]> {
        self.data
            .as_ref()
            .and_then(|d| d.regions.first())
            .and_then(|r| r.rows.as_deref())
            .ok_or_else(|| ApiError::ShapeMismatch("data.regions[0].rows".into()))
    }

    pub fn context(&self) -> ApiResult<&LeagueContext> {
        self.data
            .as_ref()
            .and_then(|d| d.context.as_ref())
            .ok_or_else(|| ApiError::ShapeMismatch("data.context".into()))
    }

    pub fn headers(&self) -> &[ColumnHeader] {
        self.data.as_ref().map(|d| d.headers.as_slice()).unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.title.as_deref())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TableData {
    #[serde(default, deserialize_with = "lenient_slots")]
    pub regions: Vec<Region>,
    #[serde(default, deserialize_with = "lenient")]
    pub context: Option<LeagueContext>,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub headers: Vec<ColumnHeader>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Region {
    /// None when the key is missing or not a list, which callers treat as a
    /// shape error. Rows that are not objects are skipped.
    #[serde(default, deserialize_with = "lenient_rows")]
    pub rows: Option<Vec<RawRow>>,
}

/// League coordinates of a team, returned by `games?mode=list`.
/// `league` and `game_class` arrive as numbers, `group` as free text.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct LeagueContext {
    #[serde(default, deserialize_with = "lenient_string")]
    pub league: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub group: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ColumnHeader {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub long: Option<String>,
}

impl ColumnHeader {
    /// Long label when present, short label otherwise.
    pub fn label(&self) -> &str {
        self.long
            .as_deref()
            .filter(|l| !l.is_empty())
            .or(self.text.as_deref())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Rows and cells
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RawRow {
    #[serde(default, deserialize_with = "lenient_slots")]
    pub cells: Vec<RawCell>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<Link>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<RowData>,
}

impl RawRow {
    /// Missing cells read as empty cells.
    pub fn cell(&self, index: usize) -> &RawCell {
        static EMPTY: RawCell = RawCell { text: CellText::Missing, image: None, link: None };
        self.cells.get(index).unwrap_or(&EMPTY)
    }

    /// Team id carried in the structured side-channel, not in the cell text.
    pub fn team_id(&self) -> Option<i64> {
        self.data.as_ref()?.team.as_ref()?.id
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RowData {
    #[serde(default, deserialize_with = "lenient")]
    pub team: Option<RowTeam>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RowTeam {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RawCell {
    #[serde(default)]
    pub text: CellText,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<Link>,
}

impl RawCell {
    /// Lines of text; empty unless the upstream sent an actual list.
    pub fn lines(&self) -> &[String] {
        match &self.text {
            CellText::Lines(lines) => lines,
            _ => &[],
        }
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines().get(index).map(String::as_str)
    }

    pub fn image_url(&self) -> &str {
        self.image.as_ref().and_then(|i| i.url.as_deref()).unwrap_or_default()
    }
}

/// A cell's `text` field. The upstream normally sends a list of lines but
/// occasionally a bare scalar, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellText {
    #[default]
    Missing,
    Lines(Vec<String>),
    Scalar(String),
}

impl<'de> Deserialize<'de> for CellText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            // Null entries keep their slot so positional lines (date, time) stay aligned.
            Value::Array(items) => {
                CellText::Lines(items.iter().map(|v| scalar_to_string(v).unwrap_or_default()).collect())
            }
            Value::Null => CellText::Missing,
            other => scalar_to_string(&other).map(CellText::Scalar).unwrap_or_default(),
        };
        Ok(text)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// Row links carry game ids, cell links carry map coordinates.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Link {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub ids: Vec<Value>,
}

impl Link {
    pub fn is_map(&self) -> bool {
        self.kind.as_deref() == Some("map")
    }

    pub fn first_id(&self) -> Option<String> {
        self.ids.first().and_then(scalar_to_string).filter(|id| !id.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

/// Any value that does not decode as `T` reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// A list whose bad entries become defaults, so positions are kept.
/// Anything but a list reads as empty.
fn lenient_slots<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Option<Vec<RawRow>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts strings and numbers; anything else reads as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?))
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_accepts_lists_scalars_and_garbage() {
        let cells: Vec<RawCell> = serde_json::from_str(
            r#"[{"text": ["a", 2, null]}, {"text": "solo"}, {"text": {"x": 1}}, {}]"#,
        )
        .unwrap();
        assert_eq!(cells[0].lines(), ["a", "2", ""]);
        assert_eq!(cells[1].text, CellText::Scalar("solo".into()));
        assert!(cells[1].lines().is_empty(), "scalar text is not a list of lines");
        assert_eq!(cells[2].text, CellText::Missing);
        assert_eq!(cells[3].text, CellText::Missing);
    }

    #[test]
    fn coordinates_decode_from_numbers_or_strings() {
        let link: Link = serde_json::from_str(r#"{"type": "map", "x": "8.5", "y": 47.1}"#).unwrap();
        assert!(link.is_map());
        assert_eq!(link.x, Some(8.5));
        assert_eq!(link.y, Some(47.1));
    }

    #[test]
    fn first_region_rows_reports_missing_structure() {
        let empty: TableResponse = serde_json::from_str(r#"{"data": {"regions": []}}"#).unwrap();
        assert!(matches!(empty.first_region_rows(), Err(ApiError::ShapeMismatch(_))));

        let no_rows: TableResponse = serde_json::from_str(r#"{"data": {"regions": [{}]}}"#).unwrap();
        assert!(matches!(no_rows.first_region_rows(), Err(ApiError::ShapeMismatch(_))));

        let ok: TableResponse =
            serde_json::from_str(r#"{"data": {"regions": [{"rows": []}]}}"#).unwrap();
        assert_eq!(ok.first_region_rows().unwrap().len(), 0);
    }

    #[test]
    fn wrong_typed_structure_is_a_shape_mismatch() {
        for body in [
            r#"{"data": []}"#,
            r#"{"data": null}"#,
            r#"{"data": {"regions": null}}"#,
            r#"{"data": {"regions": "x"}}"#,
            r#"{"data": {"regions": [{"rows": {}}]}}"#,
            r#"{"data": {"regions": ["x"]}}"#,
        ] {
            let doc: TableResponse = serde_json::from_str(body).unwrap();
            assert!(
                matches!(doc.first_region_rows(), Err(ApiError::ShapeMismatch(_))),
                "{body}"
            );
        }

        let doc: TableResponse = serde_json::from_str(r#"{"data": {"context": 5}}"#).unwrap();
        assert!(matches!(doc.context(), Err(ApiError::ShapeMismatch(_))));
    }

    #[test]
    fn malformed_row_does_not_sink_its_neighbours() {
        let doc: TableResponse = serde_json::from_str(
            r#"{"data": {"regions": [{"rows": [
                {"cells": [{"text": ["1"]}, {"image": "https://logo.png"}], "data": "team"},
                {"cells": null, "link": {"type": "game", "ids": null}},
                "not a row",
                {"cells": [{"text": ["2"]}, {"image": {"url": "https://ok.png"}}],
                 "link": {"type": "game", "ids": [42]},
                 "data": {"team": {"id": 9}}}
            ]}]}}"#,
        )
        .unwrap();
        let rows = doc.first_region_rows().unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].cell(0).lines(), ["1"]);
        assert_eq!(rows[0].cell(1).image_url(), "");
        assert_eq!(rows[0].team_id(), None);

        assert!(rows[1].cells.is_empty());
        assert_eq!(rows[1].link.as_ref().and_then(Link::first_id), None);

        assert_eq!(rows[2].cell(1).image_url(), "https://ok.png");
        assert_eq!(rows[2].link.as_ref().and_then(Link::first_id).as_deref(), Some("42"));
        assert_eq!(rows[2].team_id(), Some(9));
    }

    #[test]
    fn bad_cells_keep_their_position() {
        let row: RawRow = serde_json::from_str(
            r#"{"cells": ["junk", {"text": ["Halle"], "link": "nowhere"}, {"text": ["Home"]}]}"#,
        )
        .unwrap();
        assert!(row.cell(0).lines().is_empty());
        assert_eq!(row.cell(1).line(0), Some("Halle"));
        assert_eq!(row.cell(1).link, None);
        assert_eq!(row.cell(2).line(0), Some("Home"));
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let row = RawRow::default();
        assert!(row.cell(7).lines().is_empty());
        assert_eq!(row.cell(7).image_url(), "");
        assert_eq!(row.team_id(), None);
    }

    #[test]
    fn header_label_prefers_long_form() {
        let header = ColumnHeader { text: Some("S".into()), long: Some("Siege".into()) };
        assert_eq!(header.label(), "Siege");
        let short_only = ColumnHeader { text: Some("TD".into()), long: None };
        assert_eq!(short_only.label(), "TD");
    }
}
