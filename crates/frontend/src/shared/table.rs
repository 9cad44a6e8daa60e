//! Row projection for the entity tables.

use super::form::EntityForm;
use super::list_utils::Searchable;

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Emphasised primary column
    Strong(String),
    /// Pill with a CSS modifier, e.g. `badge--success`
    Badge { text: String, class: &'static str },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn badge(text: impl Into<String>, class: &'static str) -> Self {
        Cell::Badge {
            text: text.into(),
            class,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text(t) | Cell::Strong(t) => t,
            Cell::Badge { text, .. } => text,
        }
    }
}

/// How an entity shows up as a table row.
pub trait TableProjection: EntityForm {
    fn headers() -> Vec<&'static str>;

    /// One cell per header. Missing values use display fallbacks.
    fn cells(&self, ctx: &Self::Context) -> Vec<Cell>;

    /// Free-text match; entities whose searchable text depends on lookup
    /// data override this.
    fn matches_in(&self, query: &str, _ctx: &Self::Context) -> bool {
        self.matches_filter(query)
    }

    /// `Some` for entities with an activate/deactivate action.
    fn active_flag(&self) -> Option<bool> {
        None
    }
}

/// Value or `N/A`
pub fn or_na(value: Option<&str>) -> String {
    or_default(value, "N/A")
}

pub fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// `GHc 12.50`
pub fn money(value: Option<f64>) -> String {
    format!("GHc {:.2}", value.unwrap_or(0.0))
}

/// Date column; `fallback` when the value is missing.
pub fn date_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => super::date_utils::format_date(v),
        None => fallback.to_string(),
    }
}
