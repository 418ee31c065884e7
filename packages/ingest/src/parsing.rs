//! Field parsing helpers for the source tables.

use chrono::NaiveDate;

/// Parses an ISO-like calendar date string.
///
/// Accepts `YYYY-MM-DD` and `M/D/YYYY`, with or without surrounding
/// whitespace. Returns `None` for anything else — the caller drops such
/// rows from the working set.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}

/// Parses a coordinate field. Returns `None` if missing, blank,
/// unparseable, or non-finite.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
