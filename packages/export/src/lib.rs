#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Serialization of export rows to the download formats.
//!
//! The engine shapes the rows; this crate turns them into file content.
//! CSV applies standard quoting, TSV is plain tab-joined text, JSON is a
//! pretty-printed array keyed by the display column names.

use chrono::NaiveDate;
use pfie_engine_models::{EXPORT_COLUMNS, ExportRow};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Supported download formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    /// Comma-separated values with standard quoting.
    Csv,
    /// Tab-separated values, unquoted.
    Tsv,
    /// Pretty-printed JSON array.
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    /// MIME type for the download response.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Tsv => "text/tab-separated-values",
            Self::Json => "application/json",
        }
    }
}

/// Errors that can occur while serializing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writing failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON writing failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes the rows to the requested format.
///
/// # Errors
///
/// Returns [`ExportError`] if the underlying serializer fails.
pub fn serialize(rows: &[ExportRow], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(rows),
        ExportFormat::Tsv => Ok(to_tsv(rows)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Download filename for an export generated on `date`, e.g.
/// `pfie-data-2020-12-31.csv`.
#[must_use]
pub fn download_filename(date: NaiveDate, format: ExportFormat) -> String {
    format!("pfie-data-{date}.{}", format.extension())
}

fn to_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(field_strings(row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn to_tsv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(EXPORT_COLUMNS.join("\t"));
    for row in rows {
        lines.push(field_strings(row).join("\t"));
    }
    lines.join("\n")
}

/// The row's field values as display strings, in [`EXPORT_COLUMNS`]
/// order; absent coordinates become empty fields.
fn field_strings(row: &ExportRow) -> [String; 8] {
    [
        row.incident_id.clone(),
        row.date.to_string(),
        row.status.to_string(),
        row.state.clone(),
        row.latitude.map_or_else(String::new, |v| v.to_string()),
        row.longitude.map_or_else(String::new, |v| v.to_string()),
        row.agency_type.to_string(),
        row.sources.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfie_incident_models::{AgencyType, InjuryStatus};

    fn row(incident_id: &str, sources: &str) -> ExportRow {
        ExportRow {
            incident_id: incident_id.to_string(),
            date: NaiveDate::from_ymd_opt(2015, 2, 3).unwrap(),
            status: InjuryStatus::Fatal,
            state: "Texas".to_string(),
            latitude: Some(31.5),
            longitude: Some(-99.25),
            agency_type: AgencyType::Local,
            sources: sources.to_string(),
        }
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn csv_header_and_row() {
        let out = serialize(&[row("I-1", "https://a.example")], ExportFormat::Csv).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Incident ID,Date,Injury Status,State,Latitude,Longitude,Agency Type,Sources"
        );
        assert_eq!(
            lines.next().unwrap(),
            "I-1,2015-02-03,Fatal,Texas,31.5,-99.25,Local,https://a.example"
        );
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let out = serialize(
            &[row("I-1", "https://a.example, https://b.example")],
            ExportFormat::Csv,
        )
        .unwrap();
        assert!(out.contains("\"https://a.example, https://b.example\""));
    }

    #[test]
    fn tsv_joins_without_quoting() {
        let out = serialize(
            &[row("I-1", "https://a.example, https://b.example")],
            ExportFormat::Tsv,
        )
        .unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Incident ID\tDate\tInjury Status\tState\tLatitude\tLongitude\tAgency Type\tSources"
        );
        let data = lines.next().unwrap();
        assert!(data.contains("\tTexas\t"));
        assert!(data.contains("https://a.example, https://b.example"));
        assert!(!data.contains('"'));
    }

    #[test]
    fn blank_coordinates_serialize_empty() {
        let mut no_coords = row("I-2", "");
        no_coords.latitude = None;
        no_coords.longitude = None;
        let out = serialize(&[no_coords], ExportFormat::Csv).unwrap();
        assert!(out.lines().nth(1).unwrap().contains("Texas,,,Local"));
    }

    #[test]
    fn json_uses_display_column_names() {
        let out = serialize(&[row("I-1", "")], ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let first = &parsed[0];
        assert_eq!(first["Incident ID"], "I-1");
        assert_eq!(first["Date"], "2015-02-03");
        assert_eq!(first["Injury Status"], "Fatal");
        assert_eq!(first["Agency Type"], "Local");
        assert_eq!(first["Latitude"], 31.5);
    }

    #[test]
    fn filename_includes_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        assert_eq!(
            download_filename(date, ExportFormat::Csv),
            "pfie-data-2020-12-31.csv"
        );
        assert_eq!(
            download_filename(date, ExportFormat::Json),
            "pfie-data-2020-12-31.json"
        );
    }
}
