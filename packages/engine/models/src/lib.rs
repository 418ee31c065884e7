#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter criteria, derived-series, and export projection types.
//!
//! These are the value objects exchanged between the filter engine, the
//! derived-series builders, and rendering/export collaborators. None of
//! them hold references into the working set — every derived collection
//! is rebuilt from scratch on a filter change and discarded on the next.

use chrono::NaiveDate;
use pfie_geography_models::MapFrame;
use pfie_incident_models::{AgencyType, FilteredIncident, InjuryStatus};
use serde::{Deserialize, Serialize};

/// The active filter selections.
///
/// `None` in any field means "no restriction": the full dataset span for
/// the dates, all jurisdictions, all agency types, or both injury
/// statuses. Criteria are not validated — an end date before the start
/// date simply produces an empty subset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Inclusive start date; `None` resolves to the dataset's first date.
    pub start: Option<NaiveDate>,
    /// Inclusive end date; `None` resolves to the dataset's last date.
    pub end: Option<NaiveDate>,
    /// Exact jurisdiction match; `None` means national.
    pub state: Option<String>,
    /// Exact agency-type match; `None` means all agency types.
    pub agency: Option<AgencyType>,
    /// Exact injury-status match; `None` means both statuses.
    pub status: Option<InjuryStatus>,
}

/// The filtered subset plus its human-readable count summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredSet {
    /// Records satisfying every active criterion, each decorated with
    /// per-incident aggregates scoped to this subset.
    pub incidents: Vec<FilteredIncident>,
    /// Count-and-pluralization summary, e.g. `"1,234 cases shown"`.
    pub summary: String,
}

/// One cell of the bar-chart aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyStatusCount {
    /// Agency-type category.
    pub agency_type: AgencyType,
    /// Injury-status category.
    pub status: InjuryStatus,
    /// Officer rows in the filtered subset matching both.
    pub count: u64,
}

/// The bar-chart aggregate table: every (agency type, status) cell,
/// zero-filled — empty combinations appear with count 0 rather than being
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyBreakdown {
    /// All 8 cells in agency-major, status-minor order.
    pub cells: Vec<AgencyStatusCount>,
}

impl AgencyBreakdown {
    /// Looks up one cell's count.
    #[must_use]
    pub fn count(&self, agency_type: AgencyType, status: InjuryStatus) -> u64 {
        self.cells
            .iter()
            .find(|cell| cell.agency_type == agency_type && cell.status == status)
            .map_or(0, |cell| cell.count)
    }
}

/// One month of a trend series: the raw bucket count and the LOESS-fitted
/// trend value, exposed in parallel so a consumer can render both a
/// scatter and a trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// First day of the bucket's calendar month.
    pub month: NaiveDate,
    /// Officer rows of this status in this month.
    pub count: u64,
    /// Smoothed value fitted through the monthly counts.
    pub trend: f64,
}

/// Monthly trend series per injury status, chronologically ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrends {
    /// Months containing at least one Fatal row.
    pub fatal: Vec<TrendPoint>,
    /// Months containing at least one Nonfatal row.
    pub nonfatal: Vec<TrendPoint>,
}

/// A geo-located, possibly jittered marker for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Incident identifier for the marker popup.
    pub incident_id: String,
    /// Marker latitude (jittered when jitter is active).
    pub latitude: f64,
    /// Marker longitude (jittered when jitter is active).
    pub longitude: f64,
    /// Injury status, for marker coloring.
    pub status: InjuryStatus,
}

/// Map-ready output for the current filtered subset: jittered markers and
/// the rectangle or center point to frame the view on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// One marker per geo-located filtered record.
    pub points: Vec<MapPoint>,
    /// Framing for the view.
    pub frame: MapFrame,
    /// The jitter half-width that was applied (0 when jitter is off).
    pub jitter_amount: f64,
}

/// Flat export projection of one filtered record, fields in display
/// order. Serialization (CSV quoting, JSON layout) is the exporter's
/// concern — this type only shapes the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Incident identifier.
    #[serde(rename = "Incident ID")]
    pub incident_id: String,
    /// Occurrence date, `YYYY-MM-DD`.
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Injury status label.
    #[serde(rename = "Injury Status")]
    pub status: InjuryStatus,
    /// Jurisdiction name.
    #[serde(rename = "State")]
    pub state: String,
    /// Latitude, blank when unknown.
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    /// Longitude, blank when unknown.
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    /// Agency-type label.
    #[serde(rename = "Agency Type")]
    pub agency_type: AgencyType,
    /// Comma-separated source-citation URLs.
    #[serde(rename = "Sources")]
    pub sources: String,
}

/// Export column headers, in display order.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "Incident ID",
    "Date",
    "Injury Status",
    "State",
    "Latitude",
    "Longitude",
    "Agency Type",
    "Sources",
];

/// A display-table projection of one filtered record: formatted date,
/// coordinates rounded to 4 decimal places (blank when unknown), and the
/// source citations split into individual links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Incident identifier.
    pub incident_id: String,
    /// Occurrence date, `YYYY-MM-DD`.
    pub date: String,
    /// Injury status label.
    pub status: InjuryStatus,
    /// Jurisdiction name.
    pub state: String,
    /// Latitude to 4 decimal places, or empty.
    pub latitude: String,
    /// Longitude to 4 decimal places, or empty.
    pub longitude: String,
    /// Agency-type label.
    pub agency_type: AgencyType,
    /// Individual source-citation URLs.
    pub source_links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_are_unrestricted() {
        let criteria = FilterCriteria::default();
        assert!(criteria.start.is_none());
        assert!(criteria.end.is_none());
        assert!(criteria.state.is_none());
        assert!(criteria.agency.is_none());
        assert!(criteria.status.is_none());
    }

    #[test]
    fn breakdown_lookup_defaults_to_zero() {
        let breakdown = AgencyBreakdown {
            cells: vec![AgencyStatusCount {
                agency_type: AgencyType::Local,
                status: InjuryStatus::Fatal,
                count: 3,
            }],
        };
        assert_eq!(breakdown.count(AgencyType::Local, InjuryStatus::Fatal), 3);
        assert_eq!(breakdown.count(AgencyType::Sheriff, InjuryStatus::Fatal), 0);
    }
}
