#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the explorer server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the engine's value objects to allow independent
//! evolution of the API contract.

use chrono::NaiveDate;
use pfie_engine_models::FilteredSet;
use pfie_incident_models::{AgencyType, FilteredIncident, InjuryStatus};
use serde::{Deserialize, Serialize};

/// Shared filter query parameters.
///
/// Date strings that fail to parse are treated as absent (the dataset
/// span applies). `state`, `agency`, and `status` accept the literal
/// sentinels `"National"` / `"All"` for no restriction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQueryParams {
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end: Option<String>,
    /// State name, or `"National"`.
    pub state: Option<String>,
    /// Agency type label, or `"All"`.
    pub agency: Option<String>,
    /// Injury status label, or `"All"`.
    pub status: Option<String>,
}

/// Query parameters for the map endpoint: the shared filters plus the
/// jitter slider position.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end: Option<String>,
    /// State name, or `"National"`.
    pub state: Option<String>,
    /// Agency type label, or `"All"`.
    pub agency: Option<String>,
    /// Injury status label, or `"All"`.
    pub status: Option<String>,
    /// Jitter slider position in [0, 10]. Defaults to 0 (no jitter).
    pub jitter_steps: Option<f64>,
}

impl From<&MapQueryParams> for FilterQueryParams {
    fn from(p: &MapQueryParams) -> Self {
        Self {
            start: p.start.clone(),
            end: p.end.clone(),
            state: p.state.clone(),
            agency: p.agency.clone(),
            status: p.status.clone(),
        }
    }
}

/// Query parameters for the export endpoint: the shared filters plus the
/// download format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQueryParams {
    /// Inclusive start date (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub end: Option<String>,
    /// State name, or `"National"`.
    pub state: Option<String>,
    /// Agency type label, or `"All"`.
    pub agency: Option<String>,
    /// Injury status label, or `"All"`.
    pub status: Option<String>,
    /// Download format: `csv`, `tsv`, or `json`. Defaults to `csv`.
    pub format: Option<String>,
}

impl From<&ExportQueryParams> for FilterQueryParams {
    fn from(p: &ExportQueryParams) -> Self {
        Self {
            start: p.start.clone(),
            end: p.end.clone(),
            state: p.state.clone(),
            agency: p.agency.clone(),
            status: p.status.clone(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Dataset metadata for populating filter controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Sorted unique state names present in the working set.
    pub states: Vec<String>,
    /// First occurrence date in the working set.
    pub first_date: Option<NaiveDate>,
    /// Last occurrence date in the working set.
    pub last_date: Option<NaiveDate>,
    /// Total records in the working set.
    pub record_count: usize,
}

/// A filtered officer-incident record as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Incident identifier (shared across officer rows of one event).
    pub incident_id: String,
    /// Occurrence date.
    pub date: NaiveDate,
    /// Jurisdiction name.
    pub state: String,
    /// Agency-type category.
    pub agency_type: AgencyType,
    /// Injury-status category.
    pub status: InjuryStatus,
    /// Latitude, if known.
    pub latitude: Option<f64>,
    /// Longitude, if known.
    pub longitude: Option<f64>,
    /// Comma-separated source-citation URLs.
    pub sources: String,
    /// Officer rows sharing this incident id in the filtered subset.
    pub officers_total: u32,
    /// Fatal rows sharing this incident id in the filtered subset.
    pub officers_fatal: u32,
    /// Nonfatal rows sharing this incident id in the filtered subset.
    pub officers_nonfatal: u32,
}

impl From<&FilteredIncident> for ApiIncident {
    fn from(incident: &FilteredIncident) -> Self {
        let record = &incident.record;
        Self {
            incident_id: record.incident_id.clone(),
            date: record.date,
            state: record.state.clone(),
            agency_type: record.agency_type,
            status: record.status,
            latitude: record.latitude,
            longitude: record.longitude,
            sources: record.sources.clone(),
            officers_total: incident.officers_total,
            officers_fatal: incident.officers_fatal,
            officers_nonfatal: incident.officers_nonfatal,
        }
    }
}

/// Response from the incidents endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncidents {
    /// The filtered, decorated records.
    pub incidents: Vec<ApiIncident>,
    /// Count-and-pluralization summary, e.g. `"1,234 cases shown"`.
    pub summary: String,
    /// Display title describing the active filters.
    pub title: String,
}

impl ApiIncidents {
    /// Builds the response from the engine's filtered set.
    #[must_use]
    pub fn from_filtered(filtered: &FilteredSet, title: String) -> Self {
        Self {
            incidents: filtered.incidents.iter().map(ApiIncident::from).collect(),
            summary: filtered.summary.clone(),
            title,
        }
    }
}
