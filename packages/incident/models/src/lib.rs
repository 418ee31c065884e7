#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident record types and the agency/injury-status taxonomies.
//!
//! This crate defines the canonical officer-incident record shape used
//! across the explorer. One incident (a single shooting event) may involve
//! multiple officers, each contributing one record row that shares the
//! incident's identifier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The type of law-enforcement agency involved in an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AgencyType {
    /// Municipal or county police departments
    Local,
    /// Sheriff's offices
    Sheriff,
    /// State police and highway patrol
    State,
    /// Special-jurisdiction agencies (transit, campus, park police)
    Special,
}

impl AgencyType {
    /// Returns all variants of this enum, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Local, Self::Sheriff, Self::State, Self::Special]
    }

    /// Human-readable description used in chart and table titles.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Local => "Local Police",
            Self::Sheriff => "Sheriff's Deputies",
            Self::State => "State Police",
            Self::Special => "Special Police",
        }
    }
}

/// Whether the officer's firearm injury was fatal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum InjuryStatus {
    /// The officer died of the injury.
    Fatal,
    /// The officer survived the injury.
    Nonfatal,
}

impl InjuryStatus {
    /// Returns all variants of this enum, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fatal, Self::Nonfatal]
    }
}

/// One officer-incident row from the source dataset.
///
/// `incident_id` is a grouping key, not unique per row — multiple officers
/// injured in the same event share it. Coordinates are optional; rows
/// whose source lacks them are backfilled from the state centroid at load
/// time, and stay `None` only when no centroid exists either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Identifier shared by all officer rows of one shooting event.
    pub incident_id: String,
    /// Calendar date of occurrence (no time component).
    pub date: NaiveDate,
    /// Jurisdiction (U.S. state or equivalent) name.
    pub state: String,
    /// Agency-type category.
    pub agency_type: AgencyType,
    /// Injury-status category.
    pub status: InjuryStatus,
    /// Latitude (WGS84), if known or backfilled.
    pub latitude: Option<f64>,
    /// Longitude (WGS84), if known or backfilled.
    pub longitude: Option<f64>,
    /// Comma-separated source-citation URLs.
    pub sources: String,
}

impl IncidentRecord {
    /// Returns `true` when the record carries usable map coordinates.
    #[must_use]
    pub const fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Splits the comma-separated `sources` field into trimmed, non-empty
    /// citation URLs.
    #[must_use]
    pub fn source_links(&self) -> Vec<&str> {
        self.sources
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// An [`IncidentRecord`] decorated with aggregate counts scoped to its
/// incident identifier, computed over the currently filtered subset (not
/// the full working set) — the aggregates narrow as filters narrow the
/// incident's visible rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredIncident {
    /// The underlying record.
    pub record: IncidentRecord,
    /// Total officer rows sharing this incident id in the filtered subset.
    pub officers_total: u32,
    /// Fatal rows sharing this incident id in the filtered subset.
    pub officers_fatal: u32,
    /// Nonfatal rows sharing this incident id in the filtered subset.
    pub officers_nonfatal: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sources: &str) -> IncidentRecord {
        IncidentRecord {
            incident_id: "I-1".to_string(),
            date: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            state: "Texas".to_string(),
            agency_type: AgencyType::Local,
            status: InjuryStatus::Fatal,
            latitude: Some(31.0),
            longitude: Some(-100.0),
            sources: sources.to_string(),
        }
    }

    #[test]
    fn agency_type_roundtrip() {
        for agency in AgencyType::all() {
            let parsed: AgencyType = agency.to_string().parse().unwrap();
            assert_eq!(parsed, *agency);
        }
        assert!("County".parse::<AgencyType>().is_err());
    }

    #[test]
    fn injury_status_roundtrip() {
        for status in InjuryStatus::all() {
            let parsed: InjuryStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, *status);
        }
        assert!("Wounded".parse::<InjuryStatus>().is_err());
    }

    #[test]
    fn source_links_split_and_trim() {
        let rec = record("https://a.example/x, https://b.example/y ,, ");
        assert_eq!(
            rec.source_links(),
            vec!["https://a.example/x", "https://b.example/y"]
        );
    }

    #[test]
    fn source_links_empty() {
        assert!(record("").source_links().is_empty());
    }

    #[test]
    fn has_coordinates_requires_both() {
        let mut rec = record("");
        assert!(rec.has_coordinates());
        rec.longitude = None;
        assert!(!rec.has_coordinates());
    }
}
