#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loading of the incident table and lookup tables into an explorer
//! session.
//!
//! Loading happens once per process. A missing or unreadable file is
//! fatal — the engine never runs over partial source data. Individual
//! rows with an unparseable date or an unknown taxonomy label are
//! dropped and counted as data-quality loss; records without
//! coordinates are backfilled from the state centroid table.

pub mod parsing;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use pfie_engine::ExplorerSession;
use pfie_geography_models::{StateBounds, StateCentroid};
use pfie_incident_models::IncidentRecord;
use serde::Deserialize;
use thiserror::Error;

/// File name of the primary officer-incident table.
pub const INCIDENTS_FILE: &str = "pfie20142020.csv";

/// File name of the state centroid lookup table.
pub const CENTROIDS_FILE: &str = "statecentroids.csv";

/// File name of the state bounding-box lookup table.
pub const BOUNDS_FILE: &str = "statebounds.csv";

/// Errors that can occur while loading the session's source data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A required input file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required input file could not be parsed as CSV.
    #[error("Failed to parse {}: {source}", path.display())]
    Csv {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// One raw row of the primary table, before validation.
#[derive(Debug, Deserialize)]
struct RawIncidentRow {
    incidentid: String,
    date: String,
    state: String,
    agencytypelabel: String,
    statuslabel: String,
    latitude: Option<String>,
    longitude: Option<String>,
    sources: Option<String>,
}

/// One raw row of the centroid table.
#[derive(Debug, Deserialize)]
struct RawCentroidRow {
    state: String,
    lat: f64,
    long: f64,
}

/// One raw row of the bounding-box table.
#[derive(Debug, Deserialize)]
struct RawBoundsRow {
    state: String,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Loads the three source tables from `data_dir` and builds the
/// immutable session.
///
/// # Errors
///
/// Returns [`IngestError`] if any file is missing, unreadable, or not
/// valid CSV. All three tables are required; no session is constructed
/// from partial data.
pub fn load_session(data_dir: &Path) -> Result<ExplorerSession, IngestError> {
    let centroids = load_centroids(&data_dir.join(CENTROIDS_FILE))?;
    let bounds = load_bounds(&data_dir.join(BOUNDS_FILE))?;
    let records = load_incidents(&data_dir.join(INCIDENTS_FILE), &centroids)?;

    log::info!(
        "Loaded {} records, {} centroids, {} bounding boxes",
        records.len(),
        centroids.len(),
        bounds.len()
    );

    Ok(ExplorerSession::new(records, bounds))
}

/// Loads and validates the primary incident table, backfilling missing
/// coordinates from the centroid lookup.
///
/// # Errors
///
/// Returns [`IngestError`] if the file is missing or not valid CSV.
pub fn load_incidents(
    path: &Path,
    centroids: &BTreeMap<String, StateCentroid>,
) -> Result<Vec<IncidentRecord>, IngestError> {
    let file = open(path)?;
    read_incidents(file, centroids).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the state centroid lookup table.
///
/// # Errors
///
/// Returns [`IngestError`] if the file is missing or not valid CSV.
pub fn load_centroids(path: &Path) -> Result<BTreeMap<String, StateCentroid>, IngestError> {
    let file = open(path)?;
    read_centroids(file).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the state bounding-box lookup table.
///
/// # Errors
///
/// Returns [`IngestError`] if the file is missing or not valid CSV.
pub fn load_bounds(path: &Path) -> Result<Vec<StateBounds>, IngestError> {
    let file = open(path)?;
    read_bounds(file).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_incidents<R: Read>(
    reader: R,
    centroids: &BTreeMap<String, StateCentroid>,
) -> Result<Vec<IncidentRecord>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut dropped_dates: u64 = 0;
    let mut dropped_labels: u64 = 0;

    for row in csv_reader.deserialize() {
        let raw: RawIncidentRow = row?;

        let Some(date) = parsing::parse_date(&raw.date) else {
            dropped_dates += 1;
            continue;
        };

        let (Ok(agency_type), Ok(status)) =
            (raw.agencytypelabel.parse(), raw.statuslabel.parse())
        else {
            dropped_labels += 1;
            continue;
        };

        // Backfill each missing axis from the state centroid. Without a
        // centroid the record stays, but only in the non-map outputs.
        let centroid = centroids.get(&raw.state);
        let latitude = raw
            .latitude
            .as_deref()
            .and_then(parsing::parse_coordinate)
            .or_else(|| centroid.map(|c| c.latitude));
        let longitude = raw
            .longitude
            .as_deref()
            .and_then(parsing::parse_coordinate)
            .or_else(|| centroid.map(|c| c.longitude));

        records.push(IncidentRecord {
            incident_id: raw.incidentid,
            date,
            state: raw.state,
            agency_type,
            status,
            latitude,
            longitude,
            sources: raw.sources.unwrap_or_default(),
        });
    }

    if dropped_dates > 0 {
        log::warn!("Dropped {dropped_dates} rows with unparseable dates");
    }
    if dropped_labels > 0 {
        log::warn!("Dropped {dropped_labels} rows with unknown agency or status labels");
    }

    Ok(records)
}

fn read_centroids<R: Read>(reader: R) -> Result<BTreeMap<String, StateCentroid>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut centroids = BTreeMap::new();
    for row in csv_reader.deserialize() {
        let raw: RawCentroidRow = row?;
        centroids.insert(
            raw.state.clone(),
            StateCentroid {
                state: raw.state,
                latitude: raw.lat,
                longitude: raw.long,
            },
        );
    }
    Ok(centroids)
}

fn read_bounds<R: Read>(reader: R) -> Result<Vec<StateBounds>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bounds = Vec::new();
    for row in csv_reader.deserialize() {
        let raw: RawBoundsRow = row?;
        bounds.push(StateBounds {
            state: raw.state,
            x1: raw.x1,
            y1: raw.y1,
            x2: raw.x2,
            y2: raw.y2,
        });
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pfie_incident_models::{AgencyType, InjuryStatus};

    const INCIDENTS_CSV: &str = "\
incidentid,date,state,agencytypelabel,statuslabel,latitude,longitude,sources
I-1,2015-01-10,Texas,Local,Fatal,31.5,-99.5,https://a.example
I-2,2015-02-20,Texas,Sheriff,Nonfatal,,,https://b.example
I-3,not-a-date,Texas,Local,Fatal,31.0,-99.0,
I-4,2015-03-05,Atlantis,State,Fatal,,,
I-5,2015-04-01,Ohio,Trolley,Fatal,40.0,-83.0,
";

    const CENTROIDS_CSV: &str = "\
state,lat,long
Texas,31.2,-99.3
Ohio,40.3,-82.8
";

    const BOUNDS_CSV: &str = "\
state,x1,y1,x2,y2
Texas,-106.6,25.8,-93.5,36.5
";

    fn centroids() -> BTreeMap<String, StateCentroid> {
        read_centroids(CENTROIDS_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn valid_rows_are_loaded() {
        let records = read_incidents(INCIDENTS_CSV.as_bytes(), &centroids()).unwrap();
        assert_eq!(records[0].incident_id, "I-1");
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2015, 1, 10).unwrap());
        assert_eq!(records[0].agency_type, AgencyType::Local);
        assert_eq!(records[0].status, InjuryStatus::Fatal);
        assert_eq!(records[0].latitude, Some(31.5));
    }

    #[test]
    fn unparseable_date_rows_are_dropped() {
        let records = read_incidents(INCIDENTS_CSV.as_bytes(), &centroids()).unwrap();
        assert!(records.iter().all(|r| r.incident_id != "I-3"));
    }

    #[test]
    fn unknown_label_rows_are_dropped() {
        let records = read_incidents(INCIDENTS_CSV.as_bytes(), &centroids()).unwrap();
        assert!(records.iter().all(|r| r.incident_id != "I-5"));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn missing_coordinates_backfill_from_centroid() {
        let records = read_incidents(INCIDENTS_CSV.as_bytes(), &centroids()).unwrap();
        let backfilled = records.iter().find(|r| r.incident_id == "I-2").unwrap();
        assert_eq!(backfilled.latitude, Some(31.2));
        assert_eq!(backfilled.longitude, Some(-99.3));
    }

    #[test]
    fn missing_centroid_leaves_coordinates_absent() {
        let records = read_incidents(INCIDENTS_CSV.as_bytes(), &centroids()).unwrap();
        let unlocated = records.iter().find(|r| r.incident_id == "I-4").unwrap();
        assert_eq!(unlocated.latitude, None);
        assert_eq!(unlocated.longitude, None);
    }

    #[test]
    fn bounds_rows_are_loaded() {
        let bounds = read_bounds(BOUNDS_CSV.as_bytes()).unwrap();
        assert_eq!(bounds.len(), 1);
        assert_eq!(bounds[0].state, "Texas");
        assert!((bounds[0].x1 - -106.6).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_session(Path::new("/nonexistent/pfie-data")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
