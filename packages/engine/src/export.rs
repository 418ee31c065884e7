//! Row projections for the data table and the file exporters.
//!
//! Shapes only — escaping and serialization live with the exporter.

use pfie_engine_models::{ExportRow, FilteredSet, TableRow};

/// Projects the filtered subset into flat export rows, fields in display
/// order.
#[must_use]
pub fn export_rows(filtered: &FilteredSet) -> Vec<ExportRow> {
    filtered
        .incidents
        .iter()
        .map(|incident| {
            let record = &incident.record;
            ExportRow {
                incident_id: record.incident_id.clone(),
                date: record.date,
                status: record.status,
                state: record.state.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                agency_type: record.agency_type,
                sources: record.sources.clone(),
            }
        })
        .collect()
}

/// Projects the filtered subset into display-table rows: dates formatted,
/// coordinates rounded to 4 decimal places (blank when unknown), source
/// citations split into individual links.
#[must_use]
pub fn table_rows(filtered: &FilteredSet) -> Vec<TableRow> {
    filtered
        .incidents
        .iter()
        .map(|incident| {
            let record = &incident.record;
            TableRow {
                incident_id: record.incident_id.clone(),
                date: record.date.to_string(),
                status: record.status,
                state: record.state.clone(),
                latitude: format_coordinate(record.latitude),
                longitude: format_coordinate(record.longitude),
                agency_type: record.agency_type,
                source_links: record
                    .source_links()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }
        })
        .collect()
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.4}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_incidents;
    use crate::session::ExplorerSession;
    use chrono::NaiveDate;
    use pfie_engine_models::FilterCriteria;
    use pfie_incident_models::{AgencyType, IncidentRecord, InjuryStatus};

    fn filtered() -> FilteredSet {
        let session = ExplorerSession::new(
            vec![
                IncidentRecord {
                    incident_id: "I-9".to_string(),
                    date: NaiveDate::from_ymd_opt(2015, 2, 3).unwrap(),
                    state: "Texas".to_string(),
                    agency_type: AgencyType::Sheriff,
                    status: InjuryStatus::Nonfatal,
                    latitude: Some(31.123_456),
                    longitude: Some(-100.987_654),
                    sources: "https://a.example/x, https://b.example/y".to_string(),
                },
                IncidentRecord {
                    incident_id: "I-10".to_string(),
                    date: NaiveDate::from_ymd_opt(2015, 3, 4).unwrap(),
                    state: "Ohio".to_string(),
                    agency_type: AgencyType::Local,
                    status: InjuryStatus::Fatal,
                    latitude: None,
                    longitude: None,
                    sources: String::new(),
                },
            ],
            vec![],
        );
        filter_incidents(&session, &FilterCriteria::default())
    }

    #[test]
    fn export_rows_preserve_raw_values() {
        let rows = export_rows(&filtered());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].incident_id, "I-9");
        assert_eq!(rows[0].latitude, Some(31.123_456));
        assert_eq!(rows[1].latitude, None);
        assert_eq!(rows[0].sources, "https://a.example/x, https://b.example/y");
    }

    #[test]
    fn table_rows_format_coordinates() {
        let rows = table_rows(&filtered());
        assert_eq!(rows[0].latitude, "31.1235");
        assert_eq!(rows[0].longitude, "-100.9877");
        assert_eq!(rows[1].latitude, "");
        assert_eq!(rows[1].longitude, "");
    }

    #[test]
    fn table_rows_split_source_links() {
        let rows = table_rows(&filtered());
        assert_eq!(
            rows[0].source_links,
            vec!["https://a.example/x", "https://b.example/y"]
        );
        assert!(rows[1].source_links.is_empty());
    }

    #[test]
    fn table_rows_format_dates() {
        let rows = table_rows(&filtered());
        assert_eq!(rows[0].date, "2015-02-03");
    }
}
