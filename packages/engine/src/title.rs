//! Display-title builder for table captions and export headers.

use pfie_engine_models::FilterCriteria;
use pfie_incident_models::{AgencyType, InjuryStatus};

use crate::session::ExplorerSession;

/// Builds the human-readable heading describing the active filters,
/// e.g. `"Sheriff's Deputies Fatal Firearm Injuries — Texas —
/// 2015-01-01 to 2015-12-31"`.
#[must_use]
pub fn display_title(session: &ExplorerSession, criteria: &FilterCriteria) -> String {
    let agency = criteria.agency.map_or("Police", AgencyType::description);
    let injury = match criteria.status {
        None => "Fatal and Nonfatal Firearm Injuries",
        Some(InjuryStatus::Fatal) => "Fatal Firearm Injuries",
        Some(InjuryStatus::Nonfatal) => "Nonfatal Firearm Injuries",
    };
    let state = criteria.state.as_deref().unwrap_or("United States");

    let (start, end) = session.resolve_date_range(criteria);
    let start = start.map_or_else(String::new, |d| d.to_string());
    let end = end.map_or_else(String::new, |d| d.to_string());

    format!("{agency} {injury} — {state} — {start} to {end}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pfie_incident_models::IncidentRecord;

    fn session() -> ExplorerSession {
        ExplorerSession::new(
            vec![
                IncidentRecord {
                    incident_id: "A".to_string(),
                    date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
                    state: "Texas".to_string(),
                    agency_type: AgencyType::Local,
                    status: InjuryStatus::Fatal,
                    latitude: None,
                    longitude: None,
                    sources: String::new(),
                },
                IncidentRecord {
                    incident_id: "B".to_string(),
                    date: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
                    state: "Ohio".to_string(),
                    agency_type: AgencyType::Sheriff,
                    status: InjuryStatus::Nonfatal,
                    latitude: None,
                    longitude: None,
                    sources: String::new(),
                },
            ],
            vec![],
        )
    }

    #[test]
    fn default_criteria_title() {
        let title = display_title(&session(), &FilterCriteria::default());
        assert_eq!(
            title,
            "Police Fatal and Nonfatal Firearm Injuries — United States — 2014-01-01 to 2020-12-31"
        );
    }

    #[test]
    fn specific_criteria_title() {
        let criteria = FilterCriteria {
            start: NaiveDate::from_ymd_opt(2015, 1, 1),
            end: NaiveDate::from_ymd_opt(2015, 12, 31),
            state: Some("Texas".to_string()),
            agency: Some(AgencyType::Sheriff),
            status: Some(InjuryStatus::Fatal),
        };
        let title = display_title(&session(), &criteria);
        assert_eq!(
            title,
            "Sheriff's Deputies Fatal Firearm Injuries — Texas — 2015-01-01 to 2015-12-31"
        );
    }
}
