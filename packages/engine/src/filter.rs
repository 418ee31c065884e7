//! The filter & aggregation engine.
//!
//! Every filter change re-runs this over the full working set — there is
//! no incremental filtering, so the latest criteria always fully
//! determine the output.

use std::collections::BTreeMap;

use pfie_engine_models::{FilterCriteria, FilteredSet};
use pfie_incident_models::{FilteredIncident, InjuryStatus};

use crate::session::ExplorerSession;

/// Per-incident aggregate accumulator for the grouping pass.
#[derive(Default)]
struct IncidentCounts {
    total: u32,
    fatal: u32,
    nonfatal: u32,
}

/// Applies the criteria to the working set and decorates each surviving
/// record with aggregate counts scoped to its incident identifier.
///
/// The predicates are independent and conjunctive, so their order never
/// affects the result. Aggregates are computed in a single grouping pass
/// over the filtered rows only — an incident's counts narrow as filters
/// narrow its visible rows.
#[must_use]
pub fn filter_incidents(session: &ExplorerSession, criteria: &FilterCriteria) -> FilteredSet {
    let (start, end) = session.resolve_date_range(criteria);

    let rows: Vec<_> = session
        .records()
        .iter()
        .filter(|r| {
            start.is_none_or(|s| r.date >= s)
                && end.is_none_or(|e| r.date <= e)
                && criteria.state.as_deref().is_none_or(|s| r.state == s)
                && criteria.agency.is_none_or(|a| r.agency_type == a)
                && criteria.status.is_none_or(|s| r.status == s)
        })
        .collect();

    let mut aggregates: BTreeMap<&str, IncidentCounts> = BTreeMap::new();
    for row in &rows {
        let counts = aggregates.entry(row.incident_id.as_str()).or_default();
        counts.total += 1;
        match row.status {
            InjuryStatus::Fatal => counts.fatal += 1,
            InjuryStatus::Nonfatal => counts.nonfatal += 1,
        }
    }

    let incidents: Vec<FilteredIncident> = rows
        .iter()
        .map(|row| {
            let counts = &aggregates[row.incident_id.as_str()];
            FilteredIncident {
                record: (*row).clone(),
                officers_total: counts.total,
                officers_fatal: counts.fatal,
                officers_nonfatal: counts.nonfatal,
            }
        })
        .collect();

    log::debug!(
        "filtered {} of {} records",
        incidents.len(),
        session.records().len()
    );

    let summary = case_summary(incidents.len());
    FilteredSet { incidents, summary }
}

/// Human-readable count summary, e.g. `"1,234 cases shown"` or
/// `"1 case shown"`.
#[must_use]
pub fn case_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} case{plural} shown", thousands(count))
}

/// Formats a count with comma thousands separators.
fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
