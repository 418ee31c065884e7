//! The explorer session: the immutable working set plus its lookup
//! tables, constructed once at load time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pfie_engine_models::FilterCriteria;
use pfie_geography_models::StateBounds;
use pfie_incident_models::IncidentRecord;

/// The complete collection of valid records and the state bounding-box
/// lookup, held for the process lifetime after load.
///
/// Read-only once constructed: any number of concurrent recomputations
/// may read it, since no writer exists after load.
#[derive(Debug)]
pub struct ExplorerSession {
    working_set: Vec<IncidentRecord>,
    bounds: BTreeMap<String, StateBounds>,
    states: Vec<String>,
    date_span: Option<(NaiveDate, NaiveDate)>,
}

impl ExplorerSession {
    /// Builds a session from loaded records and the bounding-box table.
    ///
    /// The sorted unique state list and the dataset's date span are
    /// derived here once; both feed the filter controls.
    #[must_use]
    pub fn new(working_set: Vec<IncidentRecord>, bounds: Vec<StateBounds>) -> Self {
        let mut states: Vec<String> = working_set.iter().map(|r| r.state.clone()).collect();
        states.sort();
        states.dedup();

        let date_span = working_set.iter().map(|r| r.date).fold(None, |span, date| {
            Some(span.map_or((date, date), |(lo, hi): (NaiveDate, NaiveDate)| {
                (lo.min(date), hi.max(date))
            }))
        });

        let bounds = bounds
            .into_iter()
            .map(|b| (b.state.clone(), b))
            .collect();

        Self {
            working_set,
            bounds,
            states,
            date_span,
        }
    }

    /// The full, unfiltered working set.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.working_set
    }

    /// Sorted unique state names present in the working set.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// First and last occurrence dates in the working set, or `None`
    /// when the working set is empty.
    #[must_use]
    pub const fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_span
    }

    /// Bounding box for a state, if the lookup table has one.
    #[must_use]
    pub fn state_bounds(&self, state: &str) -> Option<&StateBounds> {
        self.bounds.get(state)
    }

    /// Resolves the criteria's date range against the dataset span:
    /// absent bounds default to the span's edges.
    #[must_use]
    pub fn resolve_date_range(
        &self,
        criteria: &FilterCriteria,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let (first, last) = self
            .date_span
            .map_or((None, None), |(lo, hi)| (Some(lo), Some(hi)));
        (criteria.start.or(first), criteria.end.or(last))
    }
}
