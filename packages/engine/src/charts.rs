//! Derived-series builders for the bar and trend charts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use pfie_engine_models::{AgencyBreakdown, AgencyStatusCount, FilteredSet, MonthlyTrends, TrendPoint};
use pfie_incident_models::{AgencyType, InjuryStatus};
use pfie_stats::{DEFAULT_BANDWIDTH, loess};

/// Partitions the filtered subset into the fixed agency-type categories
/// and counts Fatal vs Nonfatal within each.
///
/// Every (agency type, status) cell appears in the output — combinations
/// with no matching rows carry count 0 rather than being omitted, so
/// chart consumers always see the same category axis.
#[must_use]
pub fn agency_breakdown(filtered: &FilteredSet) -> AgencyBreakdown {
    let mut counts: BTreeMap<(AgencyType, InjuryStatus), u64> = BTreeMap::new();
    for incident in &filtered.incidents {
        *counts
            .entry((incident.record.agency_type, incident.record.status))
            .or_insert(0) += 1;
    }

    let cells = AgencyType::all()
        .iter()
        .flat_map(|&agency_type| {
            InjuryStatus::all().iter().map(move |&status| (agency_type, status))
        })
        .map(|(agency_type, status)| AgencyStatusCount {
            agency_type,
            status,
            count: counts.get(&(agency_type, status)).copied().unwrap_or(0),
        })
        .collect();

    AgencyBreakdown { cells }
}

/// Buckets the filtered subset by (calendar month, status) and fits a
/// LOESS trend through each status's monthly counts.
#[must_use]
pub fn monthly_trends(filtered: &FilteredSet) -> MonthlyTrends {
    MonthlyTrends {
        fatal: status_trend(filtered, InjuryStatus::Fatal),
        nonfatal: status_trend(filtered, InjuryStatus::Nonfatal),
    }
}

fn status_trend(filtered: &FilteredSet, status: InjuryStatus) -> Vec<TrendPoint> {
    // BTreeMap keys iterate chronologically, which is the bucket order
    // LOESS must see.
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for incident in filtered
        .incidents
        .iter()
        .filter(|i| i.record.status == status)
    {
        *buckets.entry(month_floor(incident.record.date)).or_insert(0) += 1;
    }

    let months: Vec<(NaiveDate, u64)> = buckets.into_iter().collect();
    let xs: Vec<f64> = months.iter().map(|(month, _)| month_ordinal(*month)).collect();
    #[allow(clippy::cast_precision_loss)]
    let ys: Vec<f64> = months.iter().map(|(_, count)| *count as f64).collect();
    let smoothed = loess(&xs, &ys, DEFAULT_BANDWIDTH);

    months
        .into_iter()
        .zip(smoothed)
        .map(|((month, count), trend)| TrendPoint {
            month,
            count,
            trend,
        })
        .collect()
}

/// First day of the date's calendar month.
fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Months-since-year-zero ordinal, the trend chart's x coordinate.
fn month_ordinal(month: NaiveDate) -> f64 {
    f64::from(month.year()).mul_add(12.0, f64::from(month.month0()))
}
