//! Map output builder: jittered markers and view framing.

use pfie_engine_models::{FilterCriteria, FilteredSet, MapPoint, MapView};
use pfie_geography_models::MapFrame;
use pfie_incident_models::InjuryStatus;
use pfie_stats::{apply_jitter, jitter_amount};

use crate::session::ExplorerSession;

/// Offset added to the rounded slider position to form the latitude
/// jitter seed; the longitude stream uses the next seed so the two axes
/// never share a sequence.
pub const JITTER_SEED_BASE: u32 = 1000;

/// Padding in degrees around the fitted point extent.
const FIT_PADDING: f64 = 0.05;

/// Zoom level used when exactly one point is visible.
const SINGLE_POINT_ZOOM: u8 = 8;

/// Builds the map output for the filtered subset.
///
/// Records that still lack coordinates after centroid backfill are
/// excluded here (and only here — they stay in counts, charts, and
/// exports). `jitter_steps` is the slider position in [0, 10]; the
/// perturbation is deterministic per position, so a re-render at a fixed
/// slider value never shuffles markers.
#[must_use]
pub fn map_view(
    session: &ExplorerSession,
    filtered: &FilteredSet,
    criteria: &FilterCriteria,
    jitter_steps: f64,
) -> MapView {
    let located: Vec<(&str, f64, f64, InjuryStatus)> = filtered
        .incidents
        .iter()
        .filter_map(|incident| {
            let record = &incident.record;
            match (record.latitude, record.longitude) {
                (Some(lat), Some(lon)) => {
                    Some((record.incident_id.as_str(), lat, lon, record.status))
                }
                _ => None,
            }
        })
        .collect();

    let raw_lats: Vec<f64> = located.iter().map(|(_, lat, _, _)| *lat).collect();
    let raw_lons: Vec<f64> = located.iter().map(|(_, _, lon, _)| *lon).collect();

    // Frame from the unjittered positions: the view must not drift with
    // the slider.
    let frame = map_frame(session, criteria, &raw_lats, &raw_lons);

    let amount = jitter_amount(&raw_lats, &raw_lons, jitter_steps);
    let (lats, lons) = if amount > 0.0 {
        let seed = jitter_seed(jitter_steps);
        (
            apply_jitter(&raw_lats, amount, seed),
            apply_jitter(&raw_lons, amount, seed.wrapping_add(1)),
        )
    } else {
        (raw_lats, raw_lons)
    };

    let points = located
        .iter()
        .zip(lats.iter().zip(&lons))
        .map(|(&(incident_id, _, _, status), (&latitude, &longitude))| MapPoint {
            incident_id: incident_id.to_string(),
            latitude,
            longitude,
            status,
        })
        .collect();

    MapView {
        points,
        frame,
        jitter_amount: amount,
    }
}

/// Derives the jitter seed from the slider position.
#[must_use]
pub fn jitter_seed(steps: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = steps.round() as u32;
    rounded.wrapping_add(JITTER_SEED_BASE)
}

/// Chooses how to frame the view: the selected state's bounding box when
/// one is known, else the padded extent of the visible points, a
/// centered view for a single point, or the continental default when
/// nothing is visible.
fn map_frame(
    session: &ExplorerSession,
    criteria: &FilterCriteria,
    lats: &[f64],
    lons: &[f64],
) -> MapFrame {
    if let Some(state) = criteria.state.as_deref()
        && let Some(bounds) = session.state_bounds(state)
    {
        return MapFrame::from_state_bounds(bounds);
    }

    match (lats, lons) {
        ([], _) => MapFrame::CONTINENTAL,
        ([lat], [lon]) => MapFrame::Center {
            latitude: *lat,
            longitude: *lon,
            zoom: SINGLE_POINT_ZOOM,
        },
        _ => {
            let south = lats.iter().copied().fold(f64::INFINITY, f64::min);
            let north = lats.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let west = lons.iter().copied().fold(f64::INFINITY, f64::min);
            let east = lons.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            MapFrame::Bounds {
                south: south - FIT_PADDING,
                west: west - FIT_PADDING,
                north: north + FIT_PADDING,
                east: east + FIT_PADDING,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_incidents;
    use chrono::NaiveDate;
    use pfie_geography_models::StateBounds;
    use pfie_incident_models::{AgencyType, IncidentRecord, InjuryStatus};

    fn record(incident_id: &str, state: &str, coords: Option<(f64, f64)>) -> IncidentRecord {
        IncidentRecord {
            incident_id: incident_id.to_string(),
            date: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            state: state.to_string(),
            agency_type: AgencyType::Local,
            status: InjuryStatus::Fatal,
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lon)| lon),
            sources: String::new(),
        }
    }

    fn texas_bounds() -> StateBounds {
        StateBounds {
            state: "Texas".to_string(),
            x1: -106.6,
            y1: 25.8,
            x2: -93.5,
            y2: 36.5,
        }
    }

    fn view(
        records: Vec<IncidentRecord>,
        bounds: Vec<StateBounds>,
        criteria: &FilterCriteria,
        steps: f64,
    ) -> MapView {
        let session = ExplorerSession::new(records, bounds);
        let filtered = filter_incidents(&session, criteria);
        map_view(&session, &filtered, criteria, steps)
    }

    #[test]
    fn records_without_coordinates_are_excluded_from_map_only() {
        let criteria = FilterCriteria::default();
        let session = ExplorerSession::new(
            vec![
                record("A", "Texas", Some((31.0, -100.0))),
                record("B", "Texas", None),
            ],
            vec![],
        );
        let filtered = filter_incidents(&session, &criteria);
        assert_eq!(filtered.incidents.len(), 2);

        let map = map_view(&session, &filtered, &criteria, 0.0);
        assert_eq!(map.points.len(), 1);
        assert_eq!(map.points[0].incident_id, "A");
    }

    #[test]
    fn zero_steps_leaves_coordinates_exact() {
        let criteria = FilterCriteria::default();
        let map = view(
            vec![
                record("A", "Texas", Some((31.0, -100.0))),
                record("B", "Texas", Some((32.0, -101.0))),
            ],
            vec![],
            &criteria,
            0.0,
        );
        assert_eq!(map.jitter_amount, 0.0);
        assert!((map.points[0].latitude - 31.0).abs() < f64::EPSILON);
        assert!((map.points[0].longitude - -100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jitter_is_reproducible_per_slider_position() {
        let criteria = FilterCriteria::default();
        let records = vec![
            record("A", "Texas", Some((31.0, -100.0))),
            record("B", "Texas", Some((32.0, -101.0))),
            record("C", "Texas", Some((33.0, -102.0))),
        ];
        let first = view(records.clone(), vec![], &criteria, 5.0);
        let second = view(records, vec![], &criteria, 5.0);
        assert_eq!(first.points, second.points);
        assert!(first.jitter_amount > 0.0);
    }

    #[test]
    fn jittered_points_stay_within_amount() {
        let criteria = FilterCriteria::default();
        let records = vec![
            record("A", "Texas", Some((31.0, -100.0))),
            record("B", "Texas", Some((32.0, -101.0))),
            record("C", "Texas", Some((33.0, -102.0))),
        ];
        let map = view(records, vec![], &criteria, 10.0);
        let expected = [(31.0, -100.0), (32.0, -101.0), (33.0, -102.0)];
        for (point, (lat, lon)) in map.points.iter().zip(expected) {
            assert!((point.latitude - lat).abs() <= map.jitter_amount);
            assert!((point.longitude - lon).abs() <= map.jitter_amount);
        }
    }

    #[test]
    fn axis_seeds_differ() {
        assert_eq!(jitter_seed(5.0), 1005);
        assert_eq!(jitter_seed(5.4), 1005);
        assert_eq!(jitter_seed(0.0), JITTER_SEED_BASE);
    }

    #[test]
    fn selected_state_frames_to_its_bounds() {
        let criteria = FilterCriteria {
            state: Some("Texas".to_string()),
            ..FilterCriteria::default()
        };
        let map = view(
            vec![record("A", "Texas", Some((31.0, -100.0)))],
            vec![texas_bounds()],
            &criteria,
            0.0,
        );
        assert_eq!(map.frame, MapFrame::from_state_bounds(&texas_bounds()));
    }

    #[test]
    fn unknown_state_bounds_fall_back_to_point_fit() {
        let criteria = FilterCriteria {
            state: Some("Texas".to_string()),
            ..FilterCriteria::default()
        };
        let map = view(
            vec![record("A", "Texas", Some((31.0, -100.0)))],
            vec![],
            &criteria,
            0.0,
        );
        assert_eq!(
            map.frame,
            MapFrame::Center {
                latitude: 31.0,
                longitude: -100.0,
                zoom: 8,
            }
        );
    }

    #[test]
    fn multiple_points_frame_with_padding() {
        let criteria = FilterCriteria::default();
        let map = view(
            vec![
                record("A", "Texas", Some((31.0, -100.0))),
                record("B", "Ohio", Some((40.0, -83.0))),
            ],
            vec![],
            &criteria,
            0.0,
        );
        assert_eq!(
            map.frame,
            MapFrame::Bounds {
                south: 31.0 - 0.05,
                west: -100.0 - 0.05,
                north: 40.0 + 0.05,
                east: -83.0 + 0.05,
            }
        );
    }

    #[test]
    fn empty_subset_frames_continental() {
        let criteria = FilterCriteria::default();
        let map = view(vec![record("A", "Texas", None)], vec![], &criteria, 0.0);
        assert!(map.points.is_empty());
        assert_eq!(map.frame, MapFrame::CONTINENTAL);
    }
}
