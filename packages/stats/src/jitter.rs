//! Deterministic coordinate jitter.
//!
//! Perturbs a sequence of coordinates by bounded uniform noise so that
//! overlapping map markers separate visually. The same `(values, amount,
//! seed)` triple always yields the same output — a re-render at a fixed
//! slider position must not shuffle markers.

use crate::rng::Mulberry32;

/// Base unit used when a coordinate set has too few distinct values to
/// measure its native spatial resolution.
pub const DEFAULT_BASE_GAP: f64 = 1e-5;

/// Replaces each finite value `v` with `v + u * amount`, `u` drawn
/// uniformly from [-1, 1) using [`Mulberry32`] seeded with `seed`.
///
/// Non-finite values pass through unchanged and do not advance the
/// random stream, so the perturbation of every present value depends
/// only on how many present values precede it.
#[must_use]
pub fn apply_jitter(values: &[f64], amount: f64, seed: u32) -> Vec<f64> {
    let mut rng = Mulberry32::new(seed);
    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                v + rng.next_signed() * amount
            } else {
                v
            }
        })
        .collect()
}

/// Median of the positive gaps between consecutive distinct sorted finite
/// values, or `None` when fewer than two distinct values exist.
///
/// This measures the native spatial resolution of a coordinate set: for
/// county-centroid data the gaps are large, for precise geocodes they are
/// tiny, and jitter should scale with whichever the current subset is.
#[must_use]
pub fn median_positive_gap(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    if sorted.len() < 2 {
        return None;
    }

    let mut gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0.0)
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_by(f64::total_cmp);

    let mid = gaps.len() / 2;
    if gaps.len() % 2 == 1 {
        Some(gaps[mid])
    } else {
        Some((gaps[mid - 1] + gaps[mid]) / 2.0)
    }
}

/// Adaptive jitter amount for a coordinate set.
///
/// `steps` is the slider position in [0, 10]; 0 disables jitter. The base
/// unit is the larger of the per-axis median gaps (falling back to
/// [`DEFAULT_BASE_GAP`] when neither axis has one), scaled by
/// `steps / 10`.
#[must_use]
pub fn jitter_amount(latitudes: &[f64], longitudes: &[f64], steps: f64) -> f64 {
    if steps == 0.0 {
        return 0.0;
    }

    let base = match (
        median_positive_gap(latitudes),
        median_positive_gap(longitudes),
    ) {
        (Some(lat_gap), Some(lon_gap)) => lat_gap.max(lon_gap),
        (Some(gap), None) | (None, Some(gap)) => gap,
        (None, None) => DEFAULT_BASE_GAP,
    };

    (steps / 10.0) * base
}
