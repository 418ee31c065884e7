//! LOESS trend smoothing.
//!
//! Locally weighted linear regression after Cleveland (1979): each point
//! is fitted from its nearest neighbors, weighted by the tricube kernel,
//! producing a smooth curve through noisy scatter data.
//!
//! Each of the `n` points re-ranks all `n` distances, so a call is
//! O(n² log n). The input here is one point per distinct month of the
//! dataset — a few hundred at most — not the raw record count.

/// Fraction of points treated as local neighbors when the caller does not
/// specify one.
pub const DEFAULT_BANDWIDTH: f64 = 0.75;

/// Determinant threshold below which the weighted regression is treated
/// as numerically degenerate (all weighted neighbor x-values identical).
const DEGENERATE_DET: f64 = 1e-12;

/// Fits a smoothed value for every input point.
///
/// `bandwidth` is the fraction of points used as neighbors, in (0, 1];
/// non-positive values fall back to [`DEFAULT_BANDWIDTH`]. Sequences
/// shorter than 3 points are returned unchanged — smoothing is
/// meaningless below that.
///
/// Degenerate neighborhoods never error: a neighbor set collapsed onto
/// the query point yields that point's own y, and a singular regression
/// matrix yields the weighted mean. The two fallbacks use different
/// tolerances (exact zero vs `1e-12`) and must stay distinct branches —
/// merging them changes smoothing behavior for nearly-duplicate x-values.
///
/// # Panics
///
/// Panics if `xs` and `ys` differ in length.
#[must_use]
pub fn loess(xs: &[f64], ys: &[f64], bandwidth: f64) -> Vec<f64> {
    assert_eq!(xs.len(), ys.len(), "xs and ys must be parallel sequences");

    let n = xs.len();
    if n < 3 {
        return ys.to_vec();
    }

    let bw = if bandwidth > 0.0 {
        bandwidth
    } else {
        DEFAULT_BANDWIDTH
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span = usize::max(2, (bw * n as f64).floor() as usize).min(n);

    let mut fitted = Vec::with_capacity(n);
    let mut by_distance: Vec<(usize, f64)> = Vec::with_capacity(n);

    for (i, &xi) in xs.iter().enumerate() {
        by_distance.clear();
        by_distance.extend(xs.iter().enumerate().map(|(j, &x)| (j, (x - xi).abs())));
        // Stable: ties keep original input order
        by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
        let neighbors = &by_distance[..span];

        let max_dist = neighbors[span - 1].1;
        if max_dist == 0.0 {
            // Every selected neighbor coincides with x_i
            fitted.push(ys[i]);
            continue;
        }

        let mut sw = 0.0;
        let mut swx = 0.0;
        let mut swy = 0.0;
        let mut swx2 = 0.0;
        let mut swxy = 0.0;
        for &(j, d) in neighbors {
            let u = d / max_dist;
            let w = (1.0 - u.powi(3)).powi(3);
            let x = xs[j];
            let y = ys[j];
            sw += w;
            swx += w * x;
            swy += w * y;
            swx2 += w * x * x;
            swxy += w * x * y;
        }

        let det = sw * swx2 - swx * swx;
        if det.abs() < DEGENERATE_DET {
            fitted.push(swy / sw);
        } else {
            let b1 = (sw * swxy - swx * swy) / det;
            let b0 = (swy - b1 * swx) / sw;
            fitted.push(b0 + b1 * xi);
        }
    }

    fitted
}
