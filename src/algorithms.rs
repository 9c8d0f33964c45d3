use crate::geometry::distances2::dist;
use ncollide2d::na::Point2;

/// Points closer than this are considered the same sample
pub const DISTINCT_TOL: f64 = 1e-12;

/// Returns `n` values evenly spaced over [0, 1], both ends included. A single value is 0.0.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { 1.0 } else { i as f64 * step })
                .collect()
        }
    }
}

/// Counts the points in the slice which are not within `DISTINCT_TOL` of an earlier point. The
/// check is over all earlier points, not only the adjacent one, so a window that doubles back on
/// itself is not over-counted.
pub fn distinct_count(points: &[Point2<f64>]) -> usize {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| !points[..*i].iter().any(|q| dist(p, q) <= DISTINCT_TOL))
        .count()
}
