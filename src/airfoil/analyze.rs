//! Geometric checks on sampled aerofoil contours.

use crate::geometry::distances2::max_distance_to_polyline;
use itertools::Itertools;
use ncollide2d::na::Point2;

const VALIDITY_TOL: f64 = 1e-6;

/// Area enclosed by a contour, treated as a closed loop whether or not its last point repeats
/// the first. Orientation does not matter.
pub fn enclosed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let twice: f64 = contour
        .iter()
        .chain(contour.first())
        .tuple_windows()
        .map(|(a, b)| (b.x - a.x) * (b.y + a.y))
        .sum();

    twice.abs() / 2.0
}

fn is_x_monotonic(points: &[Point2<f64>]) -> bool {
    points
        .iter()
        .tuple_windows()
        .all(|(a, b)| b.x >= a.x - VALIDITY_TOL)
}

/// Checks an outer contour made of two sampled surfaces of `surface_len` points each (upper
/// reversed, then lower). Both surfaces must advance in x from the leading edge to the trailing
/// edge and the upper surface may not cross below the lower at matching sample indices.
pub fn is_valid_contour(contour: &[Point2<f64>], surface_len: usize) -> bool {
    if surface_len == 0 || contour.len() != 2 * surface_len {
        return false;
    }

    let mut upper = contour[..surface_len].to_vec();
    upper.reverse();
    let lower = &contour[surface_len..];

    is_x_monotonic(&upper)
        && is_x_monotonic(lower)
        && upper
            .iter()
            .zip(lower.iter())
            .all(|(u, l)| u.y - l.y >= -VALIDITY_TOL)
}

/// Largest distance from any raw sample to the polyline through the sampled curve
pub fn surface_deviation(raw: &[Point2<f64>], curve: &[Point2<f64>]) -> f64 {
    max_distance_to_polyline(curve, raw)
}
