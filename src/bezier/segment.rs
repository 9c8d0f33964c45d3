use crate::errors::{FoilError, Result};
use ncollide2d::na::Point2;

/// Split an ordered surface into `n_segments` windows for independent fitting.
///
/// With `size = len / n_segments` (floored), window i covers indices `[i * size, i * size +
/// size]` inclusive, so consecutive windows share exactly one point. The final window always
/// runs to the last point of the surface: when `len` divides evenly it is one point shorter than
/// the others, and otherwise it takes up the remainder so the trailing edge is never dropped.
/// This departs from the plain `[i * size, i * size + size]` rule, which would leave the last
/// `len % n_segments` points unfitted.
pub fn split(points: &[Point2<f64>], n_segments: usize) -> Result<Vec<&[Point2<f64>]>> {
    if n_segments == 0 {
        return Err(FoilError::InvalidConfig(
            "the number of segments must be positive".to_string(),
        ));
    }

    let size = points.len() / n_segments;
    if size == 0 {
        return Err(FoilError::DegenerateSegment {
            segment: 0,
            distinct: points.len().min(1),
        });
    }

    let last = points.len() - 1;
    Ok((0..n_segments)
        .map(|i| {
            let start = i * size;
            let end = if i == n_segments - 1 {
                last
            } else {
                (start + size).min(last)
            };
            &points[start..=end]
        })
        .collect())
}
