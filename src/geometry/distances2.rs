use ncollide2d::math::Isometry;
use ncollide2d::na::{Point2, RealField};
use ncollide2d::query::PointQuery;
use ncollide2d::shape::Polyline;

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

/// Sum of the distances between corresponding points of two sequences. Extra points in the
/// longer sequence are ignored.
pub fn summed_distance(a: &[Point2<f64>], b: &[Point2<f64>]) -> f64 {
    a.iter().zip(b.iter()).map(|(p, q)| dist(p, q)).sum()
}

/// The largest distance from any of the test points to the polyline through `line_points`.
/// Returns 0.0 if there are no test points, and the point distance if the line is a single
/// vertex.
pub fn max_distance_to_polyline(line_points: &[Point2<f64>], test: &[Point2<f64>]) -> f64 {
    match line_points.len() {
        0 => 0.0,
        1 => test
            .iter()
            .map(|p| dist(p, &line_points[0]))
            .fold(0.0, f64::max),
        _ => {
            let line = Polyline::new(line_points.to_vec(), None);
            test.iter()
                .map(|p| {
                    let closest = line.project_point(&Isometry::identity(), p, false);
                    dist(p, &closest.point)
                })
                .fold(0.0, f64::max)
        }
    }
}
