use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

pub mod analyze;
pub mod bezierfoil;
pub mod export;
pub mod generate;
pub mod parse;

pub use bezierfoil::BezierFoil;

/// Points on the upper and lower surface at the same station along the camber line
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// Raw samples of the two surfaces of an aerofoil. Both run chordwise from the leading edge to
/// the trailing edge, and the leading edge point belongs to the upper surface only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePair {
    #[serde(with = "crate::serialize::point_vec")]
    pub upper: Vec<Point2<f64>>,

    #[serde(with = "crate::serialize::point_vec")]
    pub lower: Vec<Point2<f64>>,
}

impl SurfacePair {
    pub fn new(upper: Vec<Point2<f64>>, lower: Vec<Point2<f64>>) -> SurfacePair {
        SurfacePair { upper, lower }
    }

    /// Stations from a generator ordered from the leading edge to the trailing edge. The
    /// leading edge station contributes its upper point only.
    pub fn from_stations(stations: &[CamberStation]) -> SurfacePair {
        SurfacePair {
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().skip(1).map(|s| s.lower).collect(),
        }
    }

    /// A single loop in Selig order: trailing edge over the upper surface to the leading edge,
    /// then back along the lower surface
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result = self.upper.to_vec();
        result.reverse();
        result.extend_from_slice(&self.lower);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(x: f64) -> CamberStation {
        CamberStation::new(
            Point2::new(x, 0.0),
            Point2::new(x, 0.1),
            Point2::new(x, -0.1),
        )
    }

    #[test]
    fn test_from_stations_skips_lower_leading_edge() {
        let stations: Vec<CamberStation> = (0..5).map(|i| station(i as f64 / 4.0)).collect();
        let pair = SurfacePair::from_stations(&stations);
        assert_eq!(5, pair.upper.len());
        assert_eq!(4, pair.lower.len());
        assert_eq!(Point2::new(0.25, -0.1), pair.lower[0]);
    }

    #[test]
    fn test_outer_contour_order() {
        let pair = SurfacePair::new(
            vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.1), Point2::new(1.0, 0.0)],
            vec![Point2::new(0.5, -0.1), Point2::new(1.0, 0.0)],
        );
        let contour = pair.to_outer_contour();
        assert_eq!(
            vec![
                Point2::new(1.0, 0.0),
                Point2::new(0.5, 0.1),
                Point2::new(0.0, 0.0),
                Point2::new(0.5, -0.1),
                Point2::new(1.0, 0.0),
            ],
            contour
        );
    }

    #[test]
    fn test_json_point_objects() {
        let pair = SurfacePair::new(vec![Point2::new(0.0, 0.5)], vec![Point2::new(1.0, -0.5)]);
        let text = serde_json::to_string(&pair).unwrap();
        assert!(text.contains(r#"{"x":0.0,"y":0.5}"#));
        let back: SurfacePair = serde_json::from_str(&text).unwrap();
        assert_eq!(pair, back);
    }
}
