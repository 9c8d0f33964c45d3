use crate::bezier::cubic::CubicBezier;
use crate::errors::{FoilError, Result};
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

/// Control points per cubic segment
pub const CONTROL_POINTS: usize = 4;

/// Coordinates per control point
pub const COORDS: usize = 2;

/// Control points of a multi-segment cubic spline, shaped [4 control points, 2 coordinates, N
/// segments] and stored flat in row-major order, so element (k, c, i) lives at
/// `(k * 2 + c) * N + i`. For every segment the first axis holds P0, P1, P2, P3 in order.
///
/// The flat layout is the perturbation interface: `as_flat`/`from_flat` expose exactly this
/// ordering and reshaping back with the same segment count restores the tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TensorData", into = "TensorData")]
pub struct ControlTensor {
    values: Vec<f64>,
    segments: usize,
}

#[derive(Serialize, Deserialize)]
struct TensorData {
    shape: [usize; 3],
    values: Vec<f64>,
}

impl TryFrom<TensorData> for ControlTensor {
    type Error = FoilError;

    fn try_from(data: TensorData) -> Result<Self> {
        let [k, c, n] = data.shape;
        if k != CONTROL_POINTS || c != COORDS {
            return Err(FoilError::InvalidConfig(format!(
                "control tensor shape must be [4, 2, N], got [{}, {}, {}]",
                k, c, n
            )));
        }
        ControlTensor::from_flat(data.values, n)
    }
}

impl From<ControlTensor> for TensorData {
    fn from(tensor: ControlTensor) -> Self {
        TensorData {
            shape: tensor.shape(),
            values: tensor.values,
        }
    }
}

impl ControlTensor {
    /// Reshape a flat row-major vector into a tensor of `segments` segments
    pub fn from_flat(values: Vec<f64>, segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(FoilError::InvalidConfig(
                "a control tensor needs at least one segment".to_string(),
            ));
        }

        let expected = CONTROL_POINTS * COORDS * segments;
        if values.len() != expected {
            return Err(FoilError::InvalidTensor {
                expected,
                actual: values.len(),
            });
        }

        Ok(ControlTensor { values, segments })
    }

    /// Stack per-segment control points along the segment axis
    pub fn from_segments(segments: &[[Point2<f64>; 4]]) -> Result<Self> {
        let n = segments.len();
        let mut tensor = ControlTensor::from_flat(vec![0.0; CONTROL_POINTS * COORDS * n], n)?;
        for (i, control) in segments.iter().enumerate() {
            tensor.set_segment(i, control);
        }
        Ok(tensor)
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn shape(&self) -> [usize; 3] {
        [CONTROL_POINTS, COORDS, self.segments]
    }

    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }

    pub fn as_flat_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.values
    }

    fn index(&self, k: usize, c: usize, i: usize) -> usize {
        assert!(
            k < CONTROL_POINTS && c < COORDS && i < self.segments,
            "control tensor index ({}, {}, {}) out of bounds for {:?}",
            k,
            c,
            i,
            self.shape()
        );
        (k * COORDS + c) * self.segments + i
    }

    /// Control point `k` (0 to 3) of segment `i`
    pub fn point(&self, k: usize, i: usize) -> Point2<f64> {
        Point2::new(self.values[self.index(k, 0, i)], self.values[self.index(k, 1, i)])
    }

    pub fn set_point(&mut self, k: usize, i: usize, p: Point2<f64>) {
        let ix = self.index(k, 0, i);
        let iy = self.index(k, 1, i);
        self.values[ix] = p.x;
        self.values[iy] = p.y;
    }

    pub fn segment(&self, i: usize) -> [Point2<f64>; 4] {
        std::array::from_fn(|k| self.point(k, i))
    }

    pub fn set_segment(&mut self, i: usize, control: &[Point2<f64>; 4]) {
        for (k, p) in control.iter().enumerate() {
            self.set_point(k, i, *p);
        }
    }

    pub fn curve(&self, i: usize) -> CubicBezier {
        CubicBezier::new(self.segment(i))
    }

    /// The free leading anchor, P0 of the first segment
    pub fn start(&self) -> Point2<f64> {
        self.point(0, 0)
    }

    /// The free trailing anchor, P3 of the last segment
    pub fn end(&self) -> Point2<f64> {
        self.point(CONTROL_POINTS - 1, self.segments - 1)
    }

    /// Pin the two free anchors of the spline. Boundary control points between segments are
    /// not touched.
    pub fn close(&mut self, start: Point2<f64>, end: Point2<f64>) {
        let last = self.segments - 1;
        self.set_point(0, 0, start);
        self.set_point(CONTROL_POINTS - 1, last, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn two_segments() -> ControlTensor {
        ControlTensor::from_segments(&[
            [
                Point2::new(0.0, 0.0),
                Point2::new(0.1, 0.2),
                Point2::new(0.3, 0.3),
                Point2::new(0.5, 0.3),
            ],
            [
                Point2::new(0.5, 0.3),
                Point2::new(0.7, 0.3),
                Point2::new(0.9, 0.1),
                Point2::new(1.0, 0.0),
            ],
        ])
        .unwrap()
    }

    #[test]
    fn test_row_major_layout() {
        let t = two_segments();
        let flat = t.as_flat();
        // (k=0, c=0) row holds P0.x of both segments, then (k=0, c=1) holds P0.y
        assert_eq!(&[0.0, 0.5], &flat[0..2]);
        assert_eq!(&[0.0, 0.3], &flat[2..4]);
        // (k=3, c=0) row
        assert_eq!(&[0.5, 1.0], &flat[12..14]);
    }

    #[test]
    fn test_flat_round_trip_preserves_segments() {
        let t = two_segments();
        let restored = ControlTensor::from_flat(t.as_flat().to_vec(), 2).unwrap();
        assert_eq!(t, restored);
        assert_eq!(t.segment(1), restored.segment(1));
    }

    #[test_case(15, 2)]
    #[test_case(17, 2)]
    #[test_case(8, 2)]
    fn test_from_flat_wrong_length(len: usize, n: usize) {
        let result = ControlTensor::from_flat(vec![0.0; len], n);
        assert!(matches!(
            result,
            Err(FoilError::InvalidTensor { expected: 16, .. })
        ));
    }

    #[test]
    fn test_from_flat_zero_segments() {
        assert!(ControlTensor::from_flat(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_close_pins_only_free_anchors() {
        let mut t = two_segments();
        t.close(Point2::new(-1.0, -1.0), Point2::new(2.0, 2.0));
        assert_eq!(Point2::new(-1.0, -1.0), t.start());
        assert_eq!(Point2::new(2.0, 2.0), t.end());
        assert_eq!(Point2::new(0.5, 0.3), t.point(3, 0));
        assert_eq!(Point2::new(0.5, 0.3), t.point(0, 1));
    }

    #[test]
    fn test_serde_shape() {
        let t = two_segments();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"shape\":[4,2,2]"));
        let restored: ControlTensor = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }

    #[test]
    fn test_serde_rejects_bad_shape() {
        let json = r#"{"shape":[3,2,1],"values":[0,0,0,0,0,0]}"#;
        assert!(serde_json::from_str::<ControlTensor>(json).is_err());

        let json = r#"{"shape":[4,2,1],"values":[0,0,0]}"#;
        assert!(serde_json::from_str::<ControlTensor>(json).is_err());
    }
}
