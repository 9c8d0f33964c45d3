use ncollide2d::na::Point2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct PointOut(#[serde(with = "Point2f64")] Point2<f64>);

// nalgebra points can't be built field by field, so reading goes through a plain struct
#[derive(Deserialize)]
struct PointIn {
    x: f64,
    y: f64,
}

/// Serde adapter for `Vec<Point2<f64>>` fields, written as a list of `{x, y}` objects
pub mod point_vec {
    use super::*;

    pub fn serialize<S: Serializer>(points: &[Point2<f64>], s: S) -> Result<S::Ok, S::Error> {
        let wrapped: Vec<PointOut> = points.iter().map(|p| PointOut(*p)).collect();
        wrapped.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Point2<f64>>, D::Error> {
        let raw: Vec<PointIn> = Vec::deserialize(d)?;
        Ok(raw.into_iter().map(|p| Point2::new(p.x, p.y)).collect())
    }
}
