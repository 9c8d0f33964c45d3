//! Evaluation of a single cubic Bézier segment through the characteristic matrix.
//!
//! Evaluation is always two steps: the control points are premultiplied by the characteristic
//! matrix once, then each parameter value is a dot product of the power vector `[1, t, t², t³]`
//! with the coordinate columns of that product.

use super::basis::{bezier_matrix, BEZIER_MATRIX};
use crate::algorithms::linspace;
use crate::errors::{FoilError, Result};
use ncollide2d::na::{DMatrix, Point2, Vector2};

fn combine(weights: impl Iterator<Item = f64>, control: &[Point2<f64>]) -> Vector2<f64> {
    weights
        .zip(control.iter())
        .fold(Vector2::zeros(), |acc, (w, p)| acc + p.coords * w)
}

/// Computes `matrix × control`, one row per power of t. The matrix must be square, must be the
/// 4x4 of a cubic, and must have one column per control point.
pub fn control_product(
    matrix: &DMatrix<f64>,
    control: &[Point2<f64>],
) -> Result<Vec<Vector2<f64>>> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rows != 4 || control.len() != cols {
        return Err(FoilError::Shape {
            rows,
            cols,
            points: control.len(),
        });
    }

    Ok((0..rows)
        .map(|i| combine(matrix.row(i).iter().copied(), control))
        .collect())
}

/// Dot product of the power vector for `t` with each coordinate column of a control product
pub fn power_dot(product: &[Vector2<f64>], t: f64) -> Point2<f64> {
    let mut power = 1.0;
    let mut sum = Vector2::zeros();
    for row in product.iter() {
        sum += row * power;
        power *= t;
    }
    Point2::from(sum)
}

/// Evaluate the cubic defined by `control` at a single parameter value
pub fn evaluate(control: &[Point2<f64>], t: f64) -> Result<Point2<f64>> {
    let product = control_product(&bezier_matrix(), control)?;
    Ok(power_dot(&product, t))
}

/// Evaluate the cubic defined by `control` at `n_points` parameter values evenly spaced over
/// [0, 1], both ends included
pub fn evaluate_curve(control: &[Point2<f64>], n_points: usize) -> Result<Vec<Point2<f64>>> {
    let product = control_product(&bezier_matrix(), control)?;
    Ok(linspace(n_points)
        .into_iter()
        .map(|t| power_dot(&product, t))
        .collect())
}

/// A cubic Bézier segment with its control product cached. The fixed size array makes the
/// shape contract a property of the type, so evaluation cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    control: [Point2<f64>; 4],
    product: [Vector2<f64>; 4],
}

impl CubicBezier {
    pub fn new(control: [Point2<f64>; 4]) -> CubicBezier {
        let product = std::array::from_fn(|i| combine(BEZIER_MATRIX[i].iter().copied(), &control));
        CubicBezier { control, product }
    }

    pub fn control(&self) -> &[Point2<f64>; 4] {
        &self.control
    }

    pub fn point_at(&self, t: f64) -> Point2<f64> {
        power_dot(&self.product, t)
    }

    /// First derivative with respect to t
    pub fn derivative_at(&self, t: f64) -> Vector2<f64> {
        self.product[1] + self.product[2] * (2.0 * t) + self.product[3] * (3.0 * t * t)
    }

    /// Samples `n_points` points evenly spaced in t over [0, 1], both ends included
    pub fn sample(&self, n_points: usize) -> Vec<Point2<f64>> {
        linspace(n_points)
            .into_iter()
            .map(|t| self.point_at(t))
            .collect()
    }
}
