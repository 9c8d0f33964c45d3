use super::cubic::CubicBezier;
use crate::algorithms::{distinct_count, linspace};
use crate::config::FitConfig;
use crate::errors::{FoilError, Result};
use crate::geometry::distances2::{dist, summed_distance};
use crate::minimize::{FitMethod, MinimizeOptions, Minimizer};
use ncollide2d::na::Point2;

/// Outcome of a single minimizer run on one segment, converged or not
#[derive(Debug, Clone, Copy)]
pub struct Fit {
    pub control: [Point2<f64>; 4],
    pub residual: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Seed for the fit: the two end points as anchors and the points a third and two thirds of the
/// way through the window as handles.
pub fn initial_guess(points: &[Point2<f64>]) -> Result<[Point2<f64>; 4]> {
    let distinct = distinct_count(points);
    if distinct < 4 {
        return Err(FoilError::DegenerateSegment {
            segment: 0,
            distinct,
        });
    }

    let n = points.len();
    Ok([points[0], points[n / 3], points[2 * n / 3], points[n - 1]])
}

/// Sum of the distances between the curve, evaluated at `points.len()` evenly spaced parameter
/// values, and the corresponding points
pub fn residual(curve: &CubicBezier, points: &[Point2<f64>]) -> f64 {
    summed_distance(&curve.sample(points.len()), points)
}

fn to_params(control: &[Point2<f64>; 4]) -> Vec<f64> {
    control.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn from_params(x: &[f64]) -> [Point2<f64>; 4] {
    std::array::from_fn(|k| Point2::new(x[2 * k], x[2 * k + 1]))
}

/// Fits the four control points of one cubic segment to an ordered point window by minimizing
/// `residual` over the 8 control point coordinates.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFitter {
    pub method: FitMethod,
    pub options: MinimizeOptions,
}

impl SegmentFitter {
    pub fn new(method: FitMethod, options: MinimizeOptions) -> SegmentFitter {
        SegmentFitter { method, options }
    }

    pub fn from_config(config: &FitConfig) -> SegmentFitter {
        SegmentFitter::new(config.method, config.minimize_options(0))
    }

    /// Fit from the default seed with the fitter's own options. A run which does not meet the
    /// tolerances is a `FitFailure`; the initial guess is never returned in its place.
    pub fn fit(&self, points: &[Point2<f64>]) -> Result<[Point2<f64>; 4]> {
        let seed = initial_guess(points)?;
        let fit = self.attempt(points, &seed, &self.options)?;
        if fit.converged {
            Ok(fit.control)
        } else {
            Err(FoilError::FitFailure {
                segment: 0,
                attempts: 1,
                residual: fit.residual,
            })
        }
    }

    /// Run the minimizer once from `seed` and report the outcome without judging it
    pub fn attempt(
        &self,
        points: &[Point2<f64>],
        seed: &[Point2<f64>; 4],
        options: &MinimizeOptions,
    ) -> Result<Fit> {
        let ts = linspace(points.len());
        let objective = |x: &[f64]| -> f64 {
            let curve = CubicBezier::new(from_params(x));
            ts.iter()
                .zip(points.iter())
                .map(|(t, p)| dist(&curve.point_at(*t), p))
                .sum()
        };

        let result = self.method.minimize(&objective, &to_params(seed), options)?;
        Ok(Fit {
            control: from_params(&result.x),
            residual: result.fun,
            iterations: result.iterations,
            converged: result.converged,
        })
    }
}
