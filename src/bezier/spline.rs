use super::continuity::enforce;
use super::fit::{initial_guess, SegmentFitter};
use super::segment::split;
use super::tensor::ControlTensor;
use crate::config::FitConfig;
use crate::errors::{FoilError, Result};
use log::{debug, info, warn};
use ncollide2d::na::Point2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fit one window, re-seeding from the previous attempt with a relaxed tolerance each time the
/// minimizer stops short of convergence.
fn fit_window(
    fitter: &SegmentFitter,
    points: &[Point2<f64>],
    config: &FitConfig,
    index: usize,
) -> Result<[Point2<f64>; 4]> {
    let mut seed = initial_guess(points).map_err(|e| e.at_segment(index))?;
    let mut residual = f64::INFINITY;

    for attempt in 0..=config.max_retries {
        let options = config.minimize_options(attempt);
        let fit = fitter.attempt(points, &seed, &options)?;

        if fit.converged {
            debug!(
                "segment {} fit {} points in {} iterations, residual {:e}",
                index,
                points.len(),
                fit.iterations,
                fit.residual
            );
            return Ok(fit.control);
        }

        if attempt < config.max_retries {
            warn!(
                "segment {} did not converge at tolerance {:e} (residual {:e}), retrying",
                index, options.f_tol, fit.residual
            );
        }
        seed = fit.control;
        residual = fit.residual;
    }

    Err(FoilError::FitFailure {
        segment: index,
        attempts: config.max_retries + 1,
        residual,
    })
}

/// Build the control tensor of one surface from its raw points.
///
/// The surface is split into `config.n_segments` windows, each window is fitted independently,
/// the fits are stacked along the segment axis and the boundaries are then repaired to the
/// configured continuity. Any failing segment aborts the whole build.
pub fn build_control_tensor(points: &[Point2<f64>], config: &FitConfig) -> Result<ControlTensor> {
    config.validate()?;
    let windows = split(points, config.n_segments)?;
    let fitter = SegmentFitter::from_config(config);

    #[cfg(feature = "parallel")]
    let fits: Result<Vec<[Point2<f64>; 4]>> = windows
        .par_iter()
        .enumerate()
        .map(|(i, w)| fit_window(&fitter, w, config, i))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let fits: Result<Vec<[Point2<f64>; 4]>> = windows
        .iter()
        .enumerate()
        .map(|(i, w)| fit_window(&fitter, w, config, i))
        .collect();

    let tensor = ControlTensor::from_segments(&fits?)?;
    info!(
        "built {} segment control tensor from {} points ({}, {:?})",
        tensor.segments(),
        points.len(),
        config.method,
        config.continuity
    );

    Ok(enforce(tensor, config.continuity))
}

/// Render every segment with `points_per_segment` evenly spaced parameter values and
/// concatenate them in order. Shared boundary points appear once per segment.
pub fn sample(tensor: &ControlTensor, points_per_segment: usize) -> Vec<Point2<f64>> {
    (0..tensor.segments())
        .flat_map(|i| tensor.curve(i).sample(points_per_segment))
        .collect()
}
