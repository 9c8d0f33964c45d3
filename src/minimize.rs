//! Unconstrained minimizers used by the segment fitter.
//!
//! The set of supported strategies is closed: a configuration names one of the `FitMethod`
//! variants, and each variant is backed by a type implementing `Minimizer`.

mod bfgs;
mod nelder_mead;

pub use bfgs::Bfgs;
pub use nelder_mead::NelderMead;

use crate::errors::{FoilError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Options shared by all of the minimizers. Tolerances are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    pub max_iter: usize,
    pub f_tol: f64,
    pub x_tol: f64,
    pub g_tol: f64,
    /// Step used by finite difference gradients
    pub eps: f64,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        MinimizeOptions::new(20_000, 1e-10)
    }
}

impl MinimizeOptions {
    /// Create options with a single tolerance applied to the function value, the decision
    /// variable and the gradient.
    pub fn new(max_iter: usize, tol: f64) -> Self {
        MinimizeOptions {
            max_iter,
            f_tol: tol,
            x_tol: tol,
            g_tol: tol,
            eps: f64::EPSILON.sqrt(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinimizeResult {
    pub x: Vec<f64>,
    pub fun: f64,
    pub iterations: usize,
    pub nfev: usize,
    pub converged: bool,
}

/// The common capability of every supported strategy. A result is returned whether or not the
/// tolerances were met; the `converged` flag tells the caller which happened. Errors are reserved
/// for inputs the strategy cannot work with at all.
pub trait Minimizer {
    fn minimize(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        x0: &[f64],
        options: &MinimizeOptions,
    ) -> Result<MinimizeResult>;
}

/// Names the minimizer used to fit each segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMethod {
    /// Derivative free simplex search, robust on the non-smooth sum-of-distances objective
    #[default]
    #[serde(alias = "Nelder-Mead")]
    NelderMead,

    /// Quasi-Newton with finite difference gradients
    #[serde(alias = "BFGS", alias = "L-BFGS-B")]
    Bfgs,
}

impl FitMethod {
    pub fn name(&self) -> &'static str {
        match self {
            FitMethod::NelderMead => "nelder-mead",
            FitMethod::Bfgs => "bfgs",
        }
    }
}

impl Display for FitMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FitMethod {
    type Err = FoilError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nelder-mead" | "neldermead" => Ok(FitMethod::NelderMead),
            "bfgs" | "l-bfgs-b" => Ok(FitMethod::Bfgs),
            other => Err(FoilError::InvalidConfig(format!(
                "unsupported fit method '{}'",
                other
            ))),
        }
    }
}

impl Minimizer for FitMethod {
    fn minimize(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        x0: &[f64],
        options: &MinimizeOptions,
    ) -> Result<MinimizeResult> {
        match self {
            FitMethod::NelderMead => NelderMead::default().minimize(f, x0, options),
            FitMethod::Bfgs => Bfgs::default().minimize(f, x0, options),
        }
    }
}

pub(crate) fn empty_guess(name: &str) -> FoilError {
    FoilError::InvalidConfig(format!("{}: empty initial guess", name))
}

pub(crate) fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
