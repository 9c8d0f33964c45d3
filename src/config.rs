use crate::bezier::continuity::Continuity;
use crate::errors::{FoilError, Result};
use crate::minimize::{FitMethod, MinimizeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for building and sampling control tensors. Every field has a default, so a JSON
/// configuration only needs to name what it changes, e.g. `{"n_segments": 3, "method": "bfgs"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Number of cubic segments per surface
    pub n_segments: usize,

    pub method: FitMethod,

    /// Samples per segment when the spline is rendered, not used while fitting
    pub points_per_segment: usize,

    /// Absolute convergence tolerance of the first fit attempt
    pub tolerance: f64,

    pub max_iterations: usize,

    /// Further attempts after a fit fails to converge
    pub max_retries: usize,

    /// Factor the tolerance is multiplied by on each retry
    pub tolerance_relaxation: f64,

    pub continuity: Continuity,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            n_segments: 5,
            method: FitMethod::NelderMead,
            points_per_segment: 30,
            tolerance: 1e-10,
            max_iterations: 20_000,
            max_retries: 3,
            tolerance_relaxation: 100.0,
            continuity: Continuity::C1,
        }
    }
}

impl FitConfig {
    pub fn with_segments(n_segments: usize) -> Self {
        FitConfig {
            n_segments,
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: FitConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        FitConfig::from_json(&text)
    }

    /// Minimizer options for the given fit attempt, 0 being the first
    pub fn minimize_options(&self, attempt: usize) -> MinimizeOptions {
        let tol = self.tolerance * self.tolerance_relaxation.powi(attempt as i32);
        MinimizeOptions::new(self.max_iterations, tol)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_segments == 0 {
            return Err(FoilError::InvalidConfig(
                "n_segments must be positive".to_string(),
            ));
        }
        if self.points_per_segment == 0 {
            return Err(FoilError::InvalidConfig(
                "points_per_segment must be positive".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FoilError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FoilError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !(self.tolerance_relaxation.is_finite() && self.tolerance_relaxation >= 1.0) {
            return Err(FoilError::InvalidConfig(format!(
                "tolerance_relaxation must be at least 1, got {}",
                self.tolerance_relaxation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FitConfig::from_json(r#"{"n_segments": 3, "method": "BFGS"}"#).unwrap();
        assert_eq!(3, config.n_segments);
        assert_eq!(FitMethod::Bfgs, config.method);
        assert_eq!(30, config.points_per_segment);
        assert_eq!(Continuity::C1, config.continuity);
    }

    #[test]
    fn test_continuity_names() {
        let config = FitConfig::from_json(r#"{"continuity": "c2"}"#).unwrap();
        assert_eq!(Continuity::C2, config.continuity);
    }

    #[test_case(r#"{"n_segments": 0}"#)]
    #[test_case(r#"{"points_per_segment": 0}"#)]
    #[test_case(r#"{"tolerance": -1.0}"#)]
    #[test_case(r#"{"tolerance_relaxation": 0.5}"#)]
    #[test_case(r#"{"method": "powell"}"#)]
    #[test_case(r#"{"segments": 4}"#)]
    fn test_invalid_json(text: &str) {
        assert!(FitConfig::from_json(text).is_err());
    }

    #[test]
    fn test_relaxed_tolerance() {
        let config = FitConfig::default();
        assert_relative_eq!(1e-10, config.minimize_options(0).f_tol, max_relative = 1e-12);
        assert_relative_eq!(1e-6, config.minimize_options(2).x_tol, max_relative = 1e-12);
    }

    #[test]
    fn test_json_file() {
        let path = std::env::temp_dir().join("bezierfoil_config_test.json");
        std::fs::write(&path, r#"{"n_segments": 7}"#).unwrap();
        let config = FitConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(7, config.n_segments);
    }
}
