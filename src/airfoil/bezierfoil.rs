use super::parse::read_dat;
use super::SurfacePair;
use crate::bezier::continuity::enforce;
use crate::bezier::spline::{build_control_tensor, sample};
use crate::bezier::tensor::ControlTensor;
use crate::config::FitConfig;
use crate::errors::{FoilError, Result};
use log::info;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An aerofoil modelled by one cubic Bézier spline per surface.
///
/// The raw surfaces are kept as reference data only. Everything that renders or perturbs the
/// shape goes through the two control tensors, which are built once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierFoil {
    name: String,
    surfaces: SurfacePair,
    upper_control: ControlTensor,
    lower_control: ControlTensor,
    config: FitConfig,
}

impl BezierFoil {
    pub fn new(name: impl Into<String>, surfaces: SurfacePair, config: &FitConfig) -> Result<Self> {
        let name = name.into();
        let upper_control = build_control_tensor(&surfaces.upper, config)?;
        let lower_control = build_control_tensor(&surfaces.lower, config)?;
        info!(
            "fitted '{}' with {} segments per surface",
            name, config.n_segments
        );

        Ok(BezierFoil {
            name,
            surfaces,
            upper_control,
            lower_control,
            config: config.clone(),
        })
    }

    pub fn from_dat_file(path: impl AsRef<Path>, config: &FitConfig) -> Result<Self> {
        let (name, surfaces) = read_dat(path)?;
        BezierFoil::new(name, surfaces, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surfaces(&self) -> &SurfacePair {
        &self.surfaces
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn n_segments(&self) -> usize {
        self.upper_control.segments()
    }

    pub fn upper_control(&self) -> &ControlTensor {
        &self.upper_control
    }

    pub fn lower_control(&self) -> &ControlTensor {
        &self.lower_control
    }

    /// Pins both surfaces to the leading edge at (0, 0) and the trailing edge at (1, 0)
    pub fn close_curve(&mut self) {
        let le = Point2::new(0.0, 0.0);
        let te = Point2::new(1.0, 0.0);
        self.upper_control.close(le, te);
        self.lower_control.close(le, te);
    }

    pub fn upper_curve(&self, points_per_segment: usize) -> Vec<Point2<f64>> {
        sample(&self.upper_control, points_per_segment)
    }

    pub fn lower_curve(&self, points_per_segment: usize) -> Vec<Point2<f64>> {
        sample(&self.lower_control, points_per_segment)
    }

    /// The upper tensor's flat values followed by the lower tensor's, `16 * n_segments` in all
    pub fn control_vector(&self) -> Vec<f64> {
        let mut values = self.upper_control.as_flat().to_vec();
        values.extend_from_slice(self.lower_control.as_flat());
        values
    }

    /// Replace both tensors from a vector laid out like `control_vector`. Continuity is enforced
    /// again at the configured level and the curve is closed, so a perturbation can move any
    /// value without breaking the shape.
    pub fn set_control_vector(&mut self, values: &[f64]) -> Result<()> {
        let n = self.n_segments();
        let half = 8 * n;
        if values.len() != 2 * half {
            return Err(FoilError::InvalidTensor {
                expected: 2 * half,
                actual: values.len(),
            });
        }

        let upper = ControlTensor::from_flat(values[..half].to_vec(), n)?;
        let lower = ControlTensor::from_flat(values[half..].to_vec(), n)?;
        self.upper_control = enforce(upper, self.config.continuity);
        self.lower_control = enforce(lower, self.config.continuity);
        self.close_curve();
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let foil: BezierFoil = serde_json::from_str(text)?;
        foil.config.validate()?;

        let n = foil.upper_control.segments();
        if foil.lower_control.segments() != n {
            return Err(FoilError::InvalidTensor {
                expected: 8 * n,
                actual: foil.lower_control.as_flat().len(),
            });
        }
        if n != foil.config.n_segments {
            return Err(FoilError::InvalidConfig(format!(
                "config asks for {} segments but the control tensors hold {}",
                foil.config.n_segments, n
            )));
        }
        Ok(foil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::analyze::surface_deviation;
    use crate::airfoil::generate::{AirfoilGenerator, Naca4Digit};
    use approx::assert_relative_eq;

    fn naca_foil() -> BezierFoil {
        let surfaces = Naca4Digit::from_designation("2412")
            .unwrap()
            .surfaces(41)
            .unwrap();
        BezierFoil::new("NACA 2412", surfaces, &FitConfig::with_segments(4)).unwrap()
    }

    #[test]
    fn test_build_shapes() {
        let foil = naca_foil();
        assert_eq!(4, foil.n_segments());
        assert_eq!([4, 2, 4], foil.upper_control().shape());
        assert_eq!(40, foil.upper_curve(10).len());
        assert_eq!(40, foil.lower_curve(10).len());
    }

    #[test]
    fn test_fit_follows_surfaces() {
        let foil = naca_foil();
        let upper = surface_deviation(&foil.surfaces().upper, &foil.upper_curve(30));
        let lower = surface_deviation(&foil.surfaces().lower, &foil.lower_curve(30));
        assert!(upper < 2e-2, "upper deviation {}", upper);
        assert!(lower < 2e-2, "lower deviation {}", lower);
    }

    #[test]
    fn test_close_curve() {
        let mut foil = naca_foil();
        foil.close_curve();
        for t in [foil.upper_control(), foil.lower_control()] {
            assert_eq!(Point2::new(0.0, 0.0), t.start());
            assert_eq!(Point2::new(1.0, 0.0), t.end());
        }
        assert_eq!(Point2::new(0.0, 0.0), foil.upper_curve(5)[0]);
    }

    #[test]
    fn test_control_vector_round_trip() {
        let mut foil = naca_foil();
        foil.close_curve();
        let before = foil.clone();

        let values = foil.control_vector();
        assert_eq!(64, values.len());
        foil.set_control_vector(&values).unwrap();
        assert_eq!(before, foil);
    }

    #[test]
    fn test_perturbation_keeps_continuity() {
        let mut foil = naca_foil();
        let mut values = foil.control_vector();

        // P2.y of the first upper segment: (k = 2, c = 1, i = 0) with 4 segments
        values[(2 * 2 + 1) * 4] += 0.01;
        foil.set_control_vector(&values).unwrap();

        let t = foil.upper_control();
        let e = t.point(3, 0) - t.point(2, 0);
        let r = t.point(1, 1) - t.point(0, 1);
        assert_relative_eq!(e.x, r.x, epsilon = 1e-12);
        assert_relative_eq!(e.y, r.y, epsilon = 1e-12);
        assert_eq!(Point2::new(1.0, 0.0), t.end());
    }

    #[test]
    fn test_control_vector_wrong_length() {
        let mut foil = naca_foil();
        assert!(matches!(
            foil.set_control_vector(&[0.0; 10]),
            Err(FoilError::InvalidTensor {
                expected: 64,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let foil = naca_foil();
        let restored = BezierFoil::from_json(&foil.to_json().unwrap()).unwrap();

        assert_eq!(foil.name(), restored.name());
        assert_eq!(foil.config(), restored.config());
        for (a, b) in foil
            .control_vector()
            .iter()
            .zip(restored.control_vector().iter())
        {
            assert_relative_eq!(*a, *b, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_json_rejects_bad_shape() {
        let foil = naca_foil();
        let mut value: serde_json::Value = serde_json::from_str(&foil.to_json().unwrap()).unwrap();
        value["lower_control"]["shape"] = serde_json::json!([4, 2, 3]);
        assert!(BezierFoil::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_json_rejects_segment_count_mismatch() {
        let foil = naca_foil();
        let mut value: serde_json::Value = serde_json::from_str(&foil.to_json().unwrap()).unwrap();
        value["config"]["n_segments"] = serde_json::json!(3);
        assert!(matches!(
            BezierFoil::from_json(&value.to_string()),
            Err(FoilError::InvalidConfig(_))
        ));
    }
}
