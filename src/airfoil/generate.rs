use crate::airfoil::{CamberStation, SurfacePair};
use crate::errors::{FoilError, Result};
use ncollide2d::na::{Point2, Vector2};
use std::f64::consts::PI;

const EPSILON: f64 = 1e-3;

/// An AirfoilGenerator is an entity which can generate the x, y position of the mean camber line
/// and the airfoil thickness at fractions of the chord. This provides the information necessary
/// for a generator to compute the airfoil surfaces.
pub trait AirfoilGenerator {
    /// Return a 2D point with the position of the camber line at a fraction from 0.0 to 1.0
    fn camber_line(&self, x: f64) -> Point2<f64>;

    /// Return the full thickness of the airfoil with respect to the camber line at a fraction from
    /// 0.0 to 1.0
    fn thickness(&self, x: f64) -> f64;

    /// Upper and lower surface points offset by half the thickness along the camber line normal
    fn station_at(&self, x: f64) -> CamberStation {
        let x0 = (x - EPSILON).max(0.0);
        let x1 = (x + EPSILON).min(1.0);

        let clx = self.camber_line(x);
        let tangent = (self.camber_line(x1) - self.camber_line(x0)).normalize();
        let normal = Vector2::new(-tangent.y, tangent.x);
        let half = self.thickness(x) / 2.0;

        CamberStation::new(clx, clx + normal * half, clx - normal * half)
    }

    /// Samples both surfaces at `n` cosine spaced stations, which cluster points at the leading
    /// and trailing edges where curvature is highest. The lower surface skips the leading edge
    /// station, so it has `n - 1` points.
    fn surfaces(&self, n: usize) -> Result<SurfacePair> {
        if n < 2 {
            return Err(FoilError::InvalidConfig(format!(
                "at least 2 stations are needed to sample a surface, got {}",
                n
            )));
        }

        let stations: Vec<CamberStation> = (0..n)
            .map(|i| {
                let beta = PI * i as f64 / (n - 1) as f64;
                self.station_at((1.0 - beta.cos()) / 2.0)
            })
            .collect();

        Ok(SurfacePair::from_stations(&stations))
    }
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
#[derive(Debug, Clone, Copy)]
pub struct Naca4Digit {
    t: f64,
    chord_len: f64,
    m: f64,
    p: f64,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator.
    ///
    /// # Arguments
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// * `chord_len` - the actual length of the airfoil chord
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4
    pub fn new(t_max: f64, chord_len: f64, max_camber: f64, max_camber_chord: f64) -> Naca4Digit {
        Naca4Digit {
            t: t_max,
            chord_len,
            m: max_camber,
            p: max_camber_chord,
        }
    }

    /// Build a unit chord generator from a designation such as "2412" or "NACA 0012"
    pub fn from_designation(code: &str) -> Result<Naca4Digit> {
        let digits: Vec<u32> = code
            .trim()
            .trim_start_matches("NACA")
            .trim()
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .filter(|d| d.len() == 4)
            .ok_or_else(|| {
                FoilError::InvalidConfig(format!("'{}' is not a NACA 4-digit designation", code))
            })?;

        Ok(Naca4Digit::new(
            (digits[2] * 10 + digits[3]) as f64 / 100.0,
            1.0,
            digits[0] as f64 / 100.0,
            digits[1] as f64 / 10.0,
        ))
    }

    pub fn designation(&self) -> String {
        format!(
            "NACA {}{}{:02}",
            (self.m * 100.0).round(),
            (self.p * 10.0).round(),
            (self.t * 100.0).round()
        )
    }
}

impl AirfoilGenerator for Naca4Digit {
    fn camber_line(&self, x: f64) -> Point2<f64> {
        let y = if self.p < 1e-6 {
            0.0
        } else if x < self.p {
            (self.m / self.p.powf(2.0)) * (2.0 * self.p * x - x.powf(2.0))
        } else {
            (self.m / (1.0 - self.p).powf(2.0))
                * ((1.0 - 2.0 * self.p) + 2.0 * self.p * x - x.powf(2.0))
        };

        Point2::new(x * self.chord_len, y * self.chord_len)
    }

    fn thickness(&self, x: f64) -> f64 {
        (2.0 * self.t * self.chord_len)
            * (1.485 * x.sqrt()
                + -0.630 * x
                + -1.758 * x.powf(2.0)
                + 1.4215 * x.powf(3.0)
                + -0.5075 * x.powf(4.0))
    }
}
