//! Reading of aerofoil coordinate files in the Selig and Lednicer layouts.
//!
//! Selig files hold a name line followed by a single loop of points running from the trailing
//! edge over the upper surface to the leading edge and back along the lower surface. Lednicer
//! files hold a name line, a line with the point count of each surface, a blank line, then the
//! upper surface and the lower surface each listed from the leading edge to the trailing edge.

use super::SurfacePair;
use crate::algorithms::DISTINCT_TOL;
use crate::errors::{FoilError, Result};
use crate::geometry::distances2::dist;
use ncollide2d::na::Point2;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatFormat {
    Selig,
    Lednicer,
}

/// Contents of a coordinate file, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct DatFile {
    pub name: String,
    pub format: DatFormat,
    pub coords: Vec<Point2<f64>>,
}

/// A file is Lednicer when its third line is blank, Selig otherwise
pub fn detect_format(text: &str) -> DatFormat {
    match text.lines().nth(2) {
        Some(line) if line.trim().is_empty() => DatFormat::Lednicer,
        _ => DatFormat::Selig,
    }
}

fn parse_pair(line: &str) -> Option<Point2<f64>> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse::<f64>().ok()?;
    let y = tokens.next()?.parse::<f64>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(Point2::new(x, y))
}

/// Parse the text of a coordinate file. Lines which are not a pair of numbers are skipped, and
/// the header lines of a Lednicer file are never read as coordinates.
pub fn parse_dat(text: &str) -> Result<DatFile> {
    let name = match text.lines().next() {
        Some(line) if !line.trim().is_empty() => line.trim().to_string(),
        _ => {
            return Err(FoilError::Parse {
                line: 1,
                reason: "missing name line".to_string(),
            })
        }
    };

    let format = detect_format(text);
    let skip = match format {
        DatFormat::Selig => 1,
        DatFormat::Lednicer => 3,
    };

    let coords: Vec<Point2<f64>> = text.lines().skip(skip).filter_map(parse_pair).collect();
    if coords.is_empty() {
        return Err(FoilError::Parse {
            line: text.lines().count(),
            reason: format!("no coordinate pairs found in '{}'", name),
        });
    }

    Ok(DatFile {
        name,
        format,
        coords,
    })
}

fn first_extreme<F: Fn(f64, f64) -> bool>(points: &[Point2<f64>], better: F) -> usize {
    let mut index = 0;
    for (i, p) in points.iter().enumerate() {
        if better(p.x, points[index].x) {
            index = i;
        }
    }
    index
}

/// Divide the coordinates into upper and lower surfaces, both ordered from the leading edge to
/// the trailing edge with the leading edge point kept in the upper surface only.
pub fn split_surfaces(file: &DatFile) -> Result<SurfacePair> {
    let coords = &file.coords;
    let (upper, lower) = match file.format {
        DatFormat::Selig => {
            let le = first_extreme(coords, |a, b| a < b);
            let mut upper = coords[..=le].to_vec();
            upper.reverse();
            (upper, coords[le + 1..].to_vec())
        }
        DatFormat::Lednicer => {
            let te = first_extreme(coords, |a, b| a > b);
            let mut lower = &coords[te + 1..];

            // Both Lednicer surfaces list the leading edge, the upper one keeps it
            if let Some(first) = lower.first() {
                if dist(first, &coords[0]) <= DISTINCT_TOL {
                    lower = &lower[1..];
                }
            }
            (coords[..=te].to_vec(), lower.to_vec())
        }
    };

    if upper.is_empty() || lower.is_empty() {
        return Err(FoilError::Parse {
            line: 0,
            reason: format!("'{}' does not contain two surfaces", file.name),
        });
    }

    Ok(SurfacePair::new(upper, lower))
}

/// Read and split a coordinate file from disk
pub fn read_dat(path: impl AsRef<Path>) -> Result<(String, SurfacePair)> {
    let text = std::fs::read_to_string(path)?;
    let file = parse_dat(&text)?;
    let surfaces = split_surfaces(&file)?;
    Ok((file.name, surfaces))
}
