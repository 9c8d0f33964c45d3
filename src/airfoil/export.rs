use super::BezierFoil;
use crate::errors::Result;
use ncollide2d::na::Point2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Both sampled surfaces joined into a single loop in Selig order: the upper surface from the
/// trailing edge to the leading edge, then the lower surface back to the trailing edge.
pub fn outer_contour(foil: &BezierFoil, points_per_segment: usize) -> Vec<Point2<f64>> {
    let mut result = foil.upper_curve(points_per_segment);
    result.reverse();
    result.append(&mut foil.lower_curve(points_per_segment));
    result
}

/// Write a name line followed by one `x y` pair per line
pub fn write_points<W: Write>(mut writer: W, name: &str, points: &[Point2<f64>]) -> Result<()> {
    writeln!(writer, "{}", name)?;
    for p in points.iter() {
        writeln!(writer, "{:12.8} {:12.8}", p.x, p.y)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the outer contour of the foil as a Selig coordinate file
pub fn write_dat(
    path: impl AsRef<Path>,
    foil: &BezierFoil,
    points_per_segment: usize,
) -> Result<()> {
    let file = File::create(path)?;
    write_points(
        BufWriter::new(file),
        foil.name(),
        &outer_contour(foil, points_per_segment),
    )
}
