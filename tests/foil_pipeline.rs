use approx::assert_relative_eq;
use bezierfoil_rs::airfoil::analyze::{enclosed_area, surface_deviation};
use bezierfoil_rs::airfoil::export::{outer_contour, write_dat, write_points};
use bezierfoil_rs::airfoil::generate::{AirfoilGenerator, Naca4Digit};
use bezierfoil_rs::airfoil::parse::{parse_dat, read_dat, split_surfaces, DatFormat};
use bezierfoil_rs::airfoil::{BezierFoil, SurfacePair};
use bezierfoil_rs::bezier::Continuity;
use bezierfoil_rs::FitConfig;
use std::fmt::Write;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bezierfoil_{}_{}", std::process::id(), name))
}

fn naca(code: &str) -> (String, SurfacePair) {
    let generator = Naca4Digit::from_designation(code).unwrap();
    (generator.designation(), generator.surfaces(61).unwrap())
}

fn lednicer_text(name: &str, pair: &SurfacePair) -> String {
    let mut lower = vec![pair.upper[0]];
    lower.extend_from_slice(&pair.lower);

    let mut text = String::new();
    writeln!(text, "{}", name).unwrap();
    writeln!(text, "{:>8}. {:>8}.", pair.upper.len(), lower.len()).unwrap();
    writeln!(text).unwrap();
    for p in pair.upper.iter() {
        writeln!(text, "{:.8} {:.8}", p.x, p.y).unwrap();
    }
    writeln!(text).unwrap();
    for p in lower.iter() {
        writeln!(text, "{:.8} {:.8}", p.x, p.y).unwrap();
    }
    text
}

#[test]
fn selig_file_round_trip() {
    let (name, pair) = naca("2412");
    let mut buffer: Vec<u8> = Vec::new();
    write_points(&mut buffer, &name, &pair.to_outer_contour()).unwrap();

    let file = parse_dat(&String::from_utf8(buffer).unwrap()).unwrap();
    assert_eq!(DatFormat::Selig, file.format);

    let parsed = split_surfaces(&file).unwrap();
    assert_eq!(pair.upper.len(), parsed.upper.len());
    assert_eq!(pair.lower.len(), parsed.lower.len());
    for (e, r) in pair.upper.iter().zip(parsed.upper.iter()) {
        assert_relative_eq!(e.x, r.x, epsilon = 1e-8);
        assert_relative_eq!(e.y, r.y, epsilon = 1e-8);
    }
}

#[test]
fn lednicer_surfaces_match_generator() {
    let (name, pair) = naca("0012");
    let file = parse_dat(&lednicer_text(&name, &pair)).unwrap();
    assert_eq!(DatFormat::Lednicer, file.format);

    let parsed = split_surfaces(&file).unwrap();
    assert_eq!(pair.upper.len(), parsed.upper.len());
    assert_eq!(pair.lower.len(), parsed.lower.len());
    assert_relative_eq!(0.0, parsed.upper[0].x, epsilon = 1e-8);
    assert!(parsed.lower[0].x > 0.0);
    for (e, r) in pair.lower.iter().zip(parsed.lower.iter()) {
        assert_relative_eq!(e.x, r.x, epsilon = 1e-8);
        assert_relative_eq!(e.y, r.y, epsilon = 1e-8);
    }
}

#[test]
fn fit_close_and_export() {
    let (name, pair) = naca("0012");
    let input = temp_path("naca0012_in.dat");
    let output = temp_path("naca0012_out.dat");

    let mut buffer: Vec<u8> = Vec::new();
    write_points(&mut buffer, &name, &pair.to_outer_contour()).unwrap();
    std::fs::write(&input, buffer).unwrap();

    let config = FitConfig::with_segments(4);
    let mut foil = BezierFoil::from_dat_file(&input, &config).unwrap();
    assert_eq!("NACA 0012", foil.name());
    foil.close_curve();

    let p = 20;
    let contour = outer_contour(&foil, p);
    assert_eq!(2 * 4 * p, contour.len());
    assert!(surface_deviation(&foil.surfaces().upper, &foil.upper_curve(p)) < 2e-2);

    // A NACA 00xx section encloses about 0.685 * t of the unit chord square
    assert_relative_eq!(0.685 * 0.12, enclosed_area(&contour), max_relative = 0.05);

    write_dat(&output, &foil, p).unwrap();
    let (written_name, written) = read_dat(&output).unwrap();
    assert_eq!(name, written_name);
    assert_eq!(8 * p, written.upper.len() + written.lower.len());

    std::fs::remove_file(&input).unwrap();
    std::fs::remove_file(&output).unwrap();
}

#[test]
fn json_config_drives_the_fit() {
    let (name, pair) = naca("4415");
    let config =
        FitConfig::from_json(r#"{"n_segments": 3, "continuity": "C2", "points_per_segment": 12}"#)
            .unwrap();

    let foil = BezierFoil::new(name, pair, &config).unwrap();
    assert_eq!(3, foil.n_segments());
    assert_eq!(36, foil.upper_curve(config.points_per_segment).len());

    let t = foil.lower_control();
    for i in 0..2 {
        let p_prev = t.point(2, i);
        let p_end = t.point(3, i);
        let p_next = t.point(0, i + 1);
        let e = p_next.coords * 2.0 - p_prev.coords - (p_end - p_next);
        assert_relative_eq!(e.x, t.point(1, i + 1).x, epsilon = 1e-12);
        assert_relative_eq!(e.y, t.point(1, i + 1).y, epsilon = 1e-12);
    }
    assert_eq!(Continuity::C2, foil.config().continuity);
}
