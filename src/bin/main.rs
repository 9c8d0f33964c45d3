use bezierfoil_rs::airfoil::analyze::{enclosed_area, is_valid_contour, surface_deviation};
use bezierfoil_rs::airfoil::export::{outer_contour, write_dat};
use bezierfoil_rs::airfoil::generate::{AirfoilGenerator, Naca4Digit};
use bezierfoil_rs::airfoil::BezierFoil;
use bezierfoil_rs::{FitConfig, Result};
use env_logger::{Builder, Logger};
use log::{error, info};
use std::path::PathBuf;

const USAGE: &str = "usage: bezierfoil [input.dat] [output.dat] [config.json]";
const LOG_ENV: &str = "BEZIERFOIL_LOG";

/// Logger for the given filter directives, e.g. `debug` or `bezierfoil_rs::bezier=trace`
fn logger(filters: Option<&str>) -> Logger {
    Builder::new()
        .format_timestamp(None)
        .parse_filters(filters.unwrap_or("info"))
        .build()
}

fn init_logging() {
    let logger = logger(std::env::var(LOG_ENV).ok().as_deref());
    let level = logger.filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = match args.get(2) {
        Some(path) => FitConfig::from_json_file(path)?,
        None => FitConfig::default(),
    };

    let mut foil = match args.first() {
        Some(path) => BezierFoil::from_dat_file(path, &config)?,
        None => {
            let naca = Naca4Digit::from_designation("2412")?;
            BezierFoil::new(naca.designation(), naca.surfaces(81)?, &config)?
        }
    };

    let upper = surface_deviation(
        &foil.surfaces().upper,
        &foil.upper_curve(config.points_per_segment),
    );
    let lower = surface_deviation(
        &foil.surfaces().lower,
        &foil.lower_curve(config.points_per_segment),
    );
    info!("max deviation upper {:.3e}, lower {:.3e}", upper, lower);

    foil.close_curve();
    let p = config.points_per_segment;
    let contour = outer_contour(&foil, p);
    info!(
        "closed contour of {} points, area {:.6}, valid {}",
        contour.len(),
        enclosed_area(&contour),
        is_valid_contour(&contour, foil.n_segments() * p)
    );

    let output = PathBuf::from(args.get(1).map(String::as_str).unwrap_or("foil.dat"));
    write_dat(&output, &foil, p)?;
    let json = output.with_extension("json");
    std::fs::write(&json, foil.to_json()?)?;
    info!("wrote {} and {}", output.display(), json.display());

    Ok(())
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") || args.len() > 3 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
