pub mod airfoil;
pub mod algorithms;
pub mod bezier;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod minimize;
mod serialize;

pub use config::FitConfig;
pub use errors::{FoilError, Result};
