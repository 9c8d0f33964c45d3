use thiserror::Error;

pub type Result<T> = std::result::Result<T, FoilError>;

#[derive(Debug, Error)]
pub enum FoilError {
    /// The characteristic matrix and the control points do not describe a cubic segment
    #[error("shape mismatch: {rows}x{cols} matrix with {points} control points (cubic needs 4x4 and 4)")]
    Shape {
        rows: usize,
        cols: usize,
        points: usize,
    },

    /// The minimizer did not converge for a segment, including all retries
    #[error("fit of segment {segment} failed to converge after {attempts} attempts (residual {residual:e})")]
    FitFailure {
        segment: usize,
        attempts: usize,
        residual: f64,
    },

    /// A segment window does not have enough distinct points to seed the fit
    #[error("segment {segment} has {distinct} distinct points, at least 4 are required")]
    DegenerateSegment { segment: usize, distinct: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid control tensor: expected {expected} values, got {actual}")]
    InvalidTensor { expected: usize, actual: usize },

    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FoilError {
    /// Attaches a segment index to errors that carry one, leaving other errors unchanged
    pub fn at_segment(self, index: usize) -> FoilError {
        match self {
            FoilError::FitFailure {
                attempts, residual, ..
            } => FoilError::FitFailure {
                segment: index,
                attempts,
                residual,
            },
            FoilError::DegenerateSegment { distinct, .. } => FoilError::DegenerateSegment {
                segment: index,
                distinct,
            },
            other => other,
        }
    }
}
