//! Cubic Bézier splines: single segment evaluation, per-segment fitting, continuity repair and
//! the `[4, 2, N]` control tensor that ties them together.

pub mod basis;
pub mod continuity;
pub mod cubic;
pub mod fit;
pub mod segment;
pub mod spline;
pub mod tensor;

pub use continuity::{enforce, Continuity};
pub use cubic::{evaluate, evaluate_curve, CubicBezier};
pub use fit::SegmentFitter;
pub use spline::{build_control_tensor, sample};
pub use tensor::ControlTensor;
