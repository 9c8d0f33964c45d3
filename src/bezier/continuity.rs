//! Repair of segment boundaries after independent per-segment fits.
//!
//! Every step takes the tensor by value, rewrites boundary control points, and hands it back.
//! Boundaries are processed in order because each one reads control points the previous one
//! may have just written. P0 of the first segment and P3 of the last are never modified.

use super::tensor::ControlTensor;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

/// Continuity level enforced between consecutive segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Continuity {
    /// Shared end points only
    #[serde(alias = "C0")]
    C0,

    /// Shared end points and matched tangents
    #[default]
    #[serde(alias = "C1")]
    C1,

    /// Shared end points, with P1 of the next segment placed by `enforce_c2` instead of the
    /// tangent match. This is a fixed rewrite of P1 only, not a full second derivative match.
    #[serde(alias = "C2")]
    C2,
}

/// P0 of segment i+1 takes the value of P3 of segment i
pub fn enforce_c0(mut tensor: ControlTensor) -> ControlTensor {
    for i in 0..tensor.segments().saturating_sub(1) {
        let end = tensor.point(3, i);
        tensor.set_point(0, i + 1, end);
    }
    tensor
}

/// P1 of segment i+1 is placed at P0 of segment i+1 plus the outgoing tangent P3 - P2 of
/// segment i. Expects C0 to hold already.
pub fn enforce_c1(mut tensor: ControlTensor) -> ControlTensor {
    for i in 0..tensor.segments().saturating_sub(1) {
        let tangent = tensor.point(3, i) - tensor.point(2, i);
        let start = tensor.point(0, i + 1);
        tensor.set_point(1, i + 1, start + tangent);
    }
    tensor
}

/// P1 of segment i+1 := 2 * P0(i+1) - P2(i) - (P3(i) - P0(i+1)). Expects C0 to hold already and
/// overwrites whatever `enforce_c1` placed in P1.
pub fn enforce_c2(mut tensor: ControlTensor) -> ControlTensor {
    for i in 0..tensor.segments().saturating_sub(1) {
        let p_prev = tensor.point(2, i);
        let p_end = tensor.point(3, i);
        let p_next = tensor.point(0, i + 1);

        let p1 = p_next.coords * 2.0 - p_prev.coords - (p_end - p_next);
        tensor.set_point(1, i + 1, Point2::from(p1));
    }
    tensor
}

/// Runs C0, then C1, then C2 when requested
pub fn enforce(tensor: ControlTensor, level: Continuity) -> ControlTensor {
    let tensor = enforce_c0(tensor);
    match level {
        Continuity::C0 => tensor,
        Continuity::C1 => enforce_c1(tensor),
        Continuity::C2 => enforce_c2(enforce_c1(tensor)),
    }
}
