use ncollide2d::na::DMatrix;

/// Characteristic matrix of the cubic Bézier, mapping the Bernstein form onto the power basis
/// `[1, t, t², t³]`. Row i holds the coefficients of t^i.
pub const BEZIER_MATRIX: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [3.0, -6.0, 3.0, 0.0],
    [-1.0, 3.0, -3.0, 1.0],
];

/// The characteristic matrix as a dynamically sized matrix, for use with the checked evaluator
pub fn bezier_matrix() -> DMatrix<f64> {
    DMatrix::from_fn(4, 4, |r, c| BEZIER_MATRIX[r][c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_column_sums_select_end_point() {
        // At t = 1 the power vector is all ones, so only P3 may survive
        let m = bezier_matrix();
        let column_sums: Vec<f64> = (0..4).map(|c| m.column(c).sum()).collect();
        assert_relative_eq!(0.0, column_sums[0], epsilon = 1e-12);
        assert_relative_eq!(0.0, column_sums[1], epsilon = 1e-12);
        assert_relative_eq!(0.0, column_sums[2], epsilon = 1e-12);
        assert_relative_eq!(1.0, column_sums[3], epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_layout() {
        let m = bezier_matrix();
        assert_eq!((4, 4), m.shape());
        assert_eq!(-6.0, m[(2, 1)]);
        assert_eq!(-3.0, m[(3, 2)]);
    }
}
