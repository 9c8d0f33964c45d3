//! Nelder-Mead simplex algorithm for derivative-free minimization.

#![allow(clippy::needless_range_loop)]

use super::{empty_guess, MinimizeOptions, MinimizeResult, Minimizer};
use crate::errors::Result;

const ZERO_THRESHOLD: f64 = 1e-12;

/// Nelder-Mead simplex search.
///
/// With `adaptive` set the reflection, expansion, contraction and shrink coefficients are scaled
/// with the problem dimension (Gao & Han, 2012).
///
/// After a converged run the search is restarted from the best vertex with a fresh simplex, up
/// to `restarts` times, for as long as a restart keeps lowering the objective. A restart which
/// runs out of iterations does not undo the convergence of the run before it.
#[derive(Debug, Clone, Copy)]
pub struct NelderMead {
    pub adaptive: bool,
    pub restarts: usize,
}

impl Default for NelderMead {
    fn default() -> Self {
        NelderMead {
            adaptive: true,
            restarts: 3,
        }
    }
}

struct Coefficients {
    alpha: f64,
    gamma: f64,
    rho: f64,
    sigma: f64,
}

impl Coefficients {
    fn for_dimension(n: usize, adaptive: bool) -> Self {
        if adaptive {
            let nf = n.max(2) as f64;
            Coefficients {
                alpha: 1.0,
                gamma: 1.0 + 2.0 / nf,
                rho: 0.75 - 1.0 / (2.0 * nf),
                sigma: 1.0 - 1.0 / nf,
            }
        } else {
            Coefficients {
                alpha: 1.0,
                gamma: 2.0,
                rho: 0.5,
                sigma: 0.5,
            }
        }
    }
}

impl Minimizer for NelderMead {
    fn minimize(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        x0: &[f64],
        options: &MinimizeOptions,
    ) -> Result<MinimizeResult> {
        if x0.is_empty() {
            return Err(empty_guess("nelder_mead"));
        }

        let mut result = self.run(f, x0, options, options.max_iter);
        let mut restarts = 0;

        while result.converged && restarts < self.restarts {
            let remaining = options.max_iter.saturating_sub(result.iterations);
            if remaining == 0 {
                break;
            }

            let next = self.run(f, &result.x, options, remaining);
            let improvement = result.fun - next.fun;
            result = MinimizeResult {
                iterations: result.iterations + next.iterations,
                nfev: result.nfev + next.nfev,
                converged: true,
                ..if next.fun <= result.fun { next } else { result }
            };
            restarts += 1;

            if improvement <= options.f_tol {
                break;
            }
        }

        Ok(result)
    }
}

impl NelderMead {
    fn run(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        x0: &[f64],
        options: &MinimizeOptions,
        max_iter: usize,
    ) -> MinimizeResult {
        let n = x0.len();
        let c = Coefficients::for_dimension(n, self.adaptive);

        // Initialize simplex with n+1 vertices, perturbing each dimension in turn
        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        simplex.push(x0.to_vec());
        for i in 0..n {
            let mut vertex = x0.to_vec();
            let delta = if x0[i].abs() < ZERO_THRESHOLD {
                0.00025
            } else {
                0.05 * x0[i].abs()
            };
            vertex[i] += delta;
            simplex.push(vertex);
        }

        let mut f_values: Vec<f64> = simplex.iter().map(|v| f(v)).collect();
        let mut nfev = n + 1;

        for iter in 0..max_iter {
            order_simplex(&mut simplex, &mut f_values);

            let f_range = (f_values[n] - f_values[0]).abs();
            let mut max_dist = 0.0_f64;
            for i in 1..=n {
                let d: f64 = simplex[0]
                    .iter()
                    .zip(simplex[i].iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                max_dist = max_dist.max(d);
            }

            if f_range < options.f_tol && max_dist < options.x_tol {
                return MinimizeResult {
                    x: simplex[0].clone(),
                    fun: f_values[0],
                    iterations: iter + 1,
                    nfev,
                    converged: true,
                };
            }

            // Centroid of all vertices except the worst
            let mut centroid = vec![0.0; n];
            for i in 0..n {
                for j in 0..n {
                    centroid[j] += simplex[i][j];
                }
            }
            for j in 0..n {
                centroid[j] /= n as f64;
            }

            let along = |scale: f64, from: &[f64]| -> Vec<f64> {
                (0..n)
                    .map(|j| centroid[j] + scale * (from[j] - centroid[j]))
                    .collect()
            };

            let x_r = along(-c.alpha, &simplex[n]);
            let f_r = f(&x_r);
            nfev += 1;

            if f_r < f_values[0] {
                let x_e = along(c.gamma, &x_r);
                let f_e = f(&x_e);
                nfev += 1;

                if f_e < f_r {
                    simplex[n] = x_e;
                    f_values[n] = f_e;
                } else {
                    simplex[n] = x_r;
                    f_values[n] = f_r;
                }
            } else if f_r < f_values[n - 1] {
                simplex[n] = x_r;
                f_values[n] = f_r;
            } else {
                // Outside contraction when the reflection beat the worst vertex, inside otherwise
                let x_c = if f_r < f_values[n] {
                    along(c.rho, &x_r)
                } else {
                    along(c.rho, &simplex[n])
                };
                let f_c = f(&x_c);
                nfev += 1;

                if f_c < f_values[n].min(f_r) {
                    simplex[n] = x_c;
                    f_values[n] = f_c;
                } else {
                    for i in 1..=n {
                        for j in 0..n {
                            simplex[i][j] =
                                simplex[0][j] + c.sigma * (simplex[i][j] - simplex[0][j]);
                        }
                        f_values[i] = f(&simplex[i]);
                        nfev += 1;
                    }
                }
            }
        }

        order_simplex(&mut simplex, &mut f_values);
        MinimizeResult {
            x: simplex[0].clone(),
            fun: f_values[0],
            iterations: max_iter,
            nfev,
            converged: false,
        }
    }
}

/// Sorts the vertices from best to worst objective value
fn order_simplex(simplex: &mut Vec<Vec<f64>>, f_values: &mut Vec<f64>) {
    let mut indices: Vec<usize> = (0..f_values.len()).collect();
    indices.sort_by(|&a, &b| f_values[a].total_cmp(&f_values[b]));

    *simplex = indices.iter().map(|&i| simplex[i].clone()).collect();
    *f_values = indices.iter().map(|&i| f_values[i]).collect();
}
