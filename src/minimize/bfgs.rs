//! BFGS quasi-Newton method for minimization.

#![allow(clippy::needless_range_loop)]

use super::{empty_guess, norm, MinimizeOptions, MinimizeResult, Minimizer};
use crate::errors::Result;

const SINGULAR_THRESHOLD: f64 = 1e-12;

/// BFGS with an inverse Hessian approximation and a backtracking Armijo line search. Gradients
/// are forward finite differences with step `MinimizeOptions::eps`.
///
/// A line search that cannot find any descent along the current direction ends the run. The run
/// counts as converged only if the decrease predicted along that direction is already below
/// `f_tol`; otherwise the stalled point is reported as not converged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfgs;

impl Minimizer for Bfgs {
    fn minimize(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        x0: &[f64],
        options: &MinimizeOptions,
    ) -> Result<MinimizeResult> {
        let n = x0.len();
        if n == 0 {
            return Err(empty_guess("bfgs"));
        }

        let mut x = x0.to_vec();
        let mut fx = f(&x);
        let mut nfev = 1;

        let mut grad = forward_gradient(f, &x, fx, options.eps);
        nfev += n;

        let mut h_inv: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut row = vec![0.0; n];
                row[i] = 1.0;
                row
            })
            .collect();

        for iter in 0..options.max_iter {
            if norm(&grad) < options.g_tol {
                return Ok(MinimizeResult {
                    x,
                    fun: fx,
                    iterations: iter + 1,
                    nfev,
                    converged: true,
                });
            }

            // p = -H_inv * grad
            let mut p = vec![0.0; n];
            for i in 0..n {
                for j in 0..n {
                    p[i] -= h_inv[i][j] * grad[j];
                }
            }

            let slope: f64 = grad.iter().zip(p.iter()).map(|(g, d)| g * d).sum();
            let search = backtracking_line_search(f, &x, &p, fx, slope);
            nfev += search.evaluations;

            let Some((x_new, fx_new)) = search.found else {
                return Ok(MinimizeResult {
                    x,
                    fun: fx,
                    iterations: iter + 1,
                    nfev,
                    converged: slope.abs() < options.f_tol,
                });
            };

            let s: Vec<f64> = x_new.iter().zip(x.iter()).map(|(a, b)| a - b).collect();
            if norm(&s) < options.x_tol || (fx - fx_new).abs() < options.f_tol {
                return Ok(MinimizeResult {
                    x: x_new,
                    fun: fx_new,
                    iterations: iter + 1,
                    nfev,
                    converged: true,
                });
            }

            let grad_new = forward_gradient(f, &x_new, fx_new, options.eps);
            nfev += n;

            let y: Vec<f64> = grad_new
                .iter()
                .zip(grad.iter())
                .map(|(a, b)| a - b)
                .collect();

            // H_new = (I - rho*s*y^T) * H * (I - rho*y*s^T) + rho*s*s^T, skipped when the
            // curvature condition fails so H stays positive definite
            let ys: f64 = y.iter().zip(s.iter()).map(|(a, b)| a * b).sum();
            if ys > SINGULAR_THRESHOLD {
                let rho = 1.0 / ys;

                let mut h_y = vec![0.0; n];
                for i in 0..n {
                    for j in 0..n {
                        h_y[i] += h_inv[i][j] * y[j];
                    }
                }
                let yhy: f64 = y.iter().zip(h_y.iter()).map(|(a, b)| a * b).sum();

                for i in 0..n {
                    for j in 0..n {
                        h_inv[i][j] += rho * (1.0 + rho * yhy) * s[i] * s[j]
                            - rho * (s[i] * h_y[j] + h_y[i] * s[j]);
                    }
                }
            }

            x = x_new;
            fx = fx_new;
            grad = grad_new;
        }

        Ok(MinimizeResult {
            x,
            fun: fx,
            iterations: options.max_iter,
            nfev,
            converged: false,
        })
    }
}

fn forward_gradient(f: &dyn Fn(&[f64]) -> f64, x: &[f64], fx: f64, eps: f64) -> Vec<f64> {
    let mut probe = x.to_vec();
    (0..x.len())
        .map(|i| {
            let step = eps * x[i].abs().max(1.0);
            probe[i] = x[i] + step;
            let g = (f(&probe) - fx) / step;
            probe[i] = x[i];
            g
        })
        .collect()
}

struct LineSearch {
    found: Option<(Vec<f64>, f64)>,
    evaluations: usize,
}

/// Backtracking line search with the Armijo condition. `slope` is the directional derivative
/// of f along `p` at `x`.
fn backtracking_line_search(
    f: &dyn Fn(&[f64]) -> f64,
    x: &[f64],
    p: &[f64],
    fx: f64,
    slope: f64,
) -> LineSearch {
    let c = 0.0001;
    let shrink = 0.5;

    let mut alpha = 1.0;
    let mut evaluations = 0;

    for _ in 0..50 {
        let x_new: Vec<f64> = x.iter().zip(p.iter()).map(|(a, d)| a + alpha * d).collect();
        let fx_new = f(&x_new);
        evaluations += 1;

        if fx_new <= fx + c * alpha * slope {
            return LineSearch {
                found: Some((x_new, fx_new)),
                evaluations,
            };
        }

        alpha *= shrink;
    }

    LineSearch {
        found: None,
        evaluations,
    }
}
