//! Stabilized bi-conjugate gradient (van der Vorst, 1992).

use super::{dot, norm, relative_residual, GaussSeidel, SolveReport, Solver, SolverOptions};
use crate::system::SparseMatrix;

/// Scalars below this fraction of `|b|^2` count as breakdown.
const BREAKDOWN: f64 = 1e-30;

/// BiCGSTAB with Gauss-Seidel fallback.
///
/// When one of the recurrence denominators collapses the Krylov iteration
/// cannot continue. The current iterate is then handed to [`GaussSeidel`]
/// for whatever is left of the iteration budget, so a breakdown costs speed
/// but never correctness.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiCgStab;

impl Solver for BiCgStab {
    fn solve(
        &self,
        matrix: &SparseMatrix,
        rhs: &[f64],
        options: &SolverOptions,
    ) -> (Vec<f64>, SolveReport) {
        let n = matrix.dim();
        let mut x = vec![0.0; n];
        let rhs_norm = norm(rhs);
        if rhs_norm == 0.0 {
            return (x, SolveReport::trivial());
        }
        let eps = BREAKDOWN * rhs_norm * rhs_norm;

        let mut r = rhs.to_vec();
        let r_hat = r.clone();
        let mut p = vec![0.0; n];
        let mut v = vec![0.0; n];
        let mut s = vec![0.0; n];
        let mut t = vec![0.0; n];
        let (mut rho, mut alpha, mut omega) = (1.0, 1.0, 1.0);

        for k in 1..=options.max_iterations {
            let rho_next = dot(&r_hat, &r);
            if !rho_next.is_finite() || rho_next.abs() < eps {
                return fallback(matrix, rhs, x, rhs_norm, k - 1, options);
            }

            if k == 1 {
                p.copy_from_slice(&r);
            } else {
                let beta = (rho_next / rho) * (alpha / omega);
                for j in 0..n {
                    p[j] = r[j] + beta * (p[j] - omega * v[j]);
                }
            }
            rho = rho_next;

            matrix.mul_vec_into(&p, &mut v);
            let denom = dot(&r_hat, &v);
            if !denom.is_finite() || denom.abs() < eps {
                return fallback(matrix, rhs, x, rhs_norm, k - 1, options);
            }
            alpha = rho / denom;

            for j in 0..n {
                s[j] = r[j] - alpha * v[j];
            }
            if norm(&s) / rhs_norm < options.tolerance {
                for j in 0..n {
                    x[j] += alpha * p[j];
                }
                return finish(matrix, rhs, x, rhs_norm, k, options);
            }

            matrix.mul_vec_into(&s, &mut t);
            let tt = dot(&t, &t);
            if !tt.is_finite() || tt < eps {
                for j in 0..n {
                    x[j] += alpha * p[j];
                }
                return fallback(matrix, rhs, x, rhs_norm, k, options);
            }
            omega = dot(&t, &s) / tt;

            for j in 0..n {
                x[j] += alpha * p[j] + omega * s[j];
                r[j] = s[j] - omega * t[j];
            }
            if norm(&r) / rhs_norm < options.tolerance {
                return finish(matrix, rhs, x, rhs_norm, k, options);
            }
            if omega.abs() < BREAKDOWN {
                return fallback(matrix, rhs, x, rhs_norm, k, options);
            }
        }

        finish(matrix, rhs, x, rhs_norm, options.max_iterations, options)
    }
}

/// Report against the true residual, which can drift from the recurrence.
fn finish(
    matrix: &SparseMatrix,
    rhs: &[f64],
    x: Vec<f64>,
    rhs_norm: f64,
    iterations: usize,
    options: &SolverOptions,
) -> (Vec<f64>, SolveReport) {
    let residual = relative_residual(matrix, rhs, &x, rhs_norm);
    let converged = residual < options.tolerance;
    (
        x,
        SolveReport {
            iterations,
            residual,
            converged,
        },
    )
}

fn fallback(
    matrix: &SparseMatrix,
    rhs: &[f64],
    mut x: Vec<f64>,
    rhs_norm: f64,
    used: usize,
    options: &SolverOptions,
) -> (Vec<f64>, SolveReport) {
    let budget = options.max_iterations.saturating_sub(used);
    tracing::debug!(
        after = used,
        remaining = budget,
        "BiCGSTAB breakdown, continuing with Gauss-Seidel"
    );
    let report = GaussSeidel::refine(matrix, rhs, &mut x, rhs_norm, budget, options.tolerance);
    (
        x,
        SolveReport {
            iterations: used + report.iterations,
            ..report
        },
    )
}
