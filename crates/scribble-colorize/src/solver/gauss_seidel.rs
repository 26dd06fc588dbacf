use super::{norm, relative_residual, SolveReport, Solver, SolverOptions};
use crate::system::SparseMatrix;

/// Forward Gauss-Seidel iteration.
///
/// Each sweep updates `x[i]` in raster order using the newest values of the
/// pixels before it, so a mark's color travels the whole scanline in one
/// sweep but only one row upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSeidel;

impl GaussSeidel {
    /// Sweep `x` in place until the relative residual drops below
    /// `tolerance` or `max_sweeps` is reached.
    pub(crate) fn refine(
        matrix: &SparseMatrix,
        rhs: &[f64],
        x: &mut [f64],
        rhs_norm: f64,
        max_sweeps: usize,
        tolerance: f64,
    ) -> SolveReport {
        let mut residual = relative_residual(matrix, rhs, x, rhs_norm);
        if residual < tolerance {
            return SolveReport {
                iterations: 0,
                residual,
                converged: true,
            };
        }

        for sweep in 1..=max_sweeps {
            for i in 0..matrix.dim() {
                let (cols, vals) = matrix.row(i);
                let mut acc = rhs[i];
                let mut diag = 0.0;
                for (&c, &v) in cols.iter().zip(vals) {
                    if c == i {
                        diag = v;
                    } else {
                        acc -= v * x[c];
                    }
                }
                if diag != 0.0 {
                    x[i] = acc / diag;
                }
            }

            residual = relative_residual(matrix, rhs, x, rhs_norm);
            if residual < tolerance {
                return SolveReport {
                    iterations: sweep,
                    residual,
                    converged: true,
                };
            }
        }

        SolveReport {
            iterations: max_sweeps,
            residual,
            converged: false,
        }
    }
}

impl Solver for GaussSeidel {
    fn solve(
        &self,
        matrix: &SparseMatrix,
        rhs: &[f64],
        options: &SolverOptions,
    ) -> (Vec<f64>, SolveReport) {
        let mut x = vec![0.0; matrix.dim()];
        let rhs_norm = norm(rhs);
        if rhs_norm == 0.0 {
            return (x, SolveReport::trivial());
        }
        let report = Self::refine(
            matrix,
            rhs,
            &mut x,
            rhs_norm,
            options.max_iterations,
            options.tolerance,
        );
        (x, report)
    }
}
