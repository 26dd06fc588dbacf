//! Iterative sparse solvers for the chrominance systems.
//!
//! Two methods are available via [`SolverKind`]:
//!
//! - [`BiCgStab`] (default): stabilized bi-conjugate gradient. The system is
//!   not symmetric (row `p` weights are normalized per pixel), which rules out
//!   plain conjugate gradient.
//! - [`GaussSeidel`]: forward sweeps. Slower, but converges for any strictly
//!   or irreducibly diagonally dominant matrix, which this one is once every
//!   unreachable pixel has been pinned.
//!
//! Both stop when the relative residual `|b - Ax| / |b|` drops below the
//! tolerance or when the iteration budget runs out. Running out is not an
//! error: the report says `converged: false` and the caller decides.

mod bicgstab;
mod gauss_seidel;

pub use bicgstab::BiCgStab;
pub use gauss_seidel::GaussSeidel;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::api::ColorizeError;
use crate::system::{LinearSystem, SparseMatrix};

/// Default relative residual at which iteration stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration budget per channel.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

/// Vectors shorter than this use sequential reductions.
const PARALLEL_MIN_LEN: usize = 4096;

/// A method for solving `A x = b`.
pub trait Solver: Send + Sync {
    /// Solve starting from `x = 0`.
    ///
    /// A zero right-hand side yields the zero vector after zero iterations.
    fn solve(
        &self,
        matrix: &SparseMatrix,
        rhs: &[f64],
        options: &SolverOptions,
    ) -> (Vec<f64>, SolveReport);
}

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// Stabilized bi-conjugate gradient with Gauss-Seidel fallback.
    #[default]
    BiCgStab,
    /// Plain forward Gauss-Seidel sweeps.
    GaussSeidel,
}

impl SolverKind {
    /// The solver implementing this kind.
    pub fn solver(self) -> &'static dyn Solver {
        match self {
            SolverKind::BiCgStab => &BiCgStab,
            SolverKind::GaussSeidel => &GaussSeidel,
        }
    }

    /// Config and CLI name.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverKind::BiCgStab => "bicgstab",
            SolverKind::GaussSeidel => "gauss-seidel",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = ColorizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bicgstab" => Ok(SolverKind::BiCgStab),
            "gauss-seidel" | "gauss_seidel" | "gaussseidel" => Ok(SolverKind::GaussSeidel),
            other => Err(ColorizeError::InvalidOptions(format!(
                "unknown solver '{other}' (expected bicgstab or gauss-seidel)"
            ))),
        }
    }
}

/// Solver selection and stopping criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub kind: SolverKind,
    /// Relative residual `|b - Ax| / |b|` at which to stop.
    pub tolerance: f64,
    /// Iteration cap. Each BiCGSTAB step or Gauss-Seidel sweep counts once.
    pub max_iterations: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn kind(mut self, kind: SolverKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Outcome of one channel's solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,
    /// Final relative residual.
    pub residual: f64,
    pub converged: bool,
}

impl SolveReport {
    /// Report for a zero right-hand side.
    pub(crate) fn trivial() -> Self {
        Self {
            iterations: 0,
            residual: 0.0,
            converged: true,
        }
    }
}

/// Solved chrominance planes, one report per channel.
#[derive(Debug, Clone)]
pub struct Solution {
    pub i: Vec<f64>,
    pub q: Vec<f64>,
    pub i_report: SolveReport,
    pub q_report: SolveReport,
}

impl Solution {
    /// True when both channels met the tolerance.
    pub fn converged(&self) -> bool {
        self.i_report.converged && self.q_report.converged
    }

    /// Larger of the two channels' iteration counts.
    pub fn iterations(&self) -> usize {
        self.i_report.iterations.max(self.q_report.iterations)
    }
}

/// Solve both chrominance channels concurrently.
pub fn solve_system(system: &LinearSystem, options: &SolverOptions) -> Solution {
    let solver = options.kind.solver();
    let ((i, i_report), (q, q_report)) = rayon::join(
        || solver.solve(&system.matrix, &system.rhs_i, options),
        || solver.solve(&system.matrix, &system.rhs_q, options),
    );

    for (channel, report) in [("i", &i_report), ("q", &q_report)] {
        if report.converged {
            tracing::debug!(
                channel,
                solver = %options.kind,
                iterations = report.iterations,
                residual = report.residual,
                "Channel converged"
            );
        } else {
            tracing::warn!(
                channel,
                solver = %options.kind,
                iterations = report.iterations,
                residual = report.residual,
                tolerance = options.tolerance,
                "Solver did not converge, result is degraded"
            );
        }
    }

    Solution {
        i,
        q,
        i_report,
        q_report,
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.len() < PARALLEL_MIN_LEN {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    } else {
        a.par_iter().zip(b.par_iter()).map(|(x, y)| x * y).sum()
    }
}

pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// `|b - Ax| / |b|` for a non-zero `b` of norm `rhs_norm`.
pub(crate) fn relative_residual(
    matrix: &SparseMatrix,
    rhs: &[f64],
    x: &[f64],
    rhs_norm: f64,
) -> f64 {
    let ax = matrix.mul_vec(x);
    let r: f64 = ax
        .iter()
        .zip(rhs)
        .map(|(a, b)| (b - a) * (b - a))
        .sum::<f64>()
        .sqrt();
    r / rhs_norm
}
