//! Linear system assembly.
//!
//! Each unmarked pixel contributes the equation
//! `U(p) - sum_q w(p, q) U(q) = 0`, each marked pixel pins `U(p)` to its
//! hint. Both chrominance channels share the matrix and differ only in the
//! right-hand side.
//!
//! Unmarked pixels that cannot reach any mark are pinned like marked pixels,
//! with a zero hint, so the system stays non-singular.

mod reach;
mod sparse;

pub use reach::find_unreachable;
pub use sparse::SparseMatrix;

use rayon::prelude::*;

use crate::affinity::WeightGraph;
use crate::constraint::Constraints;

/// Matrix plus one right-hand side per chrominance channel.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub matrix: SparseMatrix,
    pub rhs_i: Vec<f64>,
    pub rhs_q: Vec<f64>,
    /// Number of unmarked pixels pinned to zero chroma.
    pub unreachable: usize,
}

impl LinearSystem {
    /// Number of unknowns (pixels).
    #[inline]
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }
}

/// Build the sparse system from the constraints and the affinity weights.
pub fn assemble(constraints: &Constraints, graph: &WeightGraph) -> LinearSystem {
    let mask = &constraints.mask;
    debug_assert_eq!(mask.len(), graph.len());

    let unreachable = find_unreachable(mask, graph);
    let unreachable_count = unreachable.iter().filter(|&&u| u).count();
    if unreachable_count > 0 {
        tracing::warn!(
            unreachable = unreachable_count,
            marked = mask.marked_count(),
            "Pixels without a reachable scribble fall back to neutral chroma"
        );
    }

    let rows: Vec<Vec<(usize, f64)>> = (0..mask.len())
        .into_par_iter()
        .map(|idx| {
            if mask.is_marked(idx) || unreachable[idx] {
                return vec![(idx, 1.0)];
            }
            let neighbors = graph.neighbors(idx);
            let mut row = Vec::with_capacity(neighbors.len() + 1);
            row.push((idx, 1.0));
            row.extend(neighbors.iter().map(|n| (n.index, -n.weight)));
            row.sort_unstable_by_key(|&(col, _)| col);
            row
        })
        .collect();

    let (rhs_i, rhs_q): (Vec<f64>, Vec<f64>) = (0..mask.len())
        .into_par_iter()
        .map(|idx| {
            if mask.is_marked(idx) {
                constraints.hint(idx)
            } else {
                (0.0, 0.0)
            }
        })
        .unzip();

    let matrix = SparseMatrix::from_rows(rows);
    tracing::debug!(
        dim = matrix.dim(),
        nnz = matrix.nnz(),
        "Assembled linear system"
    );

    LinearSystem {
        matrix,
        rhs_i,
        rhs_q,
        unreachable: unreachable_count,
    }
}
