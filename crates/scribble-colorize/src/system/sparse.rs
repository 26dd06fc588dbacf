//! Compressed sparse row matrix.

use rayon::prelude::*;

/// Rows with fewer entries than this are multiplied sequentially.
const PARALLEL_MIN_ROWS: usize = 4096;

/// Square sparse matrix in compressed sparse row (CSR) layout.
///
/// Row `i` owns `columns[row_offsets[i]..row_offsets[i + 1]]` and the
/// matching `values`. Columns within a row are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    dim: usize,
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Build from per-row `(column, value)` entries.
    ///
    /// Each row must be sorted by column without duplicates.
    pub fn from_rows(rows: Vec<Vec<(usize, f64)>>) -> Self {
        let dim = rows.len();
        let nnz = rows.iter().map(Vec::len).sum();
        let mut row_offsets = Vec::with_capacity(dim + 1);
        let mut columns = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        row_offsets.push(0);
        for row in rows {
            debug_assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
            for (col, value) in row {
                debug_assert!(col < dim);
                columns.push(col);
                values.push(value);
            }
            row_offsets.push(columns.len());
        }
        Self {
            dim,
            row_offsets,
            columns,
            values,
        }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            dim: n,
            row_offsets: (0..=n).collect(),
            columns: (0..n).collect(),
            values: vec![1.0; n],
        }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column indices and values of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> (&[usize], &[f64]) {
        let range = self.row_offsets[i]..self.row_offsets[i + 1];
        (&self.columns[range.clone()], &self.values[range])
    }

    /// Entry `(i, i)`, zero when not stored.
    pub fn diagonal(&self, i: usize) -> f64 {
        let (cols, vals) = self.row(i);
        cols.binary_search(&i).map(|k| vals[k]).unwrap_or(0.0)
    }

    /// Dot product of row `i` with `x`.
    #[inline]
    pub fn row_dot(&self, i: usize, x: &[f64]) -> f64 {
        let (cols, vals) = self.row(i);
        cols.iter().zip(vals).map(|(&c, &v)| v * x[c]).sum()
    }

    /// `A * x`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        self.mul_vec_into(x, &mut out);
        out
    }

    /// `out = A * x`, reusing the output buffer.
    pub fn mul_vec_into(&self, x: &[f64], out: &mut [f64]) {
        debug_assert_eq!(x.len(), self.dim);
        debug_assert_eq!(out.len(), self.dim);
        if self.dim < PARALLEL_MIN_ROWS {
            for (i, o) in out.iter_mut().enumerate() {
                *o = self.row_dot(i, x);
            }
        } else {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, o)| *o = self.row_dot(i, x));
        }
    }
}
