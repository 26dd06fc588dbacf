//! Reachability of unmarked pixels from the constraints.
//!
//! An unmarked pixel whose chain of positive weights never leads to a marked
//! pixel has no defined chrominance: its block of equations is homogeneous
//! and singular. Such pixels are found up front and pinned to zero chroma.

use std::collections::VecDeque;

use crate::affinity::WeightGraph;
use crate::constraint::MarkMask;

/// Flags pixels that cannot reach any marked pixel through positive weights.
///
/// Pixel `p` depends on `q` when `w(p, q) > 0`. Starting from every marked
/// pixel, a breadth-first search walks those dependencies backwards; whatever
/// is left unvisited is unreachable.
pub fn find_unreachable(mask: &MarkMask, graph: &WeightGraph) -> Vec<bool> {
    let n = mask.len();
    debug_assert_eq!(graph.len(), n);

    // Reverse adjacency in CSR form: dependents[q] = all p with w(p, q) > 0.
    let mut counts = vec![0usize; n + 1];
    for p in 0..n {
        for nb in graph.neighbors(p) {
            if nb.weight > 0.0 {
                counts[nb.index + 1] += 1;
            }
        }
    }
    for i in 0..n {
        counts[i + 1] += counts[i];
    }
    let offsets = counts;
    let mut fill = offsets.clone();
    let mut dependents = vec![0usize; offsets[n]];
    for p in 0..n {
        for nb in graph.neighbors(p) {
            if nb.weight > 0.0 {
                dependents[fill[nb.index]] = p;
                fill[nb.index] += 1;
            }
        }
    }

    let mut visited = mask.as_slice().to_vec();
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| visited[i]).collect();
    while let Some(q) = queue.pop_front() {
        for &p in &dependents[offsets[q]..offsets[q + 1]] {
            if !visited[p] {
                visited[p] = true;
                queue.push_back(p);
            }
        }
    }

    visited.iter().map(|&v| !v).collect()
}
