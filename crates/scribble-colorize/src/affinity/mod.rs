//! Affinity engine: luminance-similarity weights over a local window.
//!
//! Every unmarked pixel `p` is modeled as a weighted blend of its neighbors'
//! chrominance. The weight of neighbor `q` falls off with the squared
//! luminance difference, scaled by the luminance variance of the window:
//!
//! ```text
//! w(p, q) = exp(-(Y_p - Y_q)^2 / sigma^2)      sigma^2 = k * var(window)
//! ```
//!
//! followed by normalization so the weights of `p` sum to one. Neighbors on
//! the same side of a luminance edge get large weights, neighbors across it
//! get weights near zero, which is how color stops at edges without any
//! explicit edge detection.
//!
//! `sigma^2` has two floors. A window that is perfectly flat would have zero
//! variance; the variance is then replaced by `min_variance`. Independently,
//! `sigma^2` is raised so that the most similar neighbor keeps at least a
//! weight of 0.01 before normalization, otherwise a pixel sitting alone on a
//! thin feature would have every weight underflow.

mod weight_graph;

pub use weight_graph::{Neighbor, WeightGraph};

use rayon::prelude::*;

use crate::constraint::MarkMask;

/// Default window half-width (3x3 window).
pub const DEFAULT_RADIUS: usize = 1;

/// Largest accepted window half-width. Work and memory grow with
/// `(2r + 1)^2` per pixel.
pub const MAX_RADIUS: usize = 16;

/// Default multiplier applied to the window variance.
pub const DEFAULT_VARIANCE_SCALE: f64 = 0.6;

/// Default lower bound for `sigma^2`.
pub const DEFAULT_MIN_VARIANCE: f64 = 2e-6;

/// Weight the most similar neighbor is guaranteed before normalization.
const MIN_NEAREST_WEIGHT: f64 = 0.01;

/// Window and scaling parameters for the affinity computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinityOptions {
    /// Window half-width `r`; the window is `(2r + 1)^2` clipped to bounds.
    pub radius: usize,
    /// Multiplier `k` applied to the window variance.
    pub variance_scale: f64,
    /// Floor for `sigma^2`.
    pub min_variance: f64,
}

impl Default for AffinityOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            variance_scale: DEFAULT_VARIANCE_SCALE,
            min_variance: DEFAULT_MIN_VARIANCE,
        }
    }
}

/// Compute normalized neighbor weights for every unmarked pixel.
///
/// `luma` is the reference luminance plane in raster order. Marked pixels get
/// an empty neighbor list since their value is pinned.
pub fn compute_weights(
    luma: &[f64],
    width: usize,
    height: usize,
    mask: &MarkMask,
    options: &AffinityOptions,
) -> WeightGraph {
    debug_assert_eq!(luma.len(), width * height);
    debug_assert_eq!(mask.len(), luma.len());

    let rows: Vec<Vec<Neighbor>> = (0..luma.len())
        .into_par_iter()
        .map(|idx| {
            if mask.is_marked(idx) {
                Vec::new()
            } else {
                pixel_weights(luma, width, height, idx, options)
            }
        })
        .collect();

    let graph = WeightGraph::from_rows(rows);
    tracing::debug!(
        pixels = luma.len(),
        edges = graph.edge_count(),
        radius = options.radius,
        "Computed affinity weights"
    );
    graph
}

/// Weights for a single pixel, normalized to sum to one.
fn pixel_weights(
    luma: &[f64],
    width: usize,
    height: usize,
    idx: usize,
    options: &AffinityOptions,
) -> Vec<Neighbor> {
    let x = idx % width;
    let y = idx / width;
    let r = options.radius;
    let x0 = x.saturating_sub(r);
    let x1 = x.saturating_add(r).min(width - 1);
    let y0 = y.saturating_sub(r);
    let y1 = y.saturating_add(r).min(height - 1);

    let center = luma[idx];
    let window_len = (x1 - x0 + 1) * (y1 - y0 + 1);
    if window_len == 1 {
        return Vec::new();
    }

    let mut sum = 0.0;
    let mut neighbors = Vec::with_capacity(window_len - 1);
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            let n = ny * width + nx;
            sum += luma[n];
            if n != idx {
                neighbors.push(Neighbor {
                    index: n,
                    weight: (luma[n] - center).powi(2),
                });
            }
        }
    }

    let mean = sum / window_len as f64;
    let mut variance = 0.0;
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            variance += (luma[ny * width + nx] - mean).powi(2);
        }
    }
    variance /= window_len as f64;

    // `weight` currently holds the squared luminance difference.
    let nearest = neighbors
        .iter()
        .map(|n| n.weight)
        .fold(f64::INFINITY, f64::min);
    let sigma2 = (options.variance_scale * variance)
        .max(-nearest / MIN_NEAREST_WEIGHT.ln())
        .max(options.min_variance);

    let mut total = 0.0;
    for n in &mut neighbors {
        n.weight = (-n.weight / sigma2).exp();
        total += n.weight;
    }
    for n in &mut neighbors {
        n.weight /= total;
    }
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unmarked(width: usize, height: usize) -> MarkMask {
        MarkMask::new(width, height, vec![false; width * height])
    }

    fn weight_sum(graph: &WeightGraph, idx: usize) -> f64 {
        graph.neighbors(idx).iter().map(|n| n.weight).sum()
    }

    #[test]
    fn test_uniform_field_gives_equal_weights() {
        let luma = vec![0.5; 9];
        let graph = compute_weights(&luma, 3, 3, &unmarked(3, 3), &AffinityOptions::default());

        let center = graph.neighbors(4);
        assert_eq!(center.len(), 8);
        for n in center {
            assert!((n.weight - 0.125).abs() < 1e-12, "weight {}", n.weight);
        }
    }

    #[test]
    fn test_oversized_radius_clips_to_image() {
        let luma = vec![0.5; 9];
        let options = AffinityOptions {
            radius: usize::MAX,
            ..AffinityOptions::default()
        };
        let graph = compute_weights(&luma, 3, 3, &unmarked(3, 3), &options);

        for idx in 0..9 {
            let neighbors = graph.neighbors(idx);
            assert_eq!(neighbors.len(), 8, "pixel {idx}");
            assert!(neighbors.iter().all(|n| n.index != idx));
            assert!((weight_sum(&graph, idx) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_border_windows_are_truncated() {
        let luma = vec![0.5; 9];
        let graph = compute_weights(&luma, 3, 3, &unmarked(3, 3), &AffinityOptions::default());

        // Corner sees 3 neighbors, edge sees 5.
        assert_eq!(graph.neighbors(0).len(), 3);
        assert_eq!(graph.neighbors(1).len(), 5);
        for n in graph.neighbors(0) {
            assert!((n.weight - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weights_sum_to_one_on_varied_image() {
        let (w, h) = (7, 5);
        let luma: Vec<f64> = (0..w * h)
            .map(|i| ((i * 37) % 11) as f64 / 10.0)
            .collect();
        let graph = compute_weights(&luma, w, h, &unmarked(w, h), &AffinityOptions::default());

        for idx in 0..w * h {
            let s = weight_sum(&graph, idx);
            assert!((s - 1.0).abs() < 1e-9, "pixel {idx} weights sum to {s}");
            assert!(graph.neighbors(idx).iter().all(|n| n.weight >= 0.0));
        }
    }

    #[test]
    fn test_similar_neighbor_outweighs_dissimilar() {
        // Row: dark dark bright
        let luma = vec![0.1, 0.1, 0.9];
        let graph = compute_weights(&luma, 3, 1, &unmarked(3, 1), &AffinityOptions::default());

        let middle = graph.neighbors(1);
        let to_dark = middle.iter().find(|n| n.index == 0).unwrap().weight;
        let to_bright = middle.iter().find(|n| n.index == 2).unwrap().weight;
        assert!(
            to_dark > 0.9 && to_bright < 0.1,
            "dark={to_dark}, bright={to_bright}"
        );
    }

    #[test]
    fn test_marked_pixels_have_no_weights() {
        let luma = vec![0.5; 4];
        let mask = MarkMask::new(2, 2, vec![true, false, false, false]);
        let graph = compute_weights(&luma, 2, 2, &mask, &AffinityOptions::default());

        assert!(graph.neighbors(0).is_empty());
        assert_eq!(graph.neighbors(3).len(), 3);
    }

    #[test]
    fn test_single_pixel_has_no_neighbors() {
        let graph = compute_weights(&[0.3], 1, 1, &unmarked(1, 1), &AffinityOptions::default());
        assert!(graph.neighbors(0).is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_larger_radius_widens_window() {
        let luma = vec![0.5; 25];
        let options = AffinityOptions {
            radius: 2,
            ..AffinityOptions::default()
        };
        let graph = compute_weights(&luma, 5, 5, &unmarked(5, 5), &options);
        assert_eq!(graph.neighbors(12).len(), 24);
    }

    #[test]
    fn test_nearest_neighbor_floor_keeps_isolated_pixel_connected() {
        // A bright pixel surrounded by dark ones: without the floor every
        // weight would underflow.
        let mut luma = vec![0.0; 9];
        luma[4] = 1.0;
        let graph = compute_weights(&luma, 3, 3, &unmarked(3, 3), &AffinityOptions::default());

        let s = weight_sum(&graph, 4);
        assert!((s - 1.0).abs() < 1e-9);
        for n in graph.neighbors(4) {
            assert!((n.weight - 0.125).abs() < 1e-9);
        }
    }
}
