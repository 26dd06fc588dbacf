//! Compositor: reference luminance plus solved chrominance.
//!
//! The output luminance is never touched by the solver, so the colorized
//! image keeps the exact tonal structure of the reference.

use crate::color::to_additive_color;
use crate::image::{Image, YiqImage};
use crate::solver::Solution;

/// Pair the reference luminance plane with the solved I and Q planes.
pub fn composite(reference: &YiqImage, solution: &Solution) -> YiqImage {
    debug_assert_eq!(solution.i.len(), reference.len());
    debug_assert_eq!(solution.q.len(), reference.len());
    YiqImage::from_planes(
        reference.width(),
        reference.height(),
        reference.luma().to_vec(),
        solution.i.clone(),
        solution.q.clone(),
    )
}

/// Composite and convert back to RGB in one step.
///
/// Channels may fall outside `[0, 1]` when the solved chrominance is strong
/// relative to the luminance; they are clamped only by [`Image::to_rgb8`].
pub fn composite_rgb(reference: &YiqImage, solution: &Solution) -> (YiqImage, Image) {
    let yiq = composite(reference, solution);
    let rgb = to_additive_color(&yiq);
    (yiq, rgb)
}
