//! Constraint extraction: which pixels carry a user-supplied color.
//!
//! The scribble layer is the reference image with strokes painted over it.
//! A pixel is left free (unmarked) when the scribble there is either the
//! white "untouched" sentinel or indistinguishable from the reference. Every
//! other pixel is pinned to the chrominance of the scribble color.
//!
//! Where the scribble is white, the effective color is the reference's own
//! color. By default that hint is unused: white means "no opinion" and the
//! pixel's chrominance comes from the solve. With
//! [`ConstraintOptions::pin_white_to_reference`] set, white over a reference
//! that is not itself white becomes a mark pinned to the reference color, so
//! untouched regions of an already colored photo keep their color and only
//! the painted parts are recolorized.

mod mark_mask;

pub use mark_mask::MarkMask;

use rayon::prelude::*;

use crate::api::ColorizeError;
use crate::color::{Rgb, Yiq};
use crate::image::{Image, YiqImage};

/// Default tolerance for the white sentinel test, per channel.
pub const DEFAULT_WHITE_TOLERANCE: f64 = 1e-6;

/// Default threshold on the summed absolute channel difference between
/// scribble and reference below which a pixel counts as unmodified.
pub const DEFAULT_MARK_THRESHOLD: f64 = 0.01;

/// Thresholds for deciding whether a pixel was marked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintOptions {
    /// Per-channel distance from 1.0 still treated as the white sentinel.
    pub white_tolerance: f64,
    /// Summed absolute RGB difference to the reference at or below which the
    /// scribble is considered unmodified.
    pub mark_threshold: f64,
    /// Treat white over a non-white reference as a mark carrying the
    /// reference's own chrominance. Used to recolorize color photos.
    pub pin_white_to_reference: bool,
}

impl Default for ConstraintOptions {
    fn default() -> Self {
        Self {
            white_tolerance: DEFAULT_WHITE_TOLERANCE,
            mark_threshold: DEFAULT_MARK_THRESHOLD,
            pin_white_to_reference: false,
        }
    }
}

/// Output of [`extract_constraints`].
#[derive(Debug, Clone)]
pub struct Constraints {
    /// Which pixels are pinned.
    pub mask: MarkMask,
    /// Effective scribble color per pixel in YIQ. Only the chrominance of
    /// marked pixels is consumed downstream.
    pub hints: YiqImage,
}

impl Constraints {
    /// Chrominance hint `(i, q)` at raster index `idx`.
    #[inline]
    pub fn hint(&self, idx: usize) -> (f64, f64) {
        (self.hints.i()[idx], self.hints.q()[idx])
    }
}

/// Build the mark mask and chrominance hints from a reference/scribble pair.
///
/// # Errors
///
/// [`ColorizeError::DimensionMismatch`] when the images differ in size. The
/// caller is responsible for resizing both to a common grid first.
pub fn extract_constraints(
    reference: &Image,
    scribble: &Image,
    options: &ConstraintOptions,
) -> Result<Constraints, ColorizeError> {
    if reference.dimensions() != scribble.dimensions() {
        return Err(ColorizeError::DimensionMismatch {
            reference: reference.dimensions(),
            scribble: scribble.dimensions(),
        });
    }

    let (marks, effective): (Vec<bool>, Vec<Yiq>) = reference
        .pixels()
        .par_iter()
        .zip(scribble.pixels().par_iter())
        .map(|(&r, &s)| classify(r, s, options))
        .unzip();

    let mask = MarkMask::from_parts(reference.width(), reference.height(), marks);
    tracing::debug!(
        width = reference.width(),
        height = reference.height(),
        marked = mask.marked_count(),
        "Extracted scribble constraints"
    );

    Ok(Constraints {
        mask,
        hints: YiqImage::from_pixels(reference.width(), reference.height(), &effective),
    })
}

/// Decide one pixel: `(is_marked, effective color)`.
#[inline]
fn classify(reference: Rgb, scribble: Rgb, options: &ConstraintOptions) -> (bool, Yiq) {
    if scribble.is_white(options.white_tolerance) {
        let pinned = options.pin_white_to_reference
            && Rgb::WHITE.abs_diff_sum(reference) > options.mark_threshold;
        return (pinned, Yiq::from(reference));
    }
    let marked = scribble.abs_diff_sum(reference) > options.mark_threshold;
    (marked, Yiq::from(scribble))
}
