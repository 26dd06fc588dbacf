//! Colorizer builder, the primary entry point for the crate.
//!
//! [`Colorizer`] wraps the full pipeline behind a fluent configuration API.

use super::{ColorizeError, ColorizeOptions};
use crate::affinity::compute_weights;
use crate::color::to_luma_chroma;
use crate::compose::composite_rgb;
use crate::constraint::extract_constraints;
use crate::image::Image;
use crate::output::{ColorizeReport, ColorizedImage};
use crate::solver::{solve_system, SolverKind};
use crate::system::assemble;

/// High-level colorization builder.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`colorize()`](Self::colorize) takes `&self`, so one configured builder
///   can process any number of image pairs, from any number of threads
/// - Options are validated when `colorize()` runs, not when they are set
///
/// # Example
///
/// ```
/// use scribble_colorize::{Colorizer, Image, Rgb, SolverKind};
///
/// let reference = Image::filled(8, 8, Rgb::new(0.4, 0.4, 0.4)).unwrap();
/// let mut scribble = Image::filled(8, 8, Rgb::WHITE).unwrap();
/// scribble.set(0, 0, Rgb::new(0.2, 0.4, 0.9));
///
/// let colorizer = Colorizer::new()
///     .radius(1)
///     .solver(SolverKind::BiCgStab)
///     .max_iterations(500);
///
/// let result = colorizer.colorize(&reference, &scribble).unwrap();
/// assert_eq!(result.width(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    options: ColorizeOptions,
}

impl Colorizer {
    /// Create a colorizer with default options: 3x3 window, BiCGSTAB,
    /// tolerance `1e-6`, 2000 iterations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a colorizer from a complete option set.
    pub fn from_options(options: ColorizeOptions) -> Self {
        Self { options }
    }

    /// Current options.
    #[inline]
    pub fn options(&self) -> &ColorizeOptions {
        &self.options
    }

    /// Set the affinity window half-width.
    #[inline]
    pub fn radius(mut self, radius: usize) -> Self {
        self.options.affinity.radius = radius;
        self
    }

    /// Set the tolerance of the white "untouched" sentinel.
    #[inline]
    pub fn white_tolerance(mut self, tolerance: f64) -> Self {
        self.options.constraint.white_tolerance = tolerance;
        self
    }

    /// Set the scribble/reference difference at or below which a pixel is
    /// considered unmodified.
    #[inline]
    pub fn mark_threshold(mut self, threshold: f64) -> Self {
        self.options.constraint.mark_threshold = threshold;
        self
    }

    /// Pin white scribble pixels to the reference color wherever the
    /// reference is not white itself.
    #[inline]
    pub fn pin_white_to_reference(mut self, enabled: bool) -> Self {
        self.options.constraint.pin_white_to_reference = enabled;
        self
    }

    /// Set the sparse solver.
    #[inline]
    pub fn solver(mut self, kind: SolverKind) -> Self {
        self.options.solver.kind = kind;
        self
    }

    /// Set the relative residual at which the solver stops.
    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.options.solver.tolerance = tolerance;
        self
    }

    /// Set the per-channel iteration cap.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.options.solver.max_iterations = max_iterations;
        self
    }

    /// Propagate the scribble colors across the reference.
    ///
    /// Runs the full pipeline:
    /// 1. Extract the mark mask and hints
    /// 2. Convert the reference to YIQ
    /// 3. Compute affinity weights on the reference luminance
    /// 4. Assemble and solve the I and Q systems
    /// 5. Recombine with the reference luminance
    ///
    /// # Errors
    ///
    /// [`ColorizeError::InvalidOptions`] for out-of-range options and
    /// [`ColorizeError::DimensionMismatch`] when the images differ in size.
    /// A solver that runs out of iterations is not an error; check
    /// [`ColorizeReport::quality`].
    pub fn colorize(
        &self,
        reference: &Image,
        scribble: &Image,
    ) -> Result<ColorizedImage, ColorizeError> {
        self.options.validate()?;
        let (width, height) = reference.dimensions();

        let constraints = extract_constraints(reference, scribble, &self.options.constraint)?;
        let yiq = to_luma_chroma(reference);

        let graph = compute_weights(
            yiq.luma(),
            width,
            height,
            &constraints.mask,
            &self.options.affinity,
        );
        let system = assemble(&constraints, &graph);
        drop(graph);

        let solution = solve_system(&system, &self.options.solver);
        let report = ColorizeReport::new(
            constraints.mask.marked_count(),
            system.unreachable,
            &solution,
        );
        drop(system);

        let (composed, rgb) = composite_rgb(&yiq, &solution);
        tracing::info!(
            width,
            height,
            marked = report.marked_pixels,
            unreachable = report.unreachable_pixels,
            iterations = report.iterations(),
            quality = %report.quality,
            "Colorized image"
        );

        Ok(ColorizedImage::new(
            rgb.clamped(),
            composed,
            constraints.mask,
            report,
        ))
    }
}
