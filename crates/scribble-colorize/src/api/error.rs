//! Unified error type for the scribble-colorize public API.
//!
//! Only caller mistakes are errors. Numerical trouble inside a request
//! (flat luminance windows, regions without a constraint, a solver that runs
//! out of iterations) degrades the result locally and is reported through
//! [`ColorizeReport`](crate::ColorizeReport) instead.

use thiserror::Error;

/// Errors returned by the colorization pipeline.
///
/// # Example
///
/// ```
/// use scribble_colorize::{ColorizeError, Colorizer, Image, Rgb};
///
/// let reference = Image::filled(4, 4, Rgb::new(0.5, 0.5, 0.5)).unwrap();
/// let scribble = Image::filled(4, 3, Rgb::WHITE).unwrap();
///
/// let err = Colorizer::new().colorize(&reference, &scribble).unwrap_err();
/// assert!(matches!(err, ColorizeError::DimensionMismatch { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorizeError {
    /// Reference and scribble images differ in size. Alignment is never guessed.
    #[error(
        "reference is {}x{} but scribble is {}x{}",
        .reference.0, .reference.1, .scribble.0, .scribble.1
    )]
    DimensionMismatch {
        /// Reference `(width, height)`
        reference: (usize, usize),
        /// Scribble `(width, height)`
        scribble: (usize, usize),
    },

    /// An image with zero width or height.
    #[error("image has no pixels")]
    EmptyImage,

    /// A pixel buffer whose length does not match its declared dimensions.
    #[error("pixel buffer has {actual} entries, expected {expected}")]
    PixelCount {
        /// Entries required by the dimensions
        expected: usize,
        /// Entries supplied
        actual: usize,
    },

    /// Options outside their valid range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
