#![allow(clippy::needless_range_loop, clippy::excessive_precision)]

//! scribble-colorize: optimization-based colorization from sparse color hints
//!
//! Given a reference image and a copy of it with a few color strokes painted
//! on top (the scribble), this crate spreads the stroke colors over the rest
//! of the image. Neighboring pixels with similar luminance are asked to have
//! similar chrominance; pixels under a stroke keep the stroke's chrominance.
//! The luminance of the reference is never changed.
//!
//! # Quick Start
//!
//! ```
//! use scribble_colorize::{Colorizer, Image, Rgb};
//!
//! let reference = Image::filled(16, 16, Rgb::new(0.5, 0.5, 0.5)).unwrap();
//! let mut scribble = Image::filled(16, 16, Rgb::WHITE).unwrap();
//! scribble.set(3, 3, Rgb::new(0.9, 0.5, 0.2));
//!
//! let result = Colorizer::new().colorize(&reference, &scribble).unwrap();
//! let bytes = result.to_rgb8();
//! assert_eq!(bytes.len(), 16 * 16 * 3);
//! ```
//!
//! # Scribble Contract
//!
//! The scribble image uses pure white as the "untouched" sentinel. A pixel is
//! unmarked when the scribble is white there or equal to the reference;
//! every other pixel is a hard constraint. White therefore cannot be painted
//! as a color, and erasing a stroke back to white releases the constraint.
//!
//! To recolorize a photo that already has color, enable
//! [`Colorizer::pin_white_to_reference`]. White then pins every pixel whose
//! reference is not white to the reference's own chrominance, so only the
//! painted strokes change the result.
//!
//! # Pipeline Overview
//!
//! ```text
//! reference (Rgb)          scribble (Rgb)
//!     |                        |
//!     v                        v
//! to_luma_chroma          extract_constraints
//!     |                        |
//!     | luma                   | MarkMask + hints
//!     v                        |
//! compute_weights <------------+
//!     |                        |
//!     v                        v
//! assemble  (CSR matrix, rhs_i, rhs_q; unreachable rows pinned to 0)
//!     |
//!     v
//! solve_system  (I and Q in parallel, BiCGSTAB or Gauss-Seidel)
//!     |
//!     v
//! composite  (reference luma + solved I/Q)
//!     |
//!     v
//! to_additive_color -> clamp -> 8-bit
//! ```
//!
//! # The Linear System
//!
//! For an unmarked pixel `p` with window neighbors `q`:
//!
//! ```text
//! U(p) - sum_q w(p, q) U(q) = 0        w(p, q) = exp(-(Y_p - Y_q)^2 / sigma_p^2)
//! ```
//!
//! with the weights of each pixel normalized to sum to one. For a marked
//! pixel the row is simply `U(p) = hint(p)`. The matrix is shared by the I
//! and Q channels, only the right-hand sides differ. It is not symmetric,
//! because each row is normalized independently, which is why the default
//! solver is BiCGSTAB rather than conjugate gradient.
//!
//! # Failure Modes
//!
//! Only caller mistakes are errors ([`ColorizeError`]). Everything that can
//! go wrong numerically degrades locally:
//!
//! - a flat luminance window uses a variance floor
//! - pixels that cannot reach any mark get neutral chroma and are counted in
//!   [`ColorizeReport::unreachable_pixels`]
//! - a solver that runs out of iterations yields [`Quality::Degraded`]

pub mod affinity;
pub mod api;
pub mod color;
pub mod compose;
pub mod constraint;
pub mod image;
pub mod output;
pub mod solver;
pub mod system;

#[cfg(test)]
mod domain_tests;

pub use affinity::{AffinityOptions, Neighbor, WeightGraph};
pub use api::{ColorizeError, ColorizeOptions, Colorizer};
pub use color::{Rgb, Yiq};
pub use constraint::{ConstraintOptions, Constraints, MarkMask};
pub use image::{Image, YiqImage};
pub use output::{ColorizeReport, ColorizedImage, Quality};
pub use solver::{SolveReport, Solution, Solver, SolverKind, SolverOptions};
pub use system::{LinearSystem, SparseMatrix};
