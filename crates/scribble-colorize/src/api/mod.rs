//! Public API for the scribble-colorize crate.
//!
//! This module provides the high-level API: the [`Colorizer`] builder, the
//! [`ColorizeOptions`] request object and the [`ColorizeError`] error type.

mod builder;
mod error;
mod options;

pub use builder::Colorizer;
pub use error::ColorizeError;
pub use options::ColorizeOptions;
