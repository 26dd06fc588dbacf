//! Output types for the colorization pipeline.
//!
//! [`ColorizedImage`] carries the final RGB image together with the
//! unclamped YIQ composite, the mark mask that drove the solve and a
//! [`ColorizeReport`] describing how well the solve went.

mod colorized_image;
mod report;

pub use colorized_image::ColorizedImage;
pub use report::{ColorizeReport, Quality};
