//! Color types and conversion utilities
//!
//! - **Rgb**: additive color, the representation used at the input/output
//!   boundary.
//! - **Yiq**: luminance plus two chrominance channels. The solver only ever
//!   touches the chrominance channels.
//!
//! Whole-image conversions live here too so that the forward and inverse
//! direction sit side by side.
//!
//! # Example
//!
//! ```
//! use scribble_colorize::{Rgb, Yiq};
//!
//! let rgb = Rgb::from_u8(200, 120, 40);
//! let yiq = Yiq::from(rgb);
//! let back = Rgb::from(yiq);
//! assert_eq!(back.to_bytes(), [200, 120, 40]);
//! ```

mod rgb;
mod yiq;

pub use rgb::Rgb;
pub use yiq::{Yiq, RGB_TO_YIQ, YIQ_TO_RGB};

use rayon::prelude::*;

use crate::image::{Image, YiqImage};

/// Convert an RGB image into separate luminance and chrominance planes.
pub fn to_luma_chroma(image: &Image) -> YiqImage {
    let converted: Vec<Yiq> = image.pixels().par_iter().map(|&p| Yiq::from(p)).collect();
    YiqImage::from_pixels(image.width(), image.height(), &converted)
}

/// Convert luminance/chrominance planes back into an RGB image.
///
/// No clamping happens here; see [`Image::to_rgb8`] for the output boundary.
pub fn to_additive_color(image: &YiqImage) -> Image {
    let pixels: Vec<Rgb> = (0..image.len())
        .into_par_iter()
        .map(|idx| Rgb::from(image.pixel(idx)))
        .collect();
    Image::from_parts(image.width(), image.height(), pixels)
}
