//! Image value types.
//!
//! [`Image`] is the RGB boundary type; [`YiqImage`] is the planar working
//! representation used between conversion and compositing.

mod rgb_image;
mod yiq_image;

pub use rgb_image::Image;
pub use yiq_image::YiqImage;
