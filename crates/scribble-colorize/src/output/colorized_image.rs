use crate::constraint::MarkMask;
use crate::image::{Image, YiqImage};

use super::ColorizeReport;

/// The result of [`Colorizer::colorize`](crate::Colorizer::colorize).
///
/// # Example
///
/// ```
/// use scribble_colorize::{Colorizer, Image, Quality, Rgb};
///
/// let reference = Image::filled(3, 3, Rgb::new(0.5, 0.5, 0.5)).unwrap();
/// let mut scribble = Image::filled(3, 3, Rgb::WHITE).unwrap();
/// scribble.set(1, 1, Rgb::new(0.8, 0.3, 0.3));
///
/// let result = Colorizer::new().colorize(&reference, &scribble).unwrap();
/// assert_eq!(result.report().marked_pixels, 1);
/// assert_eq!(result.report().quality, Quality::Full);
/// assert_eq!(result.to_rgb8().len(), 3 * 3 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct ColorizedImage {
    image: Image,
    yiq: YiqImage,
    mask: MarkMask,
    report: ColorizeReport,
}

impl ColorizedImage {
    pub(crate) fn new(image: Image, yiq: YiqImage, mask: MarkMask, report: ColorizeReport) -> Self {
        Self {
            image,
            yiq,
            mask,
            report,
        }
    }

    /// Final image with every channel clamped to `[0, 1]`.
    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Reference luminance with the solved chrominance, unclamped.
    #[inline]
    pub fn yiq(&self) -> &YiqImage {
        &self.yiq
    }

    /// Pixels that were pinned by the scribble.
    #[inline]
    pub fn mask(&self) -> &MarkMask {
        &self.mask
    }

    #[inline]
    pub fn report(&self) -> &ColorizeReport {
        &self.report
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Interleaved 8-bit RGB, clamped and rounded.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.image.to_rgb8()
    }

    /// Consume the result, keeping only the image.
    pub fn into_image(self) -> Image {
        self.image
    }
}
