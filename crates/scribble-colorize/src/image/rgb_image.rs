//! The RGB image value type used at the core boundary.

use crate::api::ColorizeError;
use crate::color::Rgb;

/// A fixed-size, row-major grid of [`Rgb`] pixels.
///
/// This is the only image representation the core accepts or returns.
/// Decoding files, grabbing canvases and resizing are the caller's business;
/// by the time pixels reach the core they are normalized floats with known
/// dimensions.
///
/// # Example
///
/// ```
/// use scribble_colorize::{Image, Rgb};
///
/// let image = Image::filled(3, 2, Rgb::WHITE).unwrap();
/// assert_eq!(image.width(), 3);
/// assert_eq!(image.height(), 2);
/// assert_eq!(image.get(2, 1), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Image {
    /// Create an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`ColorizeError::EmptyImage`] if either dimension is zero,
    /// [`ColorizeError::PixelCount`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ColorizeError> {
        if width == 0 || height == 0 {
            return Err(ColorizeError::EmptyImage);
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(ColorizeError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image where every pixel has the same color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ColorizeError> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Create an image from interleaved 8-bit `[R, G, B, R, G, B, ...]` data.
    ///
    /// # Errors
    ///
    /// Same as [`Image::new`]; the expected byte length is `width * height * 3`.
    pub fn from_rgb8(width: usize, height: usize, data: &[u8]) -> Result<Self, ColorizeError> {
        if data.len() % 3 != 0 {
            return Err(ColorizeError::PixelCount {
                expected: width * height * 3,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|px| Rgb::from_u8(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Internal constructor for buffers whose length is already known to match.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a constructed image; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Raster index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Interleaved 8-bit RGB bytes, clamped and rounded per channel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&px.to_bytes());
        }
        out
    }

    /// Copy with every channel clamped to `[0, 1]`.
    pub fn clamped(&self) -> Image {
        Self::from_parts(
            self.width,
            self.height,
            self.pixels.iter().map(|p| p.clamped()).collect(),
        )
    }
}
