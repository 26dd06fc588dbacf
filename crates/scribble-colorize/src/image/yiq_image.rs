//! Planar luminance/chrominance image.

use crate::color::Yiq;

/// An image stored as three separate planes: luminance, I and Q.
///
/// Planar storage matches how the pipeline consumes the data: the affinity
/// engine reads only the luminance plane, the assembler and solver only the
/// chrominance planes.
#[derive(Debug, Clone, PartialEq)]
pub struct YiqImage {
    width: usize,
    height: usize,
    luma: Vec<f64>,
    i: Vec<f64>,
    q: Vec<f64>,
}

impl YiqImage {
    pub(crate) fn from_pixels(width: usize, height: usize, pixels: &[Yiq]) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            luma: pixels.iter().map(|p| p.y).collect(),
            i: pixels.iter().map(|p| p.i).collect(),
            q: pixels.iter().map(|p| p.q).collect(),
        }
    }

    pub(crate) fn from_planes(
        width: usize,
        height: usize,
        luma: Vec<f64>,
        i: Vec<f64>,
        q: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(luma.len(), width * height);
        debug_assert_eq!(i.len(), luma.len());
        debug_assert_eq!(q.len(), luma.len());
        Self {
            width,
            height,
            luma,
            i,
            q,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.luma.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.luma.is_empty()
    }

    /// Luminance plane, row-major.
    #[inline]
    pub fn luma(&self) -> &[f64] {
        &self.luma
    }

    /// I chrominance plane, row-major.
    #[inline]
    pub fn i(&self) -> &[f64] {
        &self.i
    }

    /// Q chrominance plane, row-major.
    #[inline]
    pub fn q(&self) -> &[f64] {
        &self.q
    }

    /// Reassemble the pixel at raster index `idx`.
    #[inline]
    pub fn pixel(&self, idx: usize) -> Yiq {
        Yiq::new(self.luma[idx], self.i[idx], self.q[idx])
    }
}
