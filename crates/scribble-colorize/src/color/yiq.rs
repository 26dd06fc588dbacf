//! YIQ luminance/chrominance color space
//!
//! YIQ (NTSC) separates brightness (`y`) from two chrominance axes (`i`, `q`)
//! with a fixed linear transform. Colorization holds `y` fixed and solves for
//! `i` and `q`, so the transform must be exactly invertible: the inverse
//! matrix below is the algebraic inverse of [`RGB_TO_YIQ`], not the rounded
//! three-digit table found in broadcast references.

use super::rgb::Rgb;

/// Forward transform, rows produce `y`, `i`, `q`.
pub const RGB_TO_YIQ: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.596, -0.274, -0.322],
    [0.211, -0.523, 0.312],
];

/// Exact inverse of [`RGB_TO_YIQ`], rows produce `r`, `g`, `b`.
pub const YIQ_TO_RGB: [[f64; 3]; 3] = [
    [1.0, 0.956170685404145, 0.621432566346586],
    [1.0, -0.272688602330106, -0.646813237020174],
    [1.0, -1.103744082176026, 1.700623094677306],
];

/// A color in YIQ space.
///
/// # Components
///
/// - `y`: luminance, 0.0..=1.0 for in-gamut colors
/// - `i`: orange-blue chrominance axis, roughly -0.6..=0.6
/// - `q`: purple-green chrominance axis, roughly -0.53..=0.53
///
/// Values are never clamped. Solved chrominance may fall outside the
/// nominal range; clamping happens only when converting the final image to
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yiq {
    /// Luminance
    pub y: f64,
    /// In-phase chrominance
    pub i: f64,
    /// Quadrature chrominance
    pub q: f64,
}

impl Yiq {
    /// Create a new YIQ color.
    #[inline]
    pub fn new(y: f64, i: f64, q: f64) -> Self {
        Self { y, i, q }
    }

    /// Magnitude of the chrominance vector.
    ///
    /// # Example
    ///
    /// ```
    /// use scribble_colorize::{Rgb, Yiq};
    ///
    /// let gray = Yiq::from(Rgb::new(0.5, 0.5, 0.5));
    /// assert!(gray.chroma() < 1e-12);
    /// ```
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.i * self.i + self.q * self.q).sqrt()
    }
}

impl From<Rgb> for Yiq {
    fn from(c: Rgb) -> Self {
        let m = &RGB_TO_YIQ;
        Yiq {
            y: m[0][0] * c.r + m[0][1] * c.g + m[0][2] * c.b,
            i: m[1][0] * c.r + m[1][1] * c.g + m[1][2] * c.b,
            q: m[2][0] * c.r + m[2][1] * c.g + m[2][2] * c.b,
        }
    }
}

impl From<Yiq> for Rgb {
    /// Convert back to additive RGB. The result is not clamped.
    fn from(c: Yiq) -> Self {
        let m = &YIQ_TO_RGB;
        Rgb {
            r: m[0][0] * c.y + m[0][1] * c.i + m[0][2] * c.q,
            g: m[1][0] * c.y + m[1][1] * c.i + m[1][2] * c.q,
            b: m[2][0] * c.y + m[2][1] * c.i + m[2][2] * c.q,
        }
    }
}
