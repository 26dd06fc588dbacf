//! Additive RGB color type
//!
//! RGB is the representation images arrive in and leave in. Channel values are
//! normalized to 0.0..=1.0; quantization to 8 bits happens only at the output
//! boundary via [`Rgb::to_bytes`].

/// A color in additive RGB, one `f64` per channel.
///
/// Values are nominally in 0.0..=1.0 but are not clamped on construction:
/// composited results can land slightly outside the range before the final
/// quantization step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel (0.0..=1.0)
    pub r: f64,
    /// Green channel (0.0..=1.0)
    pub g: f64,
    /// Blue channel (0.0..=1.0)
    pub b: f64,
}

impl Rgb {
    /// Channel-maximum white. An untouched scribble layer is all white.
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Black.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a new color from normalized channel values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use scribble_colorize::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    ///
    /// Clamps each channel to 0.0..=1.0 and rounds to the nearest of 256
    /// levels.
    ///
    /// # Example
    /// ```
    /// use scribble_colorize::Rgb;
    /// let color = Rgb::new(1.2, 0.5, -0.1);
    /// assert_eq!(color.to_bytes(), [255, 128, 0]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
        ]
    }

    /// Clamp every channel to 0.0..=1.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Sum of absolute per-channel differences.
    #[inline]
    pub fn abs_diff_sum(self, other: Rgb) -> f64 {
        (self.r - other.r).abs() + (self.g - other.g).abs() + (self.b - other.b).abs()
    }

    /// True when every channel is within `tolerance` of the channel maximum.
    #[inline]
    pub fn is_white(self, tolerance: f64) -> bool {
        1.0 - self.r <= tolerance && 1.0 - self.g <= tolerance && 1.0 - self.b <= tolerance
    }
}

#[inline]
fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
