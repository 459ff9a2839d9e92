//! 8-bit RGB color type
//!
//! Palette entries and raster pixels are stored as gamma-encoded 8-bit RGB.
//! All arithmetic in this crate (distances, luminance, diffused error) works
//! directly on these encoded values.

use std::fmt;

/// Rec. 601 luma weights in thousandths (0.299, 0.587, 0.114).
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

/// A color with 8-bit red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all channels equal to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    ///
    /// # Example
    /// ```
    /// use retro_dither::Rgb;
    /// assert_eq!(Rgb::from_hex(0x306230), Rgb::new(0x30, 0x62, 0x30));
    /// ```
    #[inline]
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Channels as floats in 0.0..=255.0, the working form of error diffusion.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Rec. 601 luma in 0.0..=255.0.
    ///
    /// Computed in integer thousandths so that white is exactly 255.0 and
    /// black exactly 0.0.
    ///
    /// # Example
    /// ```
    /// use retro_dither::Rgb;
    /// assert_eq!(Rgb::gray(255).luma(), 255.0);
    /// assert_eq!(Rgb::gray(0).luma(), 0.0);
    /// ```
    #[inline]
    pub fn luma(self) -> f32 {
        let weighted = LUMA_R * self.r as u32 + LUMA_G * self.g as u32 + LUMA_B * self.b as u32;
        weighted as f32 / 1000.0
    }

    /// Rec. 601 luma normalized to 0.0..=1.0.
    #[inline]
    pub fn luma_normalized(self) -> f32 {
        self.luma() / 255.0
    }
}

/// Rec. 601 luma of a float color in the 0.0..=255.0 range.
#[inline]
pub fn luma_f32(c: [f32; 3]) -> f32 {
    (LUMA_R as f32 * c[0] + LUMA_G as f32 * c[1] + LUMA_B as f32 * c[2]) / 1000.0
}

/// Squared Euclidean distance between two colors in RGB channel space.
///
/// # Example
/// ```
/// use retro_dither::color::distance_sq;
/// use retro_dither::Rgb;
/// assert_eq!(distance_sq(Rgb::gray(0), Rgb::new(3, 4, 0)), 25);
/// ```
#[inline]
pub fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Squared Euclidean distance between a float color and a palette color.
#[inline]
pub fn distance_sq_f32(a: [f32; 3], b: Rgb) -> f32 {
    let dr = a[0] - b.r as f32;
    let dg = a[1] - b.g as f32;
    let db = a[2] - b.b as f32;
    dr * dr + dg * dg + db * db
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}
