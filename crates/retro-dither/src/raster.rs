//! In-memory pixel rasters.
//!
//! A [`Raster`] is the unit every ditherer consumes and produces: a
//! row-major 8-bit buffer with either three (RGB) or four (RGBA) channels.

use std::fmt;

use crate::color::Rgb;

/// Channel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Three channels per pixel
    Rgb,
    /// Four channels per pixel, alpha last
    Rgba,
}

impl Channels {
    /// Bytes per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Returns true if the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// Error returned when a buffer does not match the raster dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// `data.len()` differs from `width * height * channels`
    BufferLength {
        /// Expected byte count
        expected: usize,
        /// Byte count actually supplied
        actual: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::BufferLength { expected, actual } => write!(
                f,
                "pixel buffer holds {} bytes but the raster needs {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for RasterError {}

/// A row-major 8-bit image buffer.
///
/// The buffer length always equals `width * height * channels.count()`;
/// every constructor checks it and there is no way to resize the buffer
/// afterwards.
///
/// # Example
///
/// ```
/// use retro_dither::{Channels, Raster, Rgb};
///
/// let mut raster = Raster::filled(2, 1, Rgb::gray(0));
/// raster.set_rgb(1, 0, Rgb::gray(255));
/// assert_eq!(raster.channels(), Channels::Rgb);
/// assert_eq!(raster.data(), &[0, 0, 0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// [`RasterError::BufferLength`] if the buffer length does not match the
    /// dimensions and channel layout.
    pub fn new(
        width: usize,
        height: usize,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(RasterError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// An RGB raster with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let data = std::iter::repeat([color.r, color.g, color.b])
            .take(width * height)
            .flatten()
            .collect();
        Self {
            width,
            height,
            channels: Channels::Rgb,
            data,
        }
    }

    /// An RGB raster of black pixels.
    pub fn black(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            channels: Channels::Rgb,
            data: vec![0; width * height * 3],
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
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes in row-major order.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes. The length is fixed.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels.count()
    }

    /// Color of the pixel at `(x, y)`, alpha dropped.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> Rgb {
        let o = self.offset(x, y);
        Rgb::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Alpha of the pixel at `(x, y)`; 255 for RGB rasters.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        match self.channels {
            Channels::Rgb => 255,
            Channels::Rgba => self.data[self.offset(x, y) + 3],
        }
    }

    /// Overwrite the color channels of `(x, y)`, leaving alpha untouched.
    #[inline]
    pub fn set_rgb(&mut self, x: usize, y: usize, color: Rgb) {
        let o = self.offset(x, y);
        self.data[o] = color.r;
        self.data[o + 1] = color.g;
        self.data[o + 2] = color.b;
    }

    /// Every pixel color in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(self.channels.count())
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Per-pixel Rec. 601 luma in 0.0..=255.0, row-major.
    pub fn luma_plane(&self) -> Vec<f32> {
        self.pixels().map(Rgb::luma).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(Raster::new(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
        assert!(Raster::new(2, 2, Channels::Rgba, vec![0; 16]).is_ok());
        assert_eq!(
            Raster::new(2, 2, Channels::Rgba, vec![0; 12]),
            Err(RasterError::BufferLength {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_zero_sized_raster() {
        let raster = Raster::new(0, 5, Channels::Rgb, Vec::new()).unwrap();
        assert!(raster.is_empty());
        assert_eq!(raster.pixels().count(), 0);
    }

    #[test]
    fn test_rgba_accessors() {
        let data = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let mut raster = Raster::new(2, 1, Channels::Rgba, data).unwrap();
        assert_eq!(raster.rgb(1, 0), Rgb::new(50, 60, 70));
        assert_eq!(raster.alpha(1, 0), 80);

        raster.set_rgb(1, 0, Rgb::gray(255));
        assert_eq!(raster.data(), &[10, 20, 30, 40, 255, 255, 255, 80]);
    }

    #[test]
    fn test_rgb_alpha_is_opaque() {
        let raster = Raster::filled(1, 1, Rgb::gray(9));
        assert_eq!(raster.alpha(0, 0), 255);
    }

    #[test]
    fn test_pixels_row_major() {
        let mut raster = Raster::black(2, 2);
        raster.set_rgb(0, 1, Rgb::new(1, 2, 3));
        let pixels: Vec<Rgb> = raster.pixels().collect();
        assert_eq!(pixels[2], Rgb::new(1, 2, 3));
        assert_eq!(pixels[3], Rgb::gray(0));
    }
}
