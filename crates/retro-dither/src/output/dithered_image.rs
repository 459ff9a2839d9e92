//! DitheredImage: palette indices plus the palette they index.
//!
//! [`DitheredImage`] wraps the output of a [`Dither`](crate::Dither) pass
//! with dimension metadata and the palette, and turns it back into pixels
//! on demand.

use std::borrow::Cow;

use crate::palette::Palette;
use crate::raster::Raster;

/// The output of a quantizing dither pass.
///
/// Stores one `u8` palette index per pixel in row-major order, along with
/// image dimensions and the palette used for dithering.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use retro_dither::{DitheredImage, Palette, Raster, Rgb};
///
/// let palette = Palette::grayscale(2).unwrap();
///
/// // Simulate a 2x2 checkerboard dither result
/// let image = DitheredImage::new(vec![0, 1, 1, 0], 2, 2, Cow::Owned(palette));
/// assert_eq!(image.indices(), &[0, 1, 1, 0]);
///
/// let source = Raster::filled(2, 2, Rgb::gray(128));
/// let raster = image.to_raster(&source);
/// assert_eq!(raster.rgb(1, 0), Rgb::gray(255));
/// ```
pub struct DitheredImage<'p> {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Cow<'p, Palette>,
}

impl<'p> DitheredImage<'p> {
    /// Create a new `DitheredImage` from dithered palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        palette: Cow<'p, Palette>,
    ) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
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
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pixels in the layout of `source`.
    ///
    /// Color channels come from the palette; an RGBA source keeps its alpha
    /// channel unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `source` has different dimensions.
    pub fn to_raster(&self, source: &Raster) -> Raster {
        assert_eq!(
            (source.width(), source.height()),
            (self.width, self.height),
            "source raster dimensions differ from the dithered image"
        );
        let mut out = source.clone();
        for (i, &idx) in self.indices.iter().enumerate() {
            out.set_rgb(i % self.width, i / self.width, self.palette.color(idx as usize));
        }
        debug_assert_eq!(out.channels(), source.channels());
        out
    }
}
