//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Floyd-Steinberg is the most widely known error diffusion algorithm.
//! It distributes 100% of the quantization error to 4 neighbors.

use crate::palette::Palette;
use crate::raster::Raster;

use super::{dither_with_kernel, Dither, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
///
/// # Example
///
/// ```
/// use retro_dither::{Dither, FloydSteinberg, Palette, Raster, Rgb};
///
/// let palette = Palette::grayscale(2).unwrap();
/// let raster = Raster::filled(2, 2, Rgb::gray(128));
/// assert_eq!(FloydSteinberg.dither(&raster, &palette), vec![1, 0, 0, 1]);
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Vec<u8> {
        dither_with_kernel(raster, palette, &FLOYD_STEINBERG)
    }
}
