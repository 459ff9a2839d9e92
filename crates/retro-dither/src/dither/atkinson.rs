//! Atkinson error diffusion dithering algorithm.
//!
//! Bill Atkinson's kernel for the original Macintosh. Only 75% of the
//! quantization error is passed on, so highlights and shadows stay clean
//! at the cost of some mid-tone detail.

use crate::palette::Palette;
use crate::raster::Raster;

use super::{dither_with_kernel, Dither, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// # Algorithm
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbor receives 1/8 of the error; the remaining 2/8 is dropped.
///
/// # Example
///
/// ```
/// use retro_dither::{Atkinson, Dither, Palette, Raster, Rgb};
///
/// let palette = Palette::grayscale(2).unwrap();
/// let raster = Raster::filled(4, 4, Rgb::gray(128));
/// let indices = Atkinson.dither(&raster, &palette);
/// assert!(indices.iter().all(|&i| i < 2));
/// ```
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Vec<u8> {
        dither_with_kernel(raster, palette, &ATKINSON)
    }
}
