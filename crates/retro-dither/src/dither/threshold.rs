//! Global threshold dithering.

use rayon::prelude::*;

use crate::api::ParamError;
use crate::palette::Palette;
use crate::raster::Raster;

use super::Dither;

/// Default cutoff when a request omits `threshold`.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Binary split on normalized luma.
///
/// A pixel maps to the palette's lightest entry when its normalized luma is
/// at least `threshold`, otherwise to the darkest entry. With a two-entry
/// palette those are simply the two colors.
///
/// # Example
///
/// ```
/// use retro_dither::{Dither, Palette, Raster, Rgb, Threshold};
///
/// let palette = Palette::grayscale(2).unwrap();
/// let raster = Raster::filled(1, 1, Rgb::gray(255));
/// assert_eq!(Threshold::new(0.5).unwrap().dither(&raster, &palette), vec![1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    threshold: f32,
}

impl Threshold {
    /// # Errors
    ///
    /// [`ParamError::ThresholdOutOfRange`] unless `threshold` is finite and
    /// within `0.0..=1.0`.
    pub fn new(threshold: f64) -> Result<Self, ParamError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ParamError::ThresholdOutOfRange(threshold));
        }
        Ok(Self {
            threshold: threshold as f32,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Dither for Threshold {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Vec<u8> {
        let width = raster.width();
        let mut output = vec![0u8; raster.len()];
        if output.is_empty() {
            return output;
        }
        let dark = palette.darkest() as u8;
        let light = palette.lightest() as u8;

        output
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = if raster.rgb(x, y).luma_normalized() >= self.threshold {
                        light
                    } else {
                        dark
                    };
                }
            });

        output
    }
}
