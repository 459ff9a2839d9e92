//! Ordered (Bayer) dithering.
//!
//! Each pixel is biased by a position-dependent threshold from a tiled
//! [`BayerMatrix`] and then quantized on its own. No state crosses pixel
//! boundaries, so rows are processed in parallel.

use rayon::prelude::*;

use crate::api::ParamError;
use crate::palette::Palette;
use crate::raster::Raster;

use super::{BayerMatrix, Dither};

/// Ordered dithering with a Bayer matrix.
///
/// For pixel `(x, y)` with threshold `t = matrix[y % side][x % side]`,
/// every channel is shifted by `(t - 0.5) * spread` before quantizing,
/// where `spread` is [`Palette::ordered_spread`]: one quantization step
/// of the palette's luma range.
///
/// # Example
///
/// ```
/// use retro_dither::{Dither, Ordered, Palette, Raster, Rgb};
///
/// let palette = Palette::grayscale(2).unwrap();
/// let raster = Raster::filled(4, 4, Rgb::gray(128));
/// let indices = Ordered::new(2).unwrap().dither(&raster, &palette);
/// // Mid gray lights exactly half of the 4x4 matrix cells
/// assert_eq!(indices.iter().filter(|&&i| i == 1).count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ordered {
    matrix: &'static BayerMatrix,
}

impl Ordered {
    /// Ordered ditherer with a `2^bayer_size` matrix.
    ///
    /// # Errors
    ///
    /// [`ParamError::BayerSizeOutOfRange`] unless `1 <= bayer_size <= 4`.
    pub fn new(bayer_size: i64) -> Result<Self, ParamError> {
        Ok(Self {
            matrix: BayerMatrix::for_size(bayer_size)?,
        })
    }

    pub fn matrix(&self) -> &'static BayerMatrix {
        self.matrix
    }
}

impl Dither for Ordered {
    fn dither(&self, raster: &Raster, palette: &Palette) -> Vec<u8> {
        let width = raster.width();
        let mut output = vec![0u8; raster.len()];
        if output.is_empty() {
            return output;
        }
        let spread = palette.ordered_spread();

        output
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let bias = (self.matrix.get(x, y) - 0.5) * spread;
                    let c = raster.rgb(x, y).to_f32();
                    let biased = [
                        (c[0] + bias).clamp(0.0, 255.0),
                        (c[1] + bias).clamp(0.0, 255.0),
                        (c[2] + bias).clamp(0.0, 255.0),
                    ];
                    *out = palette.nearest_f32(biased) as u8;
                }
            });

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_solid_extremes_unchanged() {
        let palette = Palette::grayscale(2).unwrap();
        let ordered = Ordered::new(3).unwrap();
        let black = Raster::filled(9, 9, Rgb::gray(0));
        let white = Raster::filled(9, 9, Rgb::gray(255));
        assert!(ordered.dither(&black, &palette).iter().all(|&i| i == 0));
        assert!(ordered.dither(&white, &palette).iter().all(|&i| i == 1));
    }

    #[test]
    fn test_exact_palette_colors_survive() {
        for levels in [2, 3, 4, 16] {
            let palette = Palette::grayscale(levels).unwrap();
            for size in 1..=4 {
                let ordered = Ordered::new(size).unwrap();
                for (index, &color) in palette.colors().iter().enumerate() {
                    let raster = Raster::filled(16, 16, color);
                    assert!(
                        ordered.dither(&raster, &palette).iter().all(|&i| i as usize == index),
                        "levels={} size={} index={}",
                        levels,
                        size,
                        index
                    );
                }
            }
        }
    }

    #[test]
    fn test_pattern_follows_matrix() {
        // Against black/white, mid gray turns a pixel white exactly when
        // its threshold is at least one half.
        let palette = Palette::grayscale(2).unwrap();
        let ordered = Ordered::new(1).unwrap();
        let raster = Raster::filled(2, 2, Rgb::gray(128));
        // 2x2 thresholds: [0.125, 0.625; 0.875, 0.375]
        assert_eq!(ordered.dither(&raster, &palette), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_brightness_tracks_input() {
        let palette = Palette::grayscale(2).unwrap();
        let ordered = Ordered::new(4).unwrap();
        let raster = Raster::filled(16, 16, Rgb::gray(64));
        let white = ordered
            .dither(&raster, &palette)
            .iter()
            .filter(|&&i| i == 1)
            .count();
        // 64/255 of 256 cells, give or take one threshold step
        assert!((63..=66).contains(&white), "white={}", white);
    }

    #[test]
    fn test_matches_serial_reference() {
        let palette = Palette::grayscale(4).unwrap();
        let ordered = Ordered::new(2).unwrap();
        let mut raster = Raster::black(13, 5);
        for y in 0..5 {
            for x in 0..13 {
                raster.set_rgb(x, y, Rgb::new((x * 19) as u8, (y * 50) as u8, 77));
            }
        }
        let spread = palette.ordered_spread();
        let mut expected = Vec::new();
        for y in 0..5 {
            for x in 0..13 {
                let bias = (ordered.matrix().get(x, y) - 0.5) * spread;
                let c = raster.rgb(x, y).to_f32();
                let biased = c.map(|v| (v + bias).clamp(0.0, 255.0));
                expected.push(palette.nearest_f32(biased) as u8);
            }
        }
        assert_eq!(ordered.dither(&raster, &palette), expected);
    }

    #[test]
    fn test_empty_raster() {
        let palette = Palette::grayscale(2).unwrap();
        let raster = Raster::black(0, 3);
        assert!(Ordered::new(1).unwrap().dither(&raster, &palette).is_empty());
    }
}
