//! Dithering algorithms.
//!
//! Three families reduce a raster to palette indices:
//!
//! - **Error diffusion** ([`FloydSteinberg`], [`Atkinson`]): serial, each
//!   pixel's quantization error is pushed onto its unvisited neighbors.
//! - **Ordered** ([`Ordered`]): a tiled [`BayerMatrix`] biases each pixel
//!   before quantizing. Pixels are independent.
//! - **Threshold** ([`Threshold`]): one global luma cutoff between the
//!   darkest and lightest palette entries.
//!
//! # Architecture
//!
//! All algorithms implement the [`Dither`] trait and return one palette
//! index per pixel in row-major order.
//!
//! # Example
//!
//! ```
//! use retro_dither::{Atkinson, Dither, Palette, Raster, Rgb};
//!
//! let palette = Palette::grayscale(2).unwrap();
//! let raster = Raster::filled(4, 4, Rgb::gray(128));
//!
//! let indices: Vec<u8> = Atkinson.dither(&raster, &palette);
//! assert_eq!(indices.len(), 16);
//! ```

mod atkinson;
mod bayer;
mod floyd_steinberg;
mod kernel;
mod ordered;
mod threshold;

pub use atkinson::Atkinson;
pub use bayer::{BayerMatrix, DEFAULT_BAYER_SIZE, MAX_BAYER_SIZE, MIN_BAYER_SIZE};
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use ordered::Ordered;
pub use threshold::{Threshold, DEFAULT_THRESHOLD};

use crate::palette::Palette;
use crate::raster::Raster;

/// Trait for dithering algorithms.
///
/// Implementors reduce a raster to indices into `palette`.
///
/// # Error Diffusion
///
/// The diffusion algorithms work by:
/// 1. For each pixel, find the nearest palette color
/// 2. Compute the quantization error (desired - actual)
/// 3. Distribute that error to neighboring unprocessed pixels
/// 4. Repeat, with accumulated error influencing future decisions
pub trait Dither {
    /// Dither a raster to palette indices.
    ///
    /// # Returns
    ///
    /// A `Vec<u8>` of palette indices, one per pixel, in row-major order.
    /// Each index is in the range `0..palette.len()`. Alpha is ignored.
    fn dither(&self, raster: &Raster, palette: &Palette) -> Vec<u8>;
}

/// Error accumulator for one diffusion pass.
///
/// Covers the whole image, one `[f32; 3]` per pixel, and lives for exactly
/// one call of [`dither_with_kernel`].
#[derive(Debug)]
pub struct ErrorBuffer {
    errors: Vec<[f32; 3]>,
    width: usize,
    height: usize,
}

impl ErrorBuffer {
    /// Create a zeroed buffer for a `width` x `height` image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            errors: vec![[0.0; 3]; width * height],
            width,
            height,
        }
    }

    /// Error accumulated so far for pixel `(x, y)`.
    #[inline]
    pub fn get_accumulated(&self, x: usize, y: usize) -> [f32; 3] {
        self.errors[y * self.width + x]
    }

    /// Add error to pixel `(x, y)`.
    ///
    /// Silently ignores out-of-bounds coordinates, which is how the kernel
    /// is clipped at the image border.
    #[inline]
    pub fn add_error(&mut self, x: i64, y: i64, error: [f32; 3]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let cell = &mut self.errors[y as usize * self.width + x as usize];
        for c in 0..3 {
            cell[c] += error[c];
        }
    }

    /// Sum of all stored error, per channel.
    pub fn total(&self) -> [f32; 3] {
        self.errors.iter().fold([0.0; 3], |acc, e| {
            [acc[0] + e[0], acc[1] + e[1], acc[2] + e[2]]
        })
    }
}

/// Spread `error` from pixel `(x, y)` to its neighbors using `kernel`.
#[inline]
pub(crate) fn diffuse(
    buffer: &mut ErrorBuffer,
    kernel: &Kernel,
    x: usize,
    y: usize,
    error: [f32; 3],
) {
    let divisor = kernel.divisor as f32;
    for &(dx, dy, weight) in kernel.entries {
        let share = weight as f32 / divisor;
        buffer.add_error(
            x as i64 + dx as i64,
            y as i64 + dy as i64,
            [error[0] * share, error[1] * share, error[2] * share],
        );
    }
}

/// Core error diffusion loop shared by all kernels.
///
/// Scans strictly row-major, left to right, top to bottom. Each pixel is
/// the source color plus accumulated error, clamped to 0..=255, then
/// quantized; the difference between the clamped value and the chosen
/// entry is diffused.
pub(crate) fn dither_with_kernel(
    raster: &Raster,
    palette: &Palette,
    kernel: &Kernel,
) -> Vec<u8> {
    let width = raster.width();
    let height = raster.height();
    let mut output = vec![0u8; width * height];
    let mut errors = ErrorBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let source = raster.rgb(x, y).to_f32();
            let accumulated = errors.get_accumulated(x, y);
            let pixel = [
                (source[0] + accumulated[0]).clamp(0.0, 255.0),
                (source[1] + accumulated[1]).clamp(0.0, 255.0),
                (source[2] + accumulated[2]).clamp(0.0, 255.0),
            ];

            let nearest = palette.nearest_f32(pixel);
            output[y * width + x] = nearest as u8;

            let chosen = palette.color(nearest).to_f32();
            let error = [
                pixel[0] - chosen[0],
                pixel[1] - chosen[1],
                pixel[2] - chosen[2],
            ];
            diffuse(&mut errors, kernel, x, y, error);
        }
    }

    output
}
