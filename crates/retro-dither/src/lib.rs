#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! retro-dither: palette quantization and dithering for retro looks
//!
//! This library reduces an RGB(A) raster to one of a few historical
//! palettes, or renders it as 8x8 glyph art. It does no I/O: callers
//! decode images into a [`Raster`] and encode the result themselves.
//!
//! # Quick Start
//!
//! [`DitherJob`] validates a palette and algorithm choice once and then
//! applies it to any number of rasters:
//!
//! ```
//! use retro_dither::{DitherAlgorithm, DitherJob, PaletteKind, Raster, Rgb};
//!
//! let palette = PaletteKind::parse("gameboy", None).unwrap();
//! let algorithm = DitherAlgorithm::parse("ordered", Some(2), None, None, None).unwrap();
//! let job = DitherJob::new(Some(palette), algorithm).unwrap();
//!
//! let out = job.apply(&Raster::filled(8, 8, Rgb::gray(100)));
//! assert_eq!(out.width(), 8);
//! ```
//!
//! # Palettes
//!
//! [`PaletteKind`] selects one of:
//!
//! - `grayscale`: 2 to 16 evenly spaced grays
//! - `gameboy`: the four DMG-01 greens
//! - `nes`: the 55 distinct 2C02 PPU colors
//! - `cga`: mode 4 palette 0
//!
//! The fixed tables are built once per process and shared.
//!
//! # Algorithms
//!
//! - [`FloydSteinberg`], [`Atkinson`]: serial error diffusion. The scan
//!   order is part of the result and is never parallelized.
//! - [`Ordered`]: Bayer matrix bias, rows in parallel.
//! - [`Threshold`]: darkest or lightest entry by luma cutoff, rows in
//!   parallel.
//! - [`AsciiRenderer`]: per-cell density or edge glyphs, cell rows in
//!   parallel.
//!
//! Every path is deterministic: identical input yields identical output.
//!
//! # Quantization
//!
//! [`Palette::nearest`] picks the entry with the smallest squared RGB
//! distance. Ties go to the lowest index, so results never depend on
//! floating-point accident in the comparison.

pub mod api;
pub mod ascii;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod raster;


pub use api::{DitherAlgorithm, DitherJob, ParamError};
pub use ascii::{AsciiRenderer, AsciiSet, AsciiStyle, EdgeDirection};
pub use color::Rgb;
pub use dither::{Atkinson, BayerMatrix, Dither, FloydSteinberg, Ordered, Threshold};
pub use output::DitheredImage;
pub use palette::{Palette, PaletteError, PaletteKind};
pub use raster::{Channels, Raster, RasterError};
