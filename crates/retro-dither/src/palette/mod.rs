//! Palette module for color palette management
//!
//! This module provides the [`Palette`] type, the [`PaletteKind`] selector
//! for the supported retro palettes, and the nearest-color quantizer.

mod error;
mod palette;
mod tables;

pub use error::PaletteError;
pub use palette::{Palette, PaletteKind, DEFAULT_LEVELS, MAX_LEVELS, MIN_LEVELS};
