//! Palette struct with nearest-color matching.
//!
//! This module provides the core `Palette` type: an ordered, non-empty list
//! of distinct colors, plus the [`PaletteKind`] selector that builds the
//! palettes a request can ask for.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use super::error::PaletteError;
use super::tables;
use crate::color::{distance_sq, distance_sq_f32, Rgb};

/// Smallest grayscale level count accepted.
pub const MIN_LEVELS: u8 = 2;
/// Largest grayscale level count accepted.
pub const MAX_LEVELS: u8 = 16;
/// Level count used when a grayscale request omits `levels`.
pub const DEFAULT_LEVELS: u8 = 4;

/// The palettes a request can select.
///
/// Grayscale palettes are parameterized by their level count; the other
/// kinds are fixed tables of historical hardware colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    /// `levels` evenly spaced grays from black to white.
    Grayscale {
        /// Number of gray levels (2..=16)
        levels: u8,
    },
    /// The four green shades of the original Game Boy.
    GameBoy,
    /// The NES PPU color set.
    Nes,
    /// CGA mode 4, palette 0.
    Cga,
}

impl PaletteKind {
    /// Select a palette kind from its wire name and optional level count.
    ///
    /// `levels` is only meaningful for `grayscale` (defaulting to
    /// [`DEFAULT_LEVELS`]); the fixed kinds ignore it.
    ///
    /// # Example
    /// ```
    /// use retro_dither::PaletteKind;
    ///
    /// assert_eq!(
    ///     PaletteKind::parse("grayscale", Some(2)).unwrap(),
    ///     PaletteKind::Grayscale { levels: 2 }
    /// );
    /// assert!(PaletteKind::parse("grayscale", Some(17)).is_err());
    /// assert!(PaletteKind::parse("sepia", None).is_err());
    /// ```
    pub fn parse(name: &str, levels: Option<i64>) -> Result<Self, PaletteError> {
        match name {
            "grayscale" => {
                let levels = levels.unwrap_or(DEFAULT_LEVELS as i64);
                if !(MIN_LEVELS as i64..=MAX_LEVELS as i64).contains(&levels) {
                    return Err(PaletteError::LevelsOutOfRange { levels });
                }
                Ok(PaletteKind::Grayscale {
                    levels: levels as u8,
                })
            }
            "gameboy" => Ok(PaletteKind::GameBoy),
            "nes" => Ok(PaletteKind::Nes),
            "cga" => Ok(PaletteKind::Cga),
            other => Err(PaletteError::UnknownKind(other.to_string())),
        }
    }

    /// Wire name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Grayscale { .. } => "grayscale",
            PaletteKind::GameBoy => "gameboy",
            PaletteKind::Nes => "nes",
            PaletteKind::Cga => "cga",
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteKind::Grayscale { levels } => write!(f, "grayscale({})", levels),
            other => f.write_str(other.name()),
        }
    }
}

/// An ordered, non-empty set of distinct colors.
///
/// Order matters: the quantizer breaks distance ties in favour of the
/// earliest entry, which keeps every dithering path deterministic.
///
/// # Example
///
/// ```
/// use retro_dither::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::gray(0), Rgb::gray(255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.nearest(Rgb::gray(200)), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an explicit color list.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let mut seen = HashSet::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// `levels` evenly spaced grays across 0..=255, ascending.
    ///
    /// # Errors
    ///
    /// [`PaletteError::LevelsOutOfRange`] unless `2 <= levels <= 16`.
    pub fn grayscale(levels: u8) -> Result<Self, PaletteError> {
        if !(MIN_LEVELS..=MAX_LEVELS).contains(&levels) {
            return Err(PaletteError::LevelsOutOfRange {
                levels: levels as i64,
            });
        }
        let steps = (levels - 1) as u32;
        let colors = (0..levels as u32)
            .map(|i| Rgb::gray(((i * 255 + steps / 2) / steps) as u8))
            .collect();
        Ok(Self { colors })
    }

    /// Build the palette for `kind`.
    ///
    /// Fixed hardware palettes are built once per process and borrowed;
    /// grayscale palettes are built on demand.
    pub fn build(kind: PaletteKind) -> Result<Cow<'static, Palette>, PaletteError> {
        static GAMEBOY: OnceLock<Palette> = OnceLock::new();
        static NES: OnceLock<Palette> = OnceLock::new();
        static CGA: OnceLock<Palette> = OnceLock::new();

        let fixed = |cell: &'static OnceLock<Palette>, colors: &'static [Rgb]| {
            cell.get_or_init(|| Palette {
                colors: colors.to_vec(),
            })
        };

        Ok(match kind {
            PaletteKind::Grayscale { levels } => Cow::Owned(Self::grayscale(levels)?),
            PaletteKind::GameBoy => Cow::Borrowed(fixed(&GAMEBOY, &tables::GAMEBOY)),
            PaletteKind::Nes => Cow::Borrowed(fixed(&NES, &tables::NES)),
            PaletteKind::Cga => Cow::Borrowed(fixed(&CGA, &tables::CGA)),
        })
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; palettes are non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    /// Returns true if `color` is a member of this palette.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the entry closest to `color` (squared RGB distance).
    ///
    /// Ties resolve to the earliest index.
    pub fn nearest(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = distance_sq(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// Index of the entry closest to a float color in the 0.0..=255.0 range.
    ///
    /// Same metric and tie-breaking as [`Palette::nearest`].
    pub fn nearest_f32(&self, color: [f32; 3]) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = distance_sq_f32(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// Index of the entry with the lowest luma (earliest on ties).
    pub fn darkest(&self) -> usize {
        let mut best = 0;
        for (i, c) in self.colors.iter().enumerate() {
            if c.luma() < self.colors[best].luma() {
                best = i;
            }
        }
        best
    }

    /// Index of the entry with the highest luma (earliest on ties).
    pub fn lightest(&self) -> usize {
        let mut best = 0;
        for (i, c) in self.colors.iter().enumerate() {
            if c.luma() > self.colors[best].luma() {
                best = i;
            }
        }
        best
    }

    /// Luminance bias range for ordered dithering.
    ///
    /// The luma span of the palette divided by the number of gaps between
    /// entries, i.e. one quantization step for an evenly spaced palette.
    /// Single-color palettes use the full 0..=255 range.
    pub fn ordered_spread(&self) -> f32 {
        if self.colors.len() < 2 {
            return 255.0;
        }
        let span = self.color(self.lightest()).luma() - self.color(self.darkest()).luma();
        if span <= 0.0 {
            return 255.0;
        }
        span / (self.colors.len() - 1) as f32
    }
}
