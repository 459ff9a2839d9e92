//! Colors and magnification for rendered glyph art.

use crate::api::ParamError;
use crate::color::Rgb;

/// Largest accepted glyph art scale.
pub const MAX_ASCII_SCALE: i64 = 8;

/// How lit and unlit glyph pixels are painted.
///
/// Each source pixel becomes a `scale x scale` block, so the output is
/// `scale` times the input size on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    scale: usize,
}

impl Default for AsciiStyle {
    /// White glyphs on black at 1x.
    fn default() -> Self {
        Self {
            fg: Rgb::gray(255),
            bg: Rgb::gray(0),
            scale: 1,
        }
    }
}

impl AsciiStyle {
    /// Build a style from optional hex colors and scale.
    ///
    /// Omitted values keep the white-on-black, 1x defaults.
    ///
    /// # Errors
    ///
    /// - [`ParamError::InvalidColor`] if a color is not `RRGGBB` hex
    /// - [`ParamError::AsciiScaleOutOfRange`] unless `1 <= scale <= 8`
    ///
    /// # Example
    ///
    /// ```
    /// use retro_dither::{AsciiStyle, Rgb};
    ///
    /// let crt = AsciiStyle::parse(Some("#33ff33"), None, Some(2)).unwrap();
    /// assert_eq!(crt.fg, Rgb::new(0x33, 0xFF, 0x33));
    /// assert_eq!(crt.bg, Rgb::gray(0));
    /// assert_eq!(crt.scale(), 2);
    /// assert!(AsciiStyle::parse(None, Some("teal"), None).is_err());
    /// ```
    pub fn parse(
        fg: Option<&str>,
        bg: Option<&str>,
        scale: Option<i64>,
    ) -> Result<Self, ParamError> {
        let defaults = Self::default();
        let scale = scale.unwrap_or(1);
        if !(1..=MAX_ASCII_SCALE).contains(&scale) {
            return Err(ParamError::AsciiScaleOutOfRange(scale));
        }
        Ok(Self {
            fg: fg.map(parse_hex).transpose()?.unwrap_or(defaults.fg),
            bg: bg.map(parse_hex).transpose()?.unwrap_or(defaults.bg),
            scale: scale as usize,
        })
    }

    pub fn scale(&self) -> usize {
        self.scale
    }
}

fn parse_hex(text: &str) -> Result<Rgb, ParamError> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParamError::InvalidColor(text.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(Rgb::from_hex)
        .map_err(|_| ParamError::InvalidColor(text.to_string()))
}
