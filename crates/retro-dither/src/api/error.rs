//! Parameter validation errors.
//!
//! [`ParamError`] covers every way a dithering request can name a value
//! outside its documented range. Each variant carries the offending value
//! so callers can report it verbatim.

use crate::palette::PaletteError;
use std::fmt;

/// A dithering parameter is missing, unknown or out of range.
///
/// # Example
///
/// ```
/// use retro_dither::{DitherAlgorithm, ParamError};
///
/// let err = DitherAlgorithm::parse("ordered", Some(5), None, None, None).unwrap_err();
/// assert_eq!(err, ParamError::BayerSizeOutOfRange(5));
/// assert_eq!(err.to_string(), "bayer_size must be between 1 and 4, got 5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Palette type or level count invalid
    Palette(PaletteError),
    /// Algorithm name not recognized
    UnknownAlgorithm(String),
    /// `bayer_size` outside `1..=4`
    BayerSizeOutOfRange(i64),
    /// `threshold` outside `0.0..=1.0` or not finite
    ThresholdOutOfRange(f64),
    /// `ascii_set` outside `0..=7`
    AsciiSetOutOfRange(i64),
    /// Glyph art scale outside `1..=8`
    AsciiScaleOutOfRange(i64),
    /// A color that is not `RRGGBB` hex, with or without `#`
    InvalidColor(String),
    /// A palette-based algorithm was requested without a palette
    MissingPalette,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Palette(err) => write!(f, "{}", err),
            ParamError::UnknownAlgorithm(name) => write!(
                f,
                "unknown dither algorithm '{}' (expected floyd, atkinson, ordered, threshold or ascii)",
                name
            ),
            ParamError::BayerSizeOutOfRange(size) => {
                write!(f, "bayer_size must be between 1 and 4, got {}", size)
            }
            ParamError::ThresholdOutOfRange(t) => {
                write!(f, "threshold must be between 0.0 and 1.0, got {}", t)
            }
            ParamError::AsciiSetOutOfRange(set) => {
                write!(f, "ascii_set must be between 0 and 7, got {}", set)
            }
            ParamError::AsciiScaleOutOfRange(scale) => {
                write!(f, "scale must be between 1 and 8, got {}", scale)
            }
            ParamError::InvalidColor(color) => {
                write!(f, "invalid color '{}' (expected RRGGBB hex)", color)
            }
            ParamError::MissingPalette => {
                write!(f, "a palette is required unless the algorithm is ascii")
            }
        }
    }
}

impl std::error::Error for ParamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for ParamError {
    fn from(err: PaletteError) -> Self {
        ParamError::Palette(err)
    }
}
