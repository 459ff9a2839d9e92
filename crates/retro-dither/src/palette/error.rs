//! Error types for palette operations
//!
//! This module provides the error type for palette construction and
//! palette selection from request parameters.

use std::fmt;

/// Error type for palette validation.
///
/// Returned when a palette cannot be built, either because the requested
/// kind or level count is invalid or because an explicit color list is
/// malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No colors provided in palette
    EmptyPalette,
    /// Duplicate color found at the specified index
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Grayscale level count outside `2..=16`
    LevelsOutOfRange {
        /// The rejected level count
        levels: i64,
    },
    /// Palette type name not recognized
    UnknownKind(String),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => {
                write!(f, "palette cannot be empty")
            }
            PaletteError::DuplicateColor { index } => {
                write!(f, "duplicate color found at index {}", index)
            }
            PaletteError::LevelsOutOfRange { levels } => {
                write!(f, "levels must be between 2 and 16, got {}", levels)
            }
            PaletteError::UnknownKind(name) => {
                write!(
                    f,
                    "unknown palette type '{}' (expected grayscale, gameboy, nes or cga)",
                    name
                )
            }
        }
    }
}

impl std::error::Error for PaletteError {}
