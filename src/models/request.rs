use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Palette selection
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaletteSpec {
    /// Palette kind: `grayscale`, `gameboy`, `nes` or `cga`
    #[serde(rename = "type")]
    #[schema(example = "grayscale")]
    pub kind: String,

    /// Number of gray levels (grayscale only, 2..=16, default 4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<i64>,
}

/// Algorithm selection with its parameters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DitherSpec {
    /// `floyd`, `atkinson`, `ordered`, `threshold` or `ascii`
    #[schema(example = "floyd")]
    pub algorithm: String,

    /// Bayer matrix size exponent for `ordered` (1..=4, default 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bayer_size: Option<i64>,

    /// Luma cutoff for `threshold` (0.0..=1.0, default 0.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Glyph set for `ascii` (0..=7, default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii_set: Option<i64>,

    /// Directional glyphs on strong edges for `ascii` (default true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect_edges: Option<bool>,
}

/// Request body for `POST /api/dither`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DitherRequest {
    /// Base64 source image, optionally as a `data:` URL
    pub image: String,

    /// Target palette; required unless the algorithm is `ascii`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteSpec>,

    pub dither: DitherSpec,
}

/// Response body for `POST /api/dither`
///
/// Exactly one of `image` and `error` is present.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq)]
pub struct DitherResponse {
    pub success: bool,

    /// Base64 PNG result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Human-readable failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl DitherResponse {
    pub fn success(image: String, width: u32, height: u32) -> Self {
        Self {
            success: true,
            image: Some(image),
            error: None,
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            image: None,
            error: Some(error.into()),
            width: None,
            height: None,
        }
    }
}
