//! DitherJob -- the validated entry point for the crate.
//!
//! A [`DitherJob`] pairs a [`DitherAlgorithm`] with the palette it needs.
//! Every parameter is checked when the job is built, so [`DitherJob::apply`]
//! cannot fail.

use std::borrow::Cow;
use std::fmt;

use super::ParamError;
use crate::ascii::{AsciiRenderer, AsciiSet, AsciiStyle, DEFAULT_ASCII_SET};
use crate::dither::{
    Atkinson, Dither, FloydSteinberg, Ordered, Threshold, DEFAULT_BAYER_SIZE, DEFAULT_THRESHOLD,
};
use crate::output::DitheredImage;
use crate::palette::{Palette, PaletteKind};
use crate::raster::Raster;

/// A validated algorithm selection with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion (`floyd`)
    FloydSteinberg,
    /// Atkinson error diffusion (`atkinson`)
    Atkinson,
    /// Bayer ordered dithering (`ordered`)
    Ordered(Ordered),
    /// Global luma cutoff (`threshold`)
    Threshold(Threshold),
    /// Glyph art (`ascii`); needs no palette
    Ascii(AsciiRenderer),
}

impl DitherAlgorithm {
    /// Build an algorithm from its wire name and optional parameters.
    ///
    /// Only the parameters of the named algorithm are read; the others are
    /// ignored. Omitted values default to `bayer_size` 2, `threshold` 0.5,
    /// `ascii_set` 1 and `detect_edges` true.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_dither::{AsciiSet, DitherAlgorithm, ParamError};
    ///
    /// let ascii = DitherAlgorithm::parse("ascii", None, None, Some(3), Some(false)).unwrap();
    /// match ascii {
    ///     DitherAlgorithm::Ascii(renderer) => {
    ///         assert_eq!(renderer.set(), AsciiSet::Simple);
    ///         assert!(!renderer.detect_edges());
    ///     }
    ///     _ => unreachable!(),
    /// }
    ///
    /// assert_eq!(
    ///     DitherAlgorithm::parse("threshold", None, Some(1.5), None, None),
    ///     Err(ParamError::ThresholdOutOfRange(1.5))
    /// );
    /// ```
    pub fn parse(
        name: &str,
        bayer_size: Option<i64>,
        threshold: Option<f64>,
        ascii_set: Option<i64>,
        detect_edges: Option<bool>,
    ) -> Result<Self, ParamError> {
        match name {
            "floyd" => Ok(DitherAlgorithm::FloydSteinberg),
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            "ordered" => Ok(DitherAlgorithm::Ordered(Ordered::new(
                bayer_size.unwrap_or(DEFAULT_BAYER_SIZE),
            )?)),
            "threshold" => Ok(DitherAlgorithm::Threshold(Threshold::new(
                threshold.unwrap_or(DEFAULT_THRESHOLD),
            )?)),
            "ascii" => {
                let set = match ascii_set {
                    Some(index) => AsciiSet::from_index(index)?,
                    None => DEFAULT_ASCII_SET,
                };
                Ok(DitherAlgorithm::Ascii(AsciiRenderer::new(
                    set,
                    detect_edges.unwrap_or(true),
                )))
            }
            other => Err(ParamError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// Wire name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::Ordered(_) => "ordered",
            DitherAlgorithm::Threshold(_) => "threshold",
            DitherAlgorithm::Ascii(_) => "ascii",
        }
    }

    /// Returns true for the glyph renderer, which bypasses quantization.
    pub fn is_ascii(&self) -> bool {
        matches!(self, DitherAlgorithm::Ascii(_))
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherAlgorithm::Ordered(o) => write!(f, "ordered({}x{})", o.matrix().side(), o.matrix().side()),
            DitherAlgorithm::Threshold(t) => write!(f, "threshold({})", t.threshold()),
            DitherAlgorithm::Ascii(r) => write!(
                f,
                "ascii({}, edges={})",
                r.set(),
                if r.detect_edges() { "on" } else { "off" }
            ),
            other => f.write_str(other.name()),
        }
    }
}

/// A fully validated dithering request.
///
/// # Example
///
/// ```
/// use retro_dither::{DitherAlgorithm, DitherJob, PaletteKind, Raster, Rgb};
///
/// let algorithm = DitherAlgorithm::parse("floyd", None, None, None, None).unwrap();
/// let job = DitherJob::new(Some(PaletteKind::Grayscale { levels: 2 }), algorithm).unwrap();
///
/// let out = job.apply(&Raster::filled(2, 2, Rgb::gray(128)));
/// assert_eq!(out.data(), &[255, 255, 255, 0, 0, 0, 0, 0, 0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct DitherJob {
    algorithm: DitherAlgorithm,
    stage: Stage,
}

/// What [`DitherJob::apply`] runs, resolved once by [`DitherJob::new`].
#[derive(Debug, Clone)]
enum Stage {
    Quantize {
        ditherer: Quantizer,
        kind: PaletteKind,
        palette: Cow<'static, Palette>,
    },
    Glyphs(AsciiRenderer),
}

#[derive(Debug, Clone, Copy)]
enum Quantizer {
    FloydSteinberg,
    Atkinson,
    Ordered(Ordered),
    Threshold(Threshold),
}

impl Quantizer {
    fn as_dither(&self) -> &dyn Dither {
        match self {
            Quantizer::FloydSteinberg => &FloydSteinberg,
            Quantizer::Atkinson => &Atkinson,
            Quantizer::Ordered(ordered) => ordered,
            Quantizer::Threshold(threshold) => threshold,
        }
    }
}

impl DitherJob {
    /// Validate a palette choice against an algorithm.
    ///
    /// ASCII rendering ignores any palette. Every other algorithm needs one.
    ///
    /// # Errors
    ///
    /// - [`ParamError::MissingPalette`] if a quantizing algorithm has no palette
    /// - [`ParamError::Palette`] if the palette cannot be built
    pub fn new(
        palette: Option<PaletteKind>,
        algorithm: DitherAlgorithm,
    ) -> Result<Self, ParamError> {
        let ditherer = match algorithm {
            DitherAlgorithm::Ascii(renderer) => {
                return Ok(Self {
                    algorithm,
                    stage: Stage::Glyphs(renderer),
                })
            }
            DitherAlgorithm::FloydSteinberg => Quantizer::FloydSteinberg,
            DitherAlgorithm::Atkinson => Quantizer::Atkinson,
            DitherAlgorithm::Ordered(ordered) => Quantizer::Ordered(ordered),
            DitherAlgorithm::Threshold(threshold) => Quantizer::Threshold(threshold),
        };
        let kind = palette.ok_or(ParamError::MissingPalette)?;
        Ok(Self {
            algorithm,
            stage: Stage::Quantize {
                ditherer,
                kind,
                palette: Palette::build(kind)?,
            },
        })
    }

    /// Paint ASCII output with `style`; quantizing jobs are unchanged.
    pub fn with_ascii_style(self, style: AsciiStyle) -> Self {
        match self.stage {
            Stage::Glyphs(renderer) => {
                let renderer = renderer.with_style(style);
                Self {
                    algorithm: DitherAlgorithm::Ascii(renderer),
                    stage: Stage::Glyphs(renderer),
                }
            }
            Stage::Quantize { .. } => self,
        }
    }

    pub fn algorithm(&self) -> &DitherAlgorithm {
        &self.algorithm
    }

    /// Palette kind in use; `None` for ASCII jobs.
    pub fn palette_kind(&self) -> Option<PaletteKind> {
        match &self.stage {
            Stage::Quantize { kind, .. } => Some(*kind),
            Stage::Glyphs(_) => None,
        }
    }

    /// Palette in use; `None` for ASCII jobs.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.stage {
            Stage::Quantize { palette, .. } => Some(palette.as_ref()),
            Stage::Glyphs(_) => None,
        }
    }

    /// Run the job on `raster`.
    ///
    /// Quantizing algorithms return a raster in the source layout with every
    /// color replaced by a palette entry (alpha preserved). ASCII returns an
    /// RGB raster of glyphs painted with the renderer's style.
    pub fn apply(&self, raster: &Raster) -> Raster {
        match &self.stage {
            Stage::Glyphs(renderer) => renderer.render(raster),
            Stage::Quantize {
                ditherer, palette, ..
            } => {
                let indices = ditherer.as_dither().dither(raster, palette);
                DitheredImage::new(
                    indices,
                    raster.width(),
                    raster.height(),
                    Cow::Borrowed(palette.as_ref()),
                )
                .to_raster(raster)
            }
        }
    }

    /// Text rendering of an ASCII job; `None` for quantizing jobs.
    pub fn render_text(&self, raster: &Raster) -> Option<String> {
        match &self.stage {
            Stage::Glyphs(renderer) => Some(renderer.render_text(raster)),
            Stage::Quantize { .. } => None,
        }
    }
}
