//! ASCII art rendering.
//!
//! The raster is split into 8x8 cells. Each cell is reduced to its mean
//! Rec. 601 luma and, optionally, a dominant edge orientation from a Sobel
//! pass. Edge cells get a directional glyph, all others a glyph from the
//! set's density ramp. Glyphs are drawn with an [`AsciiStyle`], white on
//! black at 1x unless configured otherwise.
//!
//! Cells at the right and bottom border may be partial; they are analysed
//! over the pixels they cover and their glyphs are clipped, so the output
//! always has the input's dimensions times the style's scale.
//!
//! # Example
//!
//! ```
//! use retro_dither::{AsciiRenderer, AsciiSet, Raster, Rgb};
//!
//! let raster = Raster::filled(16, 8, Rgb::gray(255));
//! let renderer = AsciiRenderer::new(AsciiSet::Basic, true);
//! assert_eq!(renderer.render_text(&raster), "@@");
//! assert_eq!(renderer.render(&raster).width(), 16);
//! ```

mod edges;
mod font;
mod glyphs;
mod style;

pub use edges::{EdgeDirection, EDGE_PIXELS_PER_CELL, EDGE_THRESHOLD};
pub use glyphs::{AsciiSet, Glyph, GlyphSet, DEFAULT_ASCII_SET, GLYPH_SIZE};
pub use style::{AsciiStyle, MAX_ASCII_SCALE};

use rayon::prelude::*;

use crate::raster::{Channels, Raster};
use edges::{required_edge_pixels, EdgeTally};

/// Cell side in pixels; equal to the glyph size.
pub const CELL_SIZE: usize = GLYPH_SIZE;

/// Analysis result for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Mean normalized luma, 0.0..=1.0
    pub mean: f32,
    /// Dominant edge orientation, for edge cells
    pub edge: Option<EdgeDirection>,
}

/// Cells of a raster in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<Cell>,
}

/// Renders rasters as glyph art with one [`AsciiSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsciiRenderer {
    set: AsciiSet,
    detect_edges: bool,
    style: AsciiStyle,
}

impl AsciiRenderer {
    pub fn new(set: AsciiSet, detect_edges: bool) -> Self {
        Self {
            set,
            detect_edges,
            style: AsciiStyle::default(),
        }
    }

    /// Same renderer, painting with `style`.
    pub fn with_style(self, style: AsciiStyle) -> Self {
        Self { style, ..self }
    }

    pub fn style(&self) -> AsciiStyle {
        self.style
    }

    pub fn set(&self) -> AsciiSet {
        self.set
    }

    pub fn detect_edges(&self) -> bool {
        self.detect_edges
    }

    /// Analyse every cell of `raster`.
    ///
    /// Cell rows are processed in parallel; each cell reads only the shared
    /// luma plane, so the result does not depend on scheduling.
    pub fn cells(&self, raster: &Raster) -> CellGrid {
        let width = raster.width();
        let height = raster.height();
        let cols = width.div_ceil(CELL_SIZE);
        let rows = height.div_ceil(CELL_SIZE);
        if cols == 0 || rows == 0 {
            return CellGrid {
                cols,
                rows,
                cells: Vec::new(),
            };
        }

        let luma: Vec<f32> = raster.luma_plane().into_iter().map(|l| l / 255.0).collect();
        let mut cells = vec![
            Cell {
                mean: 0.0,
                edge: None
            };
            cols * rows
        ];

        cells
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(cy, row)| {
                for (cx, cell) in row.iter_mut().enumerate() {
                    *cell = self.analyse_cell(&luma, width, height, cx, cy);
                }
            });

        CellGrid { cols, rows, cells }
    }

    fn analyse_cell(&self, luma: &[f32], width: usize, height: usize, cx: usize, cy: usize) -> Cell {
        let x0 = cx * CELL_SIZE;
        let y0 = cy * CELL_SIZE;
        let x1 = (x0 + CELL_SIZE).min(width);
        let y1 = (y0 + CELL_SIZE).min(height);
        let covered = (x1 - x0) * (y1 - y0);

        let mut sum = 0.0;
        let mut tally = EdgeTally::default();
        for y in y0..y1 {
            for x in x0..x1 {
                sum += luma[y * width + x];
                if self.detect_edges {
                    tally.observe(luma, width, height, x, y);
                }
            }
        }

        let edge = if self.detect_edges {
            tally.direction(required_edge_pixels(covered, CELL_SIZE * CELL_SIZE))
        } else {
            None
        };
        Cell {
            mean: sum / covered as f32,
            edge,
        }
    }

    fn glyph_for(&self, cell: &Cell) -> &'static Glyph {
        let glyphs = self.set.glyphs();
        match cell.edge {
            Some(direction) => glyphs.edge_glyph(direction),
            None => glyphs.density_glyph(cell.mean),
        }
    }

    /// Render `raster` as an RGB raster, `scale` times its size.
    pub fn render(&self, raster: &Raster) -> Raster {
        let scale = self.style.scale();
        let width = raster.width() * scale;
        let height = raster.height() * scale;
        let grid = self.cells(raster);
        let mut out = Raster::filled(width, height, self.style.bg);
        if out.is_empty() {
            return out;
        }

        let fg = [self.style.fg.r, self.style.fg.g, self.style.fg.b];
        let band_len = width * CELL_SIZE * scale * Channels::Rgb.count();
        out.data_mut()
            .par_chunks_mut(band_len)
            .enumerate()
            .for_each(|(cy, band)| {
                let glyphs: Vec<&Glyph> = grid.cells[cy * grid.cols..(cy + 1) * grid.cols]
                    .iter()
                    .map(|cell| self.glyph_for(cell))
                    .collect();
                for (oy, row) in band.chunks_exact_mut(width * 3).enumerate() {
                    let gy = oy / scale;
                    for (ox, px) in row.chunks_exact_mut(3).enumerate() {
                        let x = ox / scale;
                        if glyphs[x / CELL_SIZE].is_lit(x % CELL_SIZE, gy) {
                            px.copy_from_slice(&fg);
                        }
                    }
                }
            });

        out
    }

    /// One character per cell, cell rows separated by `\n`.
    pub fn render_text(&self, raster: &Raster) -> String {
        let grid = self.cells(raster);
        let mut text = String::with_capacity(grid.cells.len() + grid.rows);
        for (i, row) in grid.cells.chunks(grid.cols.max(1)).enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.extend(row.iter().map(|cell| self.glyph_for(cell).ch()));
        }
        text
    }
}
