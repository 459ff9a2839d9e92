//! Glyph sets for the ASCII renderer.
//!
//! Each [`AsciiSet`] resolves to a [`GlyphSet`]: a ramp of glyphs ordered
//! from least to most lit pixels, plus four directional glyphs for edge
//! cells. All eight sets are built once per process.

use std::fmt;
use std::sync::OnceLock;

use super::edges::EdgeDirection;
use super::font;
use crate::api::ParamError;

/// Glyph width and height in pixels.
pub const GLYPH_SIZE: usize = 8;

const BASIC_RAMP: &str = " .:-=+*#%@";
const EXTENDED_RAMP: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";
const ARTISTIC_RAMP: &str = " ░▒▓█";
const SIMPLE_RAMP: &str = ".#";
const RETRO_RAMP: &str = " █";

const TEXT_EDGES: [char; 4] = ['|', '-', '/', '\\'];
const BLOCK_EDGES: [char; 4] = ['▌', '▀', '▞', '▚'];

/// 8x8 bitmap for `ch`, if the font has one.
fn bitmap(ch: char) -> Option<[u8; 8]> {
    match ch {
        ' '..='~' => Some(font::BASIC[ch as usize - 0x20]),
        '\u{2580}'..='\u{259F}' => Some(font::BLOCK[ch as usize - 0x2580]),
        _ => None,
    }
}

/// A character and its 8x8 bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    ch: char,
    rows: [u8; 8],
    density: f32,
}

impl Glyph {
    fn new(ch: char) -> Option<Self> {
        let rows = bitmap(ch)?;
        let lit: u32 = rows.iter().map(|r| r.count_ones()).sum();
        Some(Self {
            ch,
            rows,
            density: lit as f32 / (GLYPH_SIZE * GLYPH_SIZE) as f32,
        })
    }

    #[inline]
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Fraction of lit pixels, 0.0..=1.0.
    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Whether the pixel at column `x`, row `y` of the glyph is lit.
    #[inline]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> x) & 1 == 1
    }
}

/// Density ramp plus directional glyphs for one [`AsciiSet`].
#[derive(Debug)]
pub struct GlyphSet {
    ramp: Vec<Glyph>,
    edges: [Glyph; 4],
}

impl GlyphSet {
    fn from_chars(ramp: impl IntoIterator<Item = char>, edges: [char; 4]) -> Self {
        let ramp = ramp.into_iter().filter_map(Glyph::new).collect();
        let edges = edges.map(|ch| Glyph::new(ch).unwrap_or(BLANK));
        Self { ramp, edges }
    }

    fn sorted_by_density(mut self) -> Self {
        // Stable: equal densities keep their source order
        self.ramp.sort_by(|a, b| a.density.total_cmp(&b.density));
        self
    }

    /// Glyphs from dark (few lit pixels) to light.
    pub fn ramp(&self) -> &[Glyph] {
        &self.ramp
    }

    /// Ramp glyph for a mean luma in 0.0..=1.0.
    ///
    /// Bucket `min(floor(mean * n), n - 1)` of an `n`-glyph ramp.
    pub fn density_glyph(&self, mean: f32) -> &Glyph {
        let n = self.ramp.len();
        let bucket = ((mean.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1);
        &self.ramp[bucket]
    }

    /// Directional glyph for an edge cell.
    pub fn edge_glyph(&self, direction: EdgeDirection) -> &Glyph {
        &self.edges[direction as usize]
    }
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    rows: [0; 8],
    density: 0.0,
};

/// The eight glyph sets, numbered as clients send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsciiSet {
    /// `" .:-=+*#%@"`
    Basic = 0,
    /// 70-glyph photographic ramp
    Extended = 1,
    /// Shade blocks `" ░▒▓█"`
    Artistic = 2,
    /// Two glyphs, `".#"`
    Simple = 3,
    /// The extended ramp ordered by measured glyph density
    Shader = 4,
    /// Empty or full block
    Retro = 5,
    /// `" .:-=+*#%@"` with text edge glyphs
    Advanced = 6,
    /// Every printable ASCII glyph ordered by density
    Font8x8 = 7,
}

/// Set used when a request omits `ascii_set`.
pub const DEFAULT_ASCII_SET: AsciiSet = AsciiSet::Extended;

impl AsciiSet {
    pub const ALL: [AsciiSet; 8] = [
        AsciiSet::Basic,
        AsciiSet::Extended,
        AsciiSet::Artistic,
        AsciiSet::Simple,
        AsciiSet::Shader,
        AsciiSet::Retro,
        AsciiSet::Advanced,
        AsciiSet::Font8x8,
    ];

    /// Select a set by its wire index.
    ///
    /// # Errors
    ///
    /// [`ParamError::AsciiSetOutOfRange`] unless `0 <= index <= 7`.
    pub fn from_index(index: i64) -> Result<Self, ParamError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ParamError::AsciiSetOutOfRange(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AsciiSet::Basic => "basic",
            AsciiSet::Extended => "extended",
            AsciiSet::Artistic => "artistic",
            AsciiSet::Simple => "simple",
            AsciiSet::Shader => "shader",
            AsciiSet::Retro => "retro",
            AsciiSet::Advanced => "advanced",
            AsciiSet::Font8x8 => "font8x8",
        }
    }

    /// The shared glyphs of this set.
    pub fn glyphs(self) -> &'static GlyphSet {
        static SETS: OnceLock<Vec<GlyphSet>> = OnceLock::new();
        let sets = SETS.get_or_init(|| Self::ALL.iter().map(|s| s.build()).collect());
        &sets[self.index()]
    }

    fn build(self) -> GlyphSet {
        match self {
            AsciiSet::Basic | AsciiSet::Advanced => {
                GlyphSet::from_chars(BASIC_RAMP.chars(), TEXT_EDGES)
            }
            AsciiSet::Extended => GlyphSet::from_chars(EXTENDED_RAMP.chars(), TEXT_EDGES),
            AsciiSet::Artistic => GlyphSet::from_chars(ARTISTIC_RAMP.chars(), BLOCK_EDGES),
            AsciiSet::Simple => GlyphSet::from_chars(SIMPLE_RAMP.chars(), TEXT_EDGES),
            AsciiSet::Shader => {
                GlyphSet::from_chars(EXTENDED_RAMP.chars(), TEXT_EDGES).sorted_by_density()
            }
            AsciiSet::Retro => GlyphSet::from_chars(RETRO_RAMP.chars(), BLOCK_EDGES),
            AsciiSet::Font8x8 => {
                GlyphSet::from_chars(' '..='~', TEXT_EDGES).sorted_by_density()
            }
        }
    }
}

impl fmt::Display for AsciiSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_lengths() {
        let expected = [10, 70, 5, 2, 70, 2, 10, 95];
        for (set, len) in AsciiSet::ALL.iter().zip(expected) {
            assert_eq!(set.glyphs().ramp().len(), len, "{}", set);
        }
    }

    #[test]
    fn test_every_glyph_has_a_bitmap() {
        for set in AsciiSet::ALL {
            for ch in set
                .glyphs()
                .ramp()
                .iter()
                .chain(set.glyphs().edges.iter())
                .map(Glyph::ch)
            {
                assert!(bitmap(ch).is_some(), "{:?} in {}", ch, set);
            }
        }
    }

    #[test]
    fn test_from_index() {
        for (i, set) in AsciiSet::ALL.iter().enumerate() {
            assert_eq!(AsciiSet::from_index(i as i64), Ok(*set));
            assert_eq!(set.index(), i);
        }
        assert_eq!(
            AsciiSet::from_index(8),
            Err(ParamError::AsciiSetOutOfRange(8))
        );
        assert_eq!(
            AsciiSet::from_index(-1),
            Err(ParamError::AsciiSetOutOfRange(-1))
        );
    }

    #[test]
    fn test_sorted_sets_are_monotonic() {
        for set in [AsciiSet::Shader, AsciiSet::Font8x8] {
            let ramp = set.glyphs().ramp();
            for pair in ramp.windows(2) {
                assert!(pair[0].density() <= pair[1].density(), "{}", set);
            }
            assert_eq!(ramp[0].ch(), ' ');
        }
    }

    #[test]
    fn test_density_glyph_buckets() {
        let set = AsciiSet::Basic.glyphs();
        assert_eq!(set.density_glyph(0.0).ch(), ' ');
        assert_eq!(set.density_glyph(0.099).ch(), ' ');
        assert_eq!(set.density_glyph(0.1).ch(), '.');
        assert_eq!(set.density_glyph(0.95).ch(), '@');
        assert_eq!(set.density_glyph(1.0).ch(), '@');
    }

    #[test]
    fn test_block_densities() {
        let set = AsciiSet::Artistic.glyphs();
        let densities: Vec<f32> = set.ramp().iter().map(Glyph::density).collect();
        assert_eq!(densities[0], 0.0);
        assert_eq!(densities[4], 1.0);
        assert!(densities.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_edge_glyph_shapes() {
        let set = AsciiSet::Retro.glyphs();
        // Left half block: lit on the left, dark on the right
        let vertical = set.edge_glyph(EdgeDirection::Vertical);
        assert!(vertical.is_lit(0, 0) && !vertical.is_lit(7, 0));
        // Upper half block
        let horizontal = set.edge_glyph(EdgeDirection::Horizontal);
        assert!(horizontal.is_lit(0, 0) && !horizontal.is_lit(0, 7));
        // Rising diagonal: top right and bottom left quadrants
        let rising = set.edge_glyph(EdgeDirection::Rising);
        assert!(rising.is_lit(7, 0) && rising.is_lit(0, 7) && !rising.is_lit(0, 0));
        let falling = set.edge_glyph(EdgeDirection::Falling);
        assert!(falling.is_lit(0, 0) && falling.is_lit(7, 7) && !falling.is_lit(7, 0));
    }

    #[test]
    fn test_slash_leans_right() {
        let slash = AsciiSet::Basic.glyphs().edge_glyph(EdgeDirection::Rising);
        assert_eq!(slash.ch(), '/');
        // Lit pixel in the top row sits right of the one in the bottom lit row
        let top = (0..8).find(|&x| slash.is_lit(x, 0)).unwrap();
        let bottom = (0..8).find(|&x| slash.is_lit(x, 6)).unwrap();
        assert!(top > bottom);
    }
}
