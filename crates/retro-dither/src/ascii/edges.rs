//! Sobel edge analysis for ASCII cells.

/// Normalized Sobel magnitude above which a pixel counts as an edge pixel.
pub const EDGE_THRESHOLD: f32 = 0.3;

/// Edge pixels a full 8x8 cell needs to become an edge cell.
pub const EDGE_PIXELS_PER_CELL: usize = 8;

/// Orientation class of an edge, named after the line it draws.
///
/// The discriminant is the tie-break order: earlier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// `|`: horizontal gradient
    Vertical = 0,
    /// `-`: vertical gradient
    Horizontal = 1,
    /// `/`
    Rising = 2,
    /// `\`
    Falling = 3,
}

impl EdgeDirection {
    const ALL: [EdgeDirection; 4] = [
        EdgeDirection::Vertical,
        EdgeDirection::Horizontal,
        EdgeDirection::Rising,
        EdgeDirection::Falling,
    ];

    /// Classify a gradient (image coordinates, y pointing down).
    ///
    /// The angle is folded into `[0°, 180°)` and bucketed into 45° wide
    /// classes centred on 0°, 90°, 45° and 135°.
    pub fn from_gradient(gx: f32, gy: f32) -> Self {
        let mut angle = gy.atan2(gx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if angle >= 180.0 {
            angle -= 180.0;
        }
        if !(22.5..157.5).contains(&angle) {
            EdgeDirection::Vertical
        } else if (67.5..112.5).contains(&angle) {
            EdgeDirection::Horizontal
        } else if angle < 67.5 {
            EdgeDirection::Rising
        } else {
            EdgeDirection::Falling
        }
    }
}

/// Sobel gradient of a luma plane at `(x, y)`, neighbors clamped at the
/// borders.
///
/// Returns `(gx, gy)`; for a plane in 0.0..=1.0 each component lies in
/// -4.0..=4.0.
pub fn sobel(luma: &[f32], width: usize, height: usize, x: usize, y: usize) -> (f32, f32) {
    let at = |dx: isize, dy: isize| {
        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
        let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
        luma[sy * width + sx]
    };
    let gx = (at(1, -1) + 2.0 * at(1, 0) + at(1, 1)) - (at(-1, -1) + 2.0 * at(-1, 0) + at(-1, 1));
    let gy = (at(-1, 1) + 2.0 * at(0, 1) + at(1, 1)) - (at(-1, -1) + 2.0 * at(0, -1) + at(1, -1));
    (gx, gy)
}

/// Edge pixels needed for a cell covering `covered` pixels.
pub fn required_edge_pixels(covered: usize, cell_area: usize) -> usize {
    (EDGE_PIXELS_PER_CELL * covered)
        .div_ceil(cell_area)
        .max(1)
}

/// Tallies edge pixel orientations within one cell.
#[derive(Debug, Default, Clone)]
pub struct EdgeTally {
    counts: [usize; 4],
}

impl EdgeTally {
    /// Record the pixel at `(x, y)` if its gradient is strong enough.
    pub fn observe(&mut self, luma: &[f32], width: usize, height: usize, x: usize, y: usize) {
        let (gx, gy) = sobel(luma, width, height, x, y);
        let magnitude = (gx * gx + gy * gy).sqrt() / 4.0;
        if magnitude > EDGE_THRESHOLD {
            self.counts[EdgeDirection::from_gradient(gx, gy) as usize] += 1;
        }
    }

    /// Total edge pixels seen.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Majority direction, if at least `required` edge pixels were seen.
    pub fn direction(&self, required: usize) -> Option<EdgeDirection> {
        if self.total() < required {
            return None;
        }
        let mut best = 0;
        for i in 1..4 {
            if self.counts[i] > self.counts[best] {
                best = i;
            }
        }
        Some(EdgeDirection::ALL[best])
    }
}
