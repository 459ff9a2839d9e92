//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how quantization error is distributed to the
//! neighbors of the pixel just quantized.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` from the current pixel and a weight.
/// A neighbor receives `error * weight / divisor`. The total propagated
/// fraction is `sum(weights) / divisor`: all of it for Floyd-Steinberg,
/// six eighths for Atkinson.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (never negative; only unvisited pixels)
    /// - `weight`: numerator over `divisor`
    pub entries: &'static [(i32, i32, u8)],

    /// Denominator shared by all weights.
    pub divisor: u8,
}

impl Kernel {
    /// Sum of all weights.
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| w as u32).sum()
    }

    /// Fraction of the quantization error this kernel passes on.
    pub fn propagation(&self) -> f32 {
        self.total_weight() as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Atkinson dithering kernel.
///
/// Six neighbors at 1/8 each; the remaining quarter of the error is
/// dropped, which gives the characteristic high-contrast look of early
/// Macintosh graphics.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_propagation_100_percent() {
        assert_eq!(FLOYD_STEINBERG.total_weight(), 16);
        assert_eq!(FLOYD_STEINBERG.propagation(), 1.0);
    }

    #[test]
    fn test_atkinson_propagation_75_percent() {
        assert_eq!(ATKINSON.total_weight(), 6);
        assert_eq!(ATKINSON.propagation(), 0.75);
    }

    #[test]
    fn test_only_forward_neighbors() {
        // Every target must come later in row-major scan order
        for kernel in [FLOYD_STEINBERG, ATKINSON] {
            for &(dx, dy, _) in kernel.entries {
                assert!(dy > 0 || (dy == 0 && dx > 0), "({}, {}) not forward", dx, dy);
            }
        }
    }
}
