//! Bayer threshold matrices for ordered dithering.

use std::sync::OnceLock;

use crate::api::ParamError;

/// Smallest accepted `bayer_size` (2x2 matrix).
pub const MIN_BAYER_SIZE: i64 = 1;
/// Matrix size used when a request omits `bayer_size` (4x4).
pub const DEFAULT_BAYER_SIZE: i64 = 2;
/// Largest accepted `bayer_size` (16x16 matrix).
pub const MAX_BAYER_SIZE: i64 = 4;

/// A square Bayer index matrix of side `2^size`, normalized to `[0, 1)`.
///
/// Built recursively from the 1x1 zero matrix:
///
/// ```text
/// M(2n) = | 4M     4M + 2 |
///         | 4M + 3 4M + 1 |
/// ```
///
/// then centred as `(v + 0.5) / side²`, so no cell sits exactly on 0 and
/// an exact palette color never lands on a quantization midpoint. Every
/// size is built once per process and shared read-only.
#[derive(Debug, PartialEq)]
pub struct BayerMatrix {
    side: usize,
    values: Vec<f32>,
}

impl BayerMatrix {
    /// The shared matrix for `bayer_size` (side `2^bayer_size`).
    ///
    /// # Errors
    ///
    /// [`ParamError::BayerSizeOutOfRange`] unless `1 <= bayer_size <= 4`.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_dither::BayerMatrix;
    ///
    /// let m = BayerMatrix::for_size(1).unwrap();
    /// assert_eq!(m.side(), 2);
    /// assert_eq!(m.get(1, 0), 0.625);
    /// assert!(BayerMatrix::for_size(5).is_err());
    /// ```
    pub fn for_size(bayer_size: i64) -> Result<&'static BayerMatrix, ParamError> {
        static MATRICES: OnceLock<Vec<BayerMatrix>> = OnceLock::new();

        if !(MIN_BAYER_SIZE..=MAX_BAYER_SIZE).contains(&bayer_size) {
            return Err(ParamError::BayerSizeOutOfRange(bayer_size));
        }
        let matrices = MATRICES.get_or_init(|| {
            (MIN_BAYER_SIZE..=MAX_BAYER_SIZE)
                .map(|size| Self::build(size as u32))
                .collect()
        });
        Ok(&matrices[(bayer_size - MIN_BAYER_SIZE) as usize])
    }

    fn build(size: u32) -> Self {
        let mut side = 1usize;
        let mut m = vec![0u32];
        for _ in 0..size {
            let next_side = side * 2;
            let mut next = vec![0u32; next_side * next_side];
            for y in 0..side {
                for x in 0..side {
                    let v = 4 * m[y * side + x];
                    next[y * next_side + x] = v;
                    next[y * next_side + x + side] = v + 2;
                    next[(y + side) * next_side + x] = v + 3;
                    next[(y + side) * next_side + x + side] = v + 1;
                }
            }
            side = next_side;
            m = next;
        }
        let scale = (side * side) as f32;
        Self {
            side,
            values: m
                .into_iter()
                .map(|v| (v as f32 + 0.5) / scale)
                .collect(),
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Threshold at image coordinate `(x, y)`; the matrix tiles the plane.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[(y % self.side) * self.side + x % self.side]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_is_power_of_two() {
        for size in 1..=4 {
            assert_eq!(BayerMatrix::for_size(size).unwrap().side(), 1 << size);
        }
    }

    #[test]
    fn test_out_of_range_sizes() {
        for size in [-1, 0, 5, 64] {
            assert_eq!(
                BayerMatrix::for_size(size),
                Err(ParamError::BayerSizeOutOfRange(size))
            );
        }
    }

    #[test]
    fn test_classic_4x4() {
        #[rustfmt::skip]
        let expected: [u32; 16] = [
             0,  8,  2, 10,
            12,  4, 14,  6,
             3, 11,  1,  9,
            15,  7, 13,  5,
        ];
        let m = BayerMatrix::for_size(2).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(m.get(x, y), (expected[y * 4 + x] as f32 + 0.5) / 16.0);
            }
        }
    }

    #[test]
    fn test_values_are_a_permutation() {
        for size in 1..=4 {
            let m = BayerMatrix::for_size(size).unwrap();
            let n = m.side() * m.side();
            let mut seen: Vec<usize> = (0..m.side())
                .flat_map(|y| (0..m.side()).map(move |x| (x, y)))
                .map(|(x, y)| (m.get(x, y) * n as f32).floor() as usize)
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
            assert!(seen.iter().all(|&v| v < n));
        }
    }

    #[test]
    fn test_values_stay_inside_unit_interval() {
        for size in 1..=4 {
            let m = BayerMatrix::for_size(size).unwrap();
            for y in 0..m.side() {
                for x in 0..m.side() {
                    let t = m.get(x, y);
                    assert!(t > 0.0 && t < 1.0, "t={} at ({}, {})", t, x, y);
                }
            }
        }
    }

    #[test]
    fn test_tiles() {
        let m = BayerMatrix::for_size(1).unwrap();
        assert_eq!(m.get(0, 0), m.get(2, 4));
        assert_eq!(m.get(1, 1), m.get(3, 5));
    }

    #[test]
    fn test_shared_instance() {
        let a = BayerMatrix::for_size(3).unwrap();
        let b = BayerMatrix::for_size(3).unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
