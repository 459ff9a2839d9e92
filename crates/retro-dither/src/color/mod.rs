//! Color types and distance utilities
//!
//! Everything in this crate works on gamma-encoded 8-bit RGB, the same
//! space the source images and the retro hardware palettes are defined in.
//!
//! - [`Rgb`]: palette entries and pixels
//! - [`distance_sq`]: squared Euclidean distance used by the quantizer
//! - [`Rgb::luma`]: Rec. 601 luminance used by the threshold, ordered and
//!   ASCII paths

mod rgb;

pub use rgb::{distance_sq, distance_sq_f32, luma_f32, Rgb};
