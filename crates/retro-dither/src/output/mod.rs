//! Output types for the dithering pipeline.
//!
//! [`DitheredImage`] stores palette indices with dimension metadata and the
//! palette, and converts back to pixels:
//!
//! - **Indexed** ([`DitheredImage::indices`]): raw `u8` palette indices
//! - **Raster** ([`DitheredImage::to_raster`]): same layout as the source,
//!   alpha preserved

mod dithered_image;

pub use dithered_image::DitheredImage;
