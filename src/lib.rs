//! DitherBoy
//!
//! HTTP and CLI front end for the `retro-dither` engine: decodes an image,
//! reduces it to a retro palette or glyph art and returns a PNG.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
