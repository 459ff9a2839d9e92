pub mod dither_service;

pub use dither_service::{build_job, decode_image_field, DitherOutput, DitherService};
