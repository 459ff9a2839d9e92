pub mod config;
pub mod request;

pub use config::AppConfig;
pub use request::{DitherRequest, DitherResponse, DitherSpec, PaletteSpec};
