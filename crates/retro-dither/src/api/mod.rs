//! Public API for the retro-dither crate.
//!
//! This module provides the request-level API: [`DitherAlgorithm`] and
//! [`DitherJob`], plus the [`ParamError`] they report.

mod error;
mod job;

pub use error::ParamError;
pub use job::{DitherAlgorithm, DitherJob};
