use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retro_dither::ParamError;
use thiserror::Error;

use crate::models::DitherResponse;

/// Failure of a single dither request.
///
/// Every variant ends up as `{"success": false, "error": ...}`; the variant
/// only decides the HTTP status.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    #[error("Image too large: {width}x{height} (max {max} pixels per side)")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProcessError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProcessError::Decode(_) | ProcessError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ProcessError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProcessError::Encode(_) | ProcessError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<base64::DecodeError> for ProcessError {
    fn from(e: base64::DecodeError) -> Self {
        ProcessError::Decode(format!("invalid base64: {e}"))
    }
}

impl IntoResponse for ProcessError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(DitherResponse::failure(self.to_string()))).into_response()
    }
}

/// Startup configuration problems that defaults cannot paper over.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("max_dimension must be at least 1")]
    ZeroMaxDimension,

    #[error("max_request_bytes must be at least 1")]
    ZeroRequestLimit,
}
