use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;

use crate::models::{DitherRequest, DitherResponse};
use crate::services::DitherService;

/// Dither an image
///
/// Decodes the base64 image, reduces it to the requested palette with the
/// requested algorithm (or renders it as glyph art) and returns a base64 PNG.
/// Failures use the same envelope with `success: false`.
#[utoipa::path(
    post,
    path = "/api/dither",
    request_body = DitherRequest,
    responses(
        (status = 200, description = "Image dithered", body = DitherResponse),
        (status = 400, description = "Undecodable image, malformed body or invalid parameter", body = DitherResponse),
        (status = 413, description = "Image or body too large", body = DitherResponse),
        (status = 500, description = "Output could not be encoded", body = DitherResponse),
    ),
    tag = "Dither"
)]
pub async fn handle_dither(
    State(service): State<Arc<DitherService>>,
    payload: Result<Json<DitherRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            // Keep 413 for oversized bodies; everything else is a bad request
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            let message = format!("Invalid request body: {}", rejection.body_text());
            tracing::warn!(%status, error = %message, "Rejected dither request");
            return (status, Json(DitherResponse::failure(message))).into_response();
        }
    };

    match service.run_blocking(request).await {
        Ok(output) => Json(DitherResponse::success(
            STANDARD.encode(&output.png),
            output.width,
            output.height,
        ))
        .into_response(),
        Err(e) => e.into_response(),
    }
}
