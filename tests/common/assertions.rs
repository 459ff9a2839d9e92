//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use retro_dither::{Palette, Raster};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a successful dither envelope and return its JSON
pub fn assert_dither_success(response: &TestResponse) -> serde_json::Value {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    assert_eq!(json["success"], true, "Full response: {}", json);
    assert!(json["image"].is_string(), "Expected image to be a string");
    assert!(json.get("error").is_none(), "Unexpected error: {}", json["error"]);
    json
}

/// Assert a failed dither envelope with the given status; returns the message
pub fn assert_dither_failure(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();

    assert_eq!(json["success"], false, "Full response: {}", json);
    assert!(json.get("image").is_none(), "Failure must not carry an image");
    json["error"]
        .as_str()
        .expect("Expected error to be a string")
        .to_string()
}

/// Assert every pixel of `raster` is a palette entry
pub fn assert_in_palette(raster: &Raster, palette: &Palette) {
    for (i, color) in raster.pixels().enumerate() {
        assert!(
            palette.contains(color),
            "pixel {} is {} which is not in the palette",
            i,
            color
        );
    }
}
