//! Test fixtures: images generated in memory and request bodies.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};

use ditherboy::rendering::encode_png;
use retro_dither::{Channels, Raster, Rgb};

/// A single solid color
pub fn solid(width: usize, height: usize, color: Rgb) -> Raster {
    Raster::filled(width, height, color)
}

/// Horizontal red ramp, vertical green ramp, blue split on the diagonal
pub fn gradient(width: usize, height: usize) -> Raster {
    let mut raster = Raster::black(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = if x > y { 200 } else { 40 };
            raster.set_rgb(x, y, Rgb::new(r, g, b));
        }
    }
    raster
}

/// Gray ramp with a half-transparent right half
pub fn translucent(width: usize, height: usize) -> Raster {
    let mut data = Vec::with_capacity(width * height * 4);
    for _y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(1)) as u8;
            let a = if x < width / 2 { 255 } else { 128 };
            data.extend_from_slice(&[v, v, v, a]);
        }
    }
    Raster::new(width, height, Channels::Rgba, data).unwrap()
}

/// PNG bytes of a raster
pub fn png(raster: &Raster) -> Vec<u8> {
    encode_png(raster).unwrap()
}

/// Base64 PNG of a raster, as the web UI sends it
pub fn png_base64(raster: &Raster) -> String {
    STANDARD.encode(png(raster))
}

/// Request body for /api/dither
pub fn request(image: &str, palette: Value, dither: Value) -> Value {
    json!({
        "image": image,
        "palette": palette,
        "dither": dither,
    })
}

/// Decode the base64 PNG of a successful response
pub fn decode_response_image(json: &Value) -> Raster {
    let b64 = json["image"].as_str().expect("response has no image");
    let bytes = STANDARD.decode(b64).expect("image is not base64");
    ditherboy::rendering::decode(&bytes, u32::MAX).expect("image is not a PNG")
}
