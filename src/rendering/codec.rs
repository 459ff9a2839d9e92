//! Raster codec: compressed image bytes in, PNG bytes out.

use image::{DynamicImage, ImageDecoder, ImageReader};
use retro_dither::{Channels, Raster};
use std::io::Cursor;

use crate::error::ProcessError;

/// Decode an image of any supported format into a [`Raster`].
///
/// The format is guessed from the content. Dimensions come from the header
/// and are checked against `max_dimension` before any pixel is decoded.
/// Sources with an alpha channel decode to RGBA, everything else to RGB.
pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Raster, ProcessError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ProcessError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ProcessError::Decode("unrecognized image format".to_string()));
    }

    let decoder = reader
        .into_decoder()
        .map_err(|e| ProcessError::Decode(e.to_string()))?;

    let (width, height) = decoder.dimensions();
    if width > max_dimension || height > max_dimension {
        return Err(ProcessError::ImageTooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    if width == 0 || height == 0 {
        return Err(ProcessError::Decode(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    let has_alpha = decoder.color_type().has_alpha();
    let image =
        DynamicImage::from_decoder(decoder).map_err(|e| ProcessError::Decode(e.to_string()))?;

    let (channels, data) = if has_alpha {
        (Channels::Rgba, image.into_rgba8().into_raw())
    } else {
        (Channels::Rgb, image.into_rgb8().into_raw())
    };

    Raster::new(width as usize, height as usize, channels, data)
        .map_err(|e| ProcessError::Decode(e.to_string()))
}

/// Encode a raster as an 8-bit RGB or RGBA PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ProcessError> {
    let width = u32::try_from(raster.width())
        .map_err(|_| ProcessError::Encode(format!("width {} too large", raster.width())))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| ProcessError::Encode(format!("height {} too large", raster.height())))?;

    let color_type = match raster.channels() {
        Channels::Rgb => png::ColorType::Rgb,
        Channels::Rgba => png::ColorType::Rgba,
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        writer
            .write_image_data(raster.data())
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_dither::Rgb;

    fn png_bytes(raster: &Raster) -> Vec<u8> {
        encode_png(raster).unwrap()
    }

    #[test]
    fn test_encode_produces_png_signature() {
        let bytes = png_bytes(&Raster::filled(3, 2, Rgb::gray(9)));
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_rgb_survives_encode_decode() {
        let mut raster = Raster::black(4, 3);
        raster.set_rgb(1, 2, Rgb::new(10, 200, 30));
        raster.set_rgb(3, 0, Rgb::gray(255));

        let decoded = decode(&png_bytes(&raster), 4096).unwrap();

        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_alpha_is_kept() {
        let data = vec![
            255, 0, 0, 0, //
            0, 255, 0, 128, //
        ];
        let raster = Raster::new(2, 1, Channels::Rgba, data).unwrap();

        let decoded = decode(&png_bytes(&raster), 4096).unwrap();

        assert_eq!(decoded.channels(), Channels::Rgba);
        assert_eq!(decoded.alpha(0, 0), 0);
        assert_eq!(decoded.alpha(1, 0), 128);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = decode(b"definitely not an image", 4096);
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let bytes = png_bytes(&Raster::filled(16, 16, Rgb::gray(1)));
        let result = decode(&bytes[..bytes.len() / 2], 4096);
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[test]
    fn test_oversized_image_rejected_from_header() {
        let bytes = png_bytes(&Raster::filled(20, 5, Rgb::gray(1)));

        let result = decode(&bytes, 16);

        match result {
            Err(ProcessError::ImageTooLarge { width, height, max }) => {
                assert_eq!((width, height, max), (20, 5, 16));
            }
            other => panic!("expected ImageTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_is_inclusive() {
        let bytes = png_bytes(&Raster::filled(16, 16, Rgb::gray(1)));
        assert!(decode(&bytes, 16).is_ok());
    }
}
