use base64::{engine::general_purpose::STANDARD, Engine};
use retro_dither::{DitherAlgorithm, DitherJob, ParamError, PaletteKind, Raster};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ProcessError;
use crate::models::{DitherRequest, DitherResponse};
use crate::rendering::codec;

/// Encoded result of one dither request
#[derive(Debug, Clone)]
pub struct DitherOutput {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Request pipeline: base64 -> parameters -> decode -> dither -> PNG.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug, Clone)]
pub struct DitherService {
    max_dimension: u32,
}

impl DitherService {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Process a request into its wire response. Never fails.
    pub fn process(&self, request: &DitherRequest) -> DitherResponse {
        match self.run(request) {
            Ok(output) => {
                DitherResponse::success(STANDARD.encode(&output.png), output.width, output.height)
            }
            Err(e) => DitherResponse::failure(e.to_string()),
        }
    }

    /// Run the pipeline, keeping the failure kind for status mapping.
    ///
    /// Checks run cheapest first: the base64 payload, then the parameters,
    /// then the image header, and only then the pixels.
    pub fn run(&self, request: &DitherRequest) -> Result<DitherOutput, ProcessError> {
        let result = decode_image_field(&request.image)
            .and_then(|bytes| Ok((bytes, build_job(request)?)))
            .and_then(|(bytes, job)| self.render(&bytes, &job));

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                algorithm = %request.dither.algorithm,
                "Dither request failed"
            );
        }
        result
    }

    /// Run the pipeline on the blocking thread pool.
    pub async fn run_blocking(
        self: Arc<Self>,
        request: DitherRequest,
    ) -> Result<DitherOutput, ProcessError> {
        Self::join_blocking(move || self.run(&request)).await
    }

    async fn join_blocking<F>(task: F) -> Result<DitherOutput, ProcessError>
    where
        F: FnOnce() -> Result<DitherOutput, ProcessError> + Send + 'static,
    {
        tokio::task::spawn_blocking(task)
            .await
            .map_err(|e| ProcessError::Internal(format!("Dither task failed: {e}")))?
    }

    /// Decode `bytes`, apply `job` and encode the result as PNG.
    pub fn render(&self, bytes: &[u8], job: &DitherJob) -> Result<DitherOutput, ProcessError> {
        let start = Instant::now();
        let raster = codec::decode(bytes, self.max_dimension)?;
        let output = job.apply(&raster);
        let png = codec::encode_png(&output)?;

        // Sides are bounded by max_dimension times the ASCII scale
        let width = output.width() as u32;
        let height = output.height() as u32;

        tracing::info!(
            algorithm = %job.algorithm(),
            palette = %palette_label(job),
            width,
            height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dithered image"
        );

        Ok(DitherOutput { png, width, height })
    }

    /// Decode `bytes` and return the text rendering of an ASCII job.
    ///
    /// Returns `None` for quantizing jobs.
    pub fn render_text(
        &self,
        bytes: &[u8],
        job: &DitherJob,
    ) -> Result<Option<String>, ProcessError> {
        if !job.algorithm().is_ascii() {
            return Ok(None);
        }
        let raster: Raster = codec::decode(bytes, self.max_dimension)?;
        Ok(job.render_text(&raster))
    }
}

fn palette_label(job: &DitherJob) -> String {
    job.palette_kind()
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Decode the request's base64 image, accepting a `data:<mime>;base64,` prefix.
pub fn decode_image_field(image: &str) -> Result<Vec<u8>, ProcessError> {
    let trimmed = image.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => {
                return Err(ProcessError::Decode(
                    "data URL is not base64 encoded".to_string(),
                ))
            }
        },
        None => trimmed,
    };
    if payload.is_empty() {
        return Err(ProcessError::Decode("image is empty".to_string()));
    }
    Ok(STANDARD.decode(payload)?)
}

/// Validate the palette and algorithm fields of a request.
///
/// The palette is not looked at for `ascii`, so any palette (or none) is
/// accepted there.
pub fn build_job(request: &DitherRequest) -> Result<DitherJob, ProcessError> {
    let spec = &request.dither;
    let algorithm = DitherAlgorithm::parse(
        spec.algorithm.trim(),
        spec.bayer_size,
        spec.threshold,
        spec.ascii_set,
        spec.detect_edges,
    )?;

    let kind = match (&request.palette, algorithm.is_ascii()) {
        (_, true) | (None, false) => None,
        (Some(palette), false) => Some(
            PaletteKind::parse(palette.kind.trim(), palette.levels).map_err(ParamError::from)?,
        ),
    };

    Ok(DitherJob::new(kind, algorithm)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DitherSpec, PaletteSpec};
    use retro_dither::Rgb;

    fn png_base64(raster: &Raster) -> String {
        STANDARD.encode(codec::encode_png(raster).unwrap())
    }

    fn request(image: String, palette: Option<(&str, Option<i64>)>, algorithm: &str) -> DitherRequest {
        DitherRequest {
            image,
            palette: palette.map(|(kind, levels)| PaletteSpec {
                kind: kind.to_string(),
                levels,
            }),
            dither: DitherSpec {
                algorithm: algorithm.to_string(),
                bayer_size: None,
                threshold: None,
                ascii_set: None,
                detect_edges: None,
            },
        }
    }

    fn decoded(response: &DitherResponse) -> Raster {
        let bytes = STANDARD.decode(response.image.as_ref().unwrap()).unwrap();
        codec::decode(&bytes, 4096).unwrap()
    }

    #[test]
    fn test_white_pixel_threshold() {
        let mut req = request(
            png_base64(&Raster::filled(1, 1, Rgb::gray(255))),
            Some(("grayscale", Some(2))),
            "threshold",
        );
        req.dither.threshold = Some(0.5);

        let response = DitherService::new(4096).process(&req);

        assert!(response.success, "{:?}", response.error);
        assert_eq!(response.error, None);
        assert_eq!(decoded(&response).rgb(0, 0), Rgb::gray(255));
    }

    #[test]
    fn test_floyd_mid_gray_checkerboard() {
        let req = request(
            png_base64(&Raster::filled(2, 2, Rgb::gray(128))),
            Some(("grayscale", Some(2))),
            "floyd",
        );

        let response = DitherService::new(4096).process(&req);
        let out = decoded(&response);

        let values: Vec<u8> = out.pixels().map(|c| c.r).collect();
        assert_eq!(values, vec![255, 0, 0, 255]);
        assert_eq!((response.width, response.height), (Some(2), Some(2)));
    }

    #[test]
    fn test_malformed_base64_is_failure_response() {
        let req = request("not*base64!".to_string(), Some(("gameboy", None)), "floyd");

        let response = DitherService::new(4096).process(&req);

        assert!(!response.success);
        assert!(response.image.is_none());
        assert!(response.error.unwrap().contains("base64"));
    }

    #[test]
    fn test_bytes_that_are_not_an_image() {
        let req = request(STANDARD.encode(b"hello world"), Some(("gameboy", None)), "floyd");
        let result = DitherService::new(4096).run(&req);
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let raster = Raster::filled(2, 1, Rgb::gray(0));
        let image = format!("data:image/png;base64,{}", png_base64(&raster));
        let req = request(image, Some(("cga", None)), "atkinson");

        assert!(DitherService::new(4096).process(&req).success);
    }

    #[test]
    fn test_data_url_without_base64_marker() {
        let result = decode_image_field("data:image/png,abcd");
        assert!(matches!(result, Err(ProcessError::Decode(_))));
    }

    #[test]
    fn test_params_checked_before_pixels() {
        // Garbage image bytes, but the bad algorithm is reported first
        let req = request(STANDARD.encode(b"garbage"), Some(("gameboy", None)), "sharpen");
        let result = DitherService::new(4096).run(&req);
        assert!(matches!(
            result,
            Err(ProcessError::InvalidParameter(ParamError::UnknownAlgorithm(_)))
        ));
    }

    #[test]
    fn test_unknown_palette() {
        let req = request(
            png_base64(&Raster::black(1, 1)),
            Some(("c64", None)),
            "floyd",
        );
        let result = DitherService::new(4096).run(&req);
        assert!(matches!(
            result,
            Err(ProcessError::InvalidParameter(ParamError::Palette(_)))
        ));
    }

    #[test]
    fn test_missing_palette() {
        let req = request(png_base64(&Raster::black(1, 1)), None, "ordered");
        let result = DitherService::new(4096).run(&req);
        assert!(matches!(
            result,
            Err(ProcessError::InvalidParameter(ParamError::MissingPalette))
        ));
    }

    #[test]
    fn test_ascii_ignores_palette() {
        let image = png_base64(&Raster::filled(16, 8, Rgb::gray(200)));
        let service = DitherService::new(4096);

        let with_bad_palette = request(image.clone(), Some(("c64", Some(99))), "ascii");
        let without_palette = request(image, None, "ascii");

        let a = service.process(&with_bad_palette);
        let b = service.process(&without_palette);
        assert!(a.success, "{:?}", a.error);
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_large() {
        let req = request(
            png_base64(&Raster::black(9, 2)),
            Some(("gameboy", None)),
            "floyd",
        );
        let result = DitherService::new(8).run(&req);
        assert!(matches!(result, Err(ProcessError::ImageTooLarge { .. })));
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut raster = Raster::black(17, 9);
        for y in 0..9 {
            for x in 0..17 {
                raster.set_rgb(x, y, Rgb::new((x * 15) as u8, (y * 28) as u8, 99));
            }
        }
        let req = request(png_base64(&raster), Some(("nes", None)), "floyd");
        let service = DitherService::new(4096);

        assert_eq!(service.process(&req), service.process(&req));
    }

    #[test]
    fn test_render_text_only_for_ascii() {
        let bytes = codec::encode_png(&Raster::filled(16, 16, Rgb::gray(0))).unwrap();
        let service = DitherService::new(4096);

        let ascii = build_job(&request(String::new(), None, "ascii")).unwrap();
        let floyd = build_job(&request(String::new(), Some(("gameboy", None)), "floyd")).unwrap();

        assert_eq!(
            service.render_text(&bytes, &ascii).unwrap(),
            Some("  \n  ".to_string())
        );
        assert_eq!(service.render_text(&bytes, &floyd).unwrap(), None);
    }

    #[test]
    fn test_render_styled_ascii() {
        let bytes = codec::encode_png(&Raster::filled(16, 8, Rgb::gray(255))).unwrap();
        let style = retro_dither::AsciiStyle::parse(Some("33ff33"), Some("001100"), Some(2)).unwrap();
        let job = build_job(&request(String::new(), None, "ascii"))
            .unwrap()
            .with_ascii_style(style);

        let output = DitherService::new(4096).render(&bytes, &job).unwrap();

        assert_eq!((output.width, output.height), (32, 16));
        let raster = codec::decode(&output.png, 4096).unwrap();
        assert!(raster
            .pixels()
            .all(|c| c == style.fg || c == style.bg));
        assert!(raster.pixels().any(|c| c == style.fg));
    }

    #[tokio::test]
    async fn test_run_blocking() {
        let req = request(
            png_base64(&Raster::filled(4, 4, Rgb::gray(90))),
            Some(("gameboy", None)),
            "ordered",
        );
        let output = Arc::new(DitherService::new(4096))
            .run_blocking(req)
            .await
            .unwrap();
        assert_eq!((output.width, output.height), (4, 4));
    }

    #[tokio::test]
    async fn test_panicking_task_is_internal_error() {
        let result = DitherService::join_blocking(|| panic!("pipeline bug")).await;

        let error = result.unwrap_err();
        assert!(matches!(error, ProcessError::Internal(_)), "{:?}", error);
        assert_eq!(error.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.to_string().contains("encode"), "{}", error);
    }
}
