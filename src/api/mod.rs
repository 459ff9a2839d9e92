pub mod dither;
pub mod health;

pub use dither::{__path_handle_dither, handle_dither};
pub use health::{__path_handle_health, handle_health, HealthResponse};

use utoipa::OpenApi;

use crate::models::{DitherRequest, DitherResponse, DitherSpec, PaletteSpec};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DitherBoy API",
        description = "Retro palette quantization and dithering service",
        license(name = "MIT")
    ),
    paths(handle_dither, handle_health),
    components(schemas(
        DitherRequest,
        DitherResponse,
        DitherSpec,
        PaletteSpec,
        HealthResponse,
    )),
    tags(
        (name = "Dither", description = "Image dithering"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;
