use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ditherboy::api::ApiDoc;
use ditherboy::models::{AppConfig, DitherRequest, DitherSpec, PaletteSpec};
use ditherboy::server;
use ditherboy::services::{build_job, DitherService};
use retro_dither::{AsciiSet, AsciiStyle, Palette, PaletteKind};

#[derive(Parser)]
#[command(name = "ditherboy")]
#[command(about = "DitherBoy - retro palette quantization and dithering")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Dither an image file directly (no server needed)
    Dither {
        /// Input image (any supported format)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (PNG, or text with --text)
        #[arg(short, long)]
        output: PathBuf,

        /// Palette: grayscale, gameboy, nes or cga
        #[arg(short, long, default_value = "grayscale")]
        palette: String,

        /// Gray levels for the grayscale palette (2-16)
        #[arg(short, long)]
        levels: Option<i64>,

        /// Algorithm: floyd, atkinson, ordered, threshold or ascii
        #[arg(short, long, default_value = "floyd")]
        algorithm: String,

        /// Bayer matrix size exponent for ordered (1-4)
        #[arg(long)]
        bayer_size: Option<i64>,

        /// Luma cutoff for threshold (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Glyph set for ascii (0-7)
        #[arg(long)]
        ascii_set: Option<i64>,

        /// Disable edge glyphs for ascii
        #[arg(long)]
        no_edges: bool,

        /// Glyph color for ascii as RRGGBB hex (default ffffff)
        #[arg(long)]
        fg: Option<String>,

        /// Background color for ascii as RRGGBB hex (default 000000)
        #[arg(long)]
        bg: Option<String>,

        /// Pixel scale for ascii output (1-8)
        #[arg(long)]
        scale: Option<i64>,

        /// Write the ascii rendering as text instead of a PNG
        #[arg(long)]
        text: bool,
    },
    /// List palettes and glyph sets
    Palettes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Dither {
            input,
            output,
            palette,
            levels,
            algorithm,
            bayer_size,
            threshold,
            ascii_set,
            no_edges,
            fg,
            bg,
            scale,
            text,
        }) => {
            let request = DitherRequest {
                image: String::new(),
                palette: Some(PaletteSpec {
                    kind: palette,
                    levels,
                }),
                dither: DitherSpec {
                    algorithm,
                    bayer_size,
                    threshold,
                    ascii_set,
                    detect_edges: Some(!no_edges),
                },
            };
            let style = AsciiStyle::parse(fg.as_deref(), bg.as_deref(), scale)?;
            run_dither_command(&input, &output, &request, style, text)
        }
        Some(Commands::Palettes) => run_palettes_command(),
        None => run_status_command(),
    }
}

/// Dither one file to another with the same pipeline the server uses
fn run_dither_command(
    input: &Path,
    output: &Path,
    request: &DitherRequest,
    style: AsciiStyle,
    text: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherboy=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load()?;
    let service = DitherService::new(config.max_dimension);

    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let job = build_job(request)?.with_ascii_style(style);

    if text {
        let rendered = service
            .render_text(&bytes, &job)?
            .context("--text requires --algorithm ascii")?;
        std::fs::write(output, rendered + "\n")
            .with_context(|| format!("Failed to write {}", output.display()))?;
    } else {
        let result = service.render(&bytes, &job)?;
        std::fs::write(output, &result.png)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!(
            "Wrote {}x{} {} to {}",
            result.width,
            result.height,
            job.algorithm(),
            output.display()
        );
    }

    Ok(())
}

/// Print every palette with its colors, and the glyph sets
fn run_palettes_command() -> anyhow::Result<()> {
    println!("Palettes:");
    let kinds = [
        PaletteKind::Grayscale { levels: 4 },
        PaletteKind::GameBoy,
        PaletteKind::Nes,
        PaletteKind::Cga,
    ];
    for kind in kinds {
        let palette = Palette::build(kind)?;
        let colors: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
        println!("  {:<14} {} colors", kind.to_string(), palette.len());
        for chunk in colors.chunks(8) {
            println!("    {}", chunk.join(" "));
        }
    }
    println!("  (grayscale takes --levels 2-16, default 4)");

    println!("\nASCII sets:");
    for set in AsciiSet::ALL {
        let ramp: String = set.glyphs().ramp().iter().map(|g| g.ch()).collect();
        let preview: String = ramp.chars().take(24).collect();
        println!("  {} {:<9} {}", set.index(), set.name(), preview);
    }

    Ok(())
}

/// Print version, effective configuration and available commands
fn run_status_command() -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("DitherBoy v{VERSION}");
    println!("Retro palette quantization and dithering\n");

    println!("Environment Variables:");
    for name in ["CONFIG_FILE", "BIND_ADDR", "MAX_DIMENSION", "STATIC_DIR"] {
        let value = std::env::var(name).ok();
        println!(
            "  {:<13} = {}",
            name,
            value.as_deref().unwrap_or("(not set)")
        );
    }

    println!("\nEffective Configuration:");
    match AppConfig::load() {
        Ok(config) => {
            println!(
                "  Config file:   {}",
                config_file.as_deref().unwrap_or("(defaults)")
            );
            println!("  Bind address:  {}", config.bind_addr);
            println!("  Max dimension: {} px", config.max_dimension);
            println!("  Max request:   {} bytes", config.max_request_bytes);
            println!(
                "  Static UI:     {}",
                config
                    .static_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string())
            );
        }
        Err(e) => println!("  Invalid configuration: {e}"),
    }

    println!("\nCommands:");
    println!("  ditherboy serve      Start the HTTP server");
    println!("  ditherboy dither     Dither an image file (see --help)");
    println!("  ditherboy palettes   List palettes and glyph sets");

    Ok(())
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherboy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        max_dimension = config.max_dimension,
        max_request_bytes = config.max_request_bytes,
        static_dir = ?config.static_dir.as_ref().map(|p| p.display().to_string()),
        "Configuration loaded"
    );

    let state = server::create_app_state(config);

    // OpenAPI documentation (production only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "DitherBoy server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
