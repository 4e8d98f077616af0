use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkframe::api;
use inkframe::models::{AppConfig, DisplayEvent, FitPolicy};
use inkframe::rendering::write_bmp;
use inkframe::server;
use inkframe::services::{DitherPool, ImagePipeline, ImageStore};

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(about = "Inkframe - dithered photo frames for e-paper displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert one photo to a dithered BMP without starting the server
    Process {
        /// Photo to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Output BMP file path
        #[arg(short, long)]
        output: PathBuf,

        /// How to fit the photo: contain, cover or fill
        #[arg(short, long, default_value = "contain")]
        fit: String,

        /// Color table (.act) to use instead of the configured one
        #[arg(short, long)]
        palette: Option<PathBuf>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkframe API",
        description = "Upload photos, dither them for an e-paper panel and control what is displayed",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload,
        api::handle_current,
        api::handle_all,
        api::handle_select,
        api::handle_delete,
        api::handle_clear,
        api::handle_events,
        api::handle_ws,
    ),
    components(schemas(
        api::UploadForm,
        api::UploadResponse,
        api::FilenameRequest,
        api::FilenameResponse,
        api::FilesResponse,
        DisplayEvent,
    )),
    tags(
        (name = "Images", description = "Upload, list and delete processed images"),
        (name = "Display", description = "Current image selection and change notifications")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            input,
            output,
            fit,
            palette,
        }) => run_process_command(&input, &output, &fit, palette).await,
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::var("CONFIG_FILE").ok().map(PathBuf::from)
}

/// Run the pipeline on a single file (no server needed)
async fn run_process_command(
    input: &Path,
    output: &Path,
    fit: &str,
    palette: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load(config_path().as_deref());
    if let Some(palette) = palette {
        config.palette = palette;
    }
    let fit: FitPolicy = fit.parse()?;

    let bytes = tokio::fs::read(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;

    let store = Arc::new(ImageStore::new(&config.images_dir));
    let pool = Arc::new(DitherPool::new(1, 1)?);
    let pipeline = ImagePipeline::new(&config, store, pool);

    let image = pipeline.render(bytes, fit).await?;
    write_bmp(&image, output)?;

    println!(
        "Wrote {} ({}x{}, {} colors)",
        output.display(),
        image.width(),
        image.height(),
        image.palette().len()
    );
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let public_dir = std::env::var("PUBLIC_DIR").ok();

    println!("Inkframe v{VERSION}");
    println!("Dithered photo frames for e-paper displays\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  PUBLIC_DIR  = {}",
        public_dir.as_deref().unwrap_or("./public (default)")
    );

    let config = match config_file.as_deref() {
        Some(path) if Path::new(path).exists() => AppConfig::load(Some(Path::new(path))),
        _ => AppConfig::default(),
    };

    println!("\nConfiguration:");
    println!(
        "  Canvas:     {}x{} (background {})",
        config.canvas.width, config.canvas.height, config.canvas.background
    );
    let palette_state = if config.palette.exists() {
        "found"
    } else {
        "missing"
    };
    println!(
        "  Palette:    {} ({palette_state})",
        config.palette.display()
    );
    println!("  Images:     {}", config.images_dir.display());
    println!("  State file: {}", config.state_file.display());
    println!(
        "  Dithering:  step {}, {} workers, queue {}",
        config.dither.step, config.dither.workers, config.dither.queue
    );

    println!("\nCommands:");
    println!("  inkframe serve     Start the HTTP server");
    println!("  inkframe process   Convert a photo to a dithered BMP");
    println!("\nRun 'inkframe --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string());

    let config = AppConfig::load(config_path().as_deref());
    tracing::info!(
        palette = %config.palette.display(),
        images = %config.images_dir.display(),
        public = %public_dir,
        "Asset sources configured"
    );

    let state = server::create_app_state(config).await?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Upload UI and other static files
        .fallback_service(ServeDir::new(public_dir));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Inkframe server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
