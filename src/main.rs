use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use huebrush::api;
use huebrush::logging;
use huebrush::models::{AppConfig, ColorizeOverrides, SolverName};
use huebrush::server;
use huebrush::services::{ColorizeService, FileJob};

#[derive(Parser)]
#[command(name = "huebrush")]
#[command(about = "Huebrush - colorize grayscale images from a few color scribbles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Colorize a reference image using a scribble image
    Colorize {
        /// Grayscale (or color) image to colorize
        #[arg(short, long)]
        reference: PathBuf,

        /// Copy of the reference with color strokes; white means untouched
        #[arg(short, long)]
        scribble: PathBuf,

        /// Output PNG (default: <reference stem>_result.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Affinity window half-width
        #[arg(long)]
        radius: Option<usize>,

        #[arg(long, value_enum)]
        solver: Option<SolverName>,

        #[arg(long)]
        max_iterations: Option<usize>,

        /// Relative residual at which the solver stops
        #[arg(long)]
        tolerance: Option<f64>,

        /// Keep the reference color wherever the scribble is white (recolorize)
        #[arg(long)]
        pin_white: bool,

        /// Also write the mark mask as a grayscale PNG
        #[arg(long)]
        mask: Option<PathBuf>,
    },
    /// Run the HTTP server
    Serve {
        /// YAML configuration file (default: $CONFIG_FILE)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Huebrush API",
        description = "Colorize grayscale images from a few color scribbles",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_colorize, api::handle_mask),
    components(schemas(
        api::ColorizeRequest,
        api::MaskResponse,
        huebrush::models::ColorizeOverrides,
        huebrush::models::SolverName,
    )),
    tags((name = "Colorize", description = "Scribble-based colorization"))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Colorize {
            reference,
            scribble,
            output,
            config,
            radius,
            solver,
            max_iterations,
            tolerance,
            pin_white,
            mask,
        }) => {
            let job = FileJob {
                reference,
                scribble,
                output,
                mask,
                overrides: ColorizeOverrides {
                    radius,
                    solver,
                    tolerance,
                    max_iterations,
                    pin_white_to_reference: pin_white.then_some(true),
                },
            };
            run_colorize_command(job, config).await
        }
        Some(Commands::Serve { config }) => run_server(config).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

async fn run_colorize_command(job: FileJob, config: Option<PathBuf>) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(logging::env_filter(logging::CLI_FILTER))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config.as_deref());
    let service = ColorizeService::new(std::sync::Arc::new(config));
    let output = job.output_path();

    let outcome = tokio::task::spawn_blocking(move || job.run(&service)).await??;

    let report = &outcome.report;
    println!(
        "{}: {}x{}, {} marked, {} unreachable, {} iterations, quality {}",
        output.display(),
        outcome.width,
        outcome.height,
        report.marked_pixels,
        report.unreachable_pixels,
        report.iterations(),
        report.quality,
    );

    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Huebrush v{VERSION}");
    println!("Colorize grayscale images from a few color scribbles\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(path) if PathBuf::from(&path).exists() => path,
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    let config = AppConfig::load(None);
    let c = &config.colorize;
    println!(
        "  radius={} solver={:?} tolerance={} max_iterations={} pin_white_to_reference={}",
        c.radius, c.solver, c.tolerance, c.max_iterations, c.pin_white_to_reference
    );
    println!(
        "  fit_scribble={} max_pixels={}",
        config.input.fit_scribble, config.server.max_pixels
    );

    println!("\nUsage:");
    println!("  huebrush colorize -r photo.png -s strokes.png   Colorize to photo_result.png");
    println!("  huebrush serve                                   Run the HTTP server");
    println!("  huebrush --help                                  Show all options");
}

async fn run_server(config: Option<PathBuf>) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(logging::env_filter(logging::SERVER_FILTER))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(config.as_deref());
    let bind_addr = config.bind_addr();

    let state = server::create_app_state(config);

    // OpenAPI documentation is production only
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Huebrush server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
