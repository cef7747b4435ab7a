//! Surf Forecast Web Server
//!
//! Password-protected views over the plots and tables written by the
//! forecast pipeline.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use forecast_web::auth::Credentials;
use forecast_web::build_router;
use forecast_web::config::{ServerConfig, DEFAULT_USERNAME};
use forecast_web::state::AppState;

/// Surf Forecast Web Server
#[derive(Parser, Debug)]
#[command(name = "forecast-web")]
#[command(about = "Password-protected surf forecast viewer")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "SURF_LISTEN_ADDR")]
    listen: String,

    /// Root of the forecast data tree
    #[arg(long, default_value = ".", env = "SURF_DATA_DIR")]
    data_dir: PathBuf,

    /// Username required by the access guard
    #[arg(long, default_value = DEFAULT_USERNAME, env = "SURF_USERNAME")]
    username: String,

    /// Password required by the access guard
    #[arg(long, default_value = "", env = "SURF_PASSWORD", hide_env_values = true)]
    password: String,

    /// Start even when the password is empty
    #[arg(long, env = "SURF_ALLOW_EMPTY_PASSWORD")]
    allow_empty_password: bool,

    /// YAML file replacing the built-in location table
    #[arg(long, env = "SURF_LOCATIONS_FILE")]
    locations_file: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "SURF_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting surf forecast server");

    let config = ServerConfig::new(
        args.data_dir,
        Credentials::new(args.username, args.password),
    )
    .with_allow_empty_password(args.allow_empty_password)
    .with_locations_file(args.locations_file);

    let state = Arc::new(
        AppState::new(&config, Some(prometheus_handle))
            .context("Failed to initialize application state")?,
    );

    let app = build_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Surf forecast server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
