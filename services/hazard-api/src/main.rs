//! Hazard API Server
//!
//! Serves wind, wave and ocean current hazard indicators from archival
//! NetCDF datasets and a remote live current feed.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hazard_api::handlers;
use hazard_api::state::AppState;

/// Hazard API Server
#[derive(Parser, Debug)]
#[command(name = "hazard-api")]
#[command(about = "Climate hazard indicator server for marine operations")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "HAZARD_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "HAZARD_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
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
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting hazard API server");

    // Initialize application state
    let state = match AppState::from_env() {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    // Build router
    let app = Router::new()
        // Archival snapshots
        .route(
            "/climate/wind-snapshot",
            get(handlers::snapshots::wind_snapshot_handler),
        )
        .route(
            "/climate/wave-snapshot",
            get(handlers::snapshots::wave_snapshot_handler),
        )
        .route(
            "/climate/snapshot",
            get(handlers::snapshots::generic_snapshot_handler),
        )
        // Point series and regional statistics
        .route(
            "/climate/timeseries",
            get(handlers::series::timeseries_handler),
        )
        .route(
            "/climate/statistics",
            get(handlers::series::statistics_handler),
        )
        // Scenario comparisons
        .route(
            "/climate/wind-scenario-comparison",
            get(handlers::scenario::wind_comparison_handler),
        )
        .route(
            "/climate/wave-scenario-comparison",
            get(handlers::scenario::wave_comparison_handler),
        )
        // Live current feed
        .route(
            "/climate/current-snapshot",
            get(handlers::current::current_snapshot_handler),
        )
        // Health
        .route("/health", get(handlers::health::health_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    // Parse listen address
    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("Hazard API listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
