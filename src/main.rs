use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{RecordServiceConfig, load_csv, router};

/// Main entry point for the NAMASTE record service
///
/// Loads the morbidity code CSV into memory, then serves `/records` over HTTP with
/// OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `NAMASTE_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `NAMASTE_RECORDS_CSV`: CSV to load (default: "NATIONAL AYURVEDA MORBIDITY CODES.csv")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the CSV cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("namaste_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = RecordServiceConfig::from_env_values(
        std::env::var("NAMASTE_REST_ADDR").ok(),
        std::env::var("NAMASTE_RECORDS_CSV").ok(),
    )?;

    let rows = load_csv(cfg.csv_path())?;
    tracing::info!("CSV processed with UTF-8 decoding: {} records", rows.len());

    let app = router(Arc::new(RwLock::new(rows)));

    tracing::info!("++ Starting NAMASTE record service on {}", cfg.addr());
    let listener = tokio::net::TcpListener::bind(cfg.addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
