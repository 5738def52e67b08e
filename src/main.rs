use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fee_waiver_engine::api::{AppState, create_router};
use fee_waiver_engine::config::ConfigLoader;
use fee_waiver_engine::eligibility::EligibilityEngine;
use fee_waiver_engine::error::EngineError;
use fee_waiver_engine::telemetry::{self, TelemetryError};
use thiserror::Error;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fee-waiver-engine",
    about = "Serve fee waiver and reduced fee eligibility assessments over HTTP",
    version
)]
struct Cli {
    /// Directory holding metadata.yaml, pathways.yaml and poverty_guidelines.yaml
    /// (defaults to the compiled-in tables)
    #[arg(long, env = "FEE_ENGINE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    /// Address to bind the HTTP server to
    #[arg(long, env = "FEE_ENGINE_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, env = "FEE_ENGINE_PORT", default_value_t = 8080)]
    port: u16,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "FEE_ENGINE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("invalid listen address '{0}'")]
    Address(String),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::builtin()?,
    };
    let metadata = loader.metadata().clone();
    let state = AppState::new(EligibilityEngine::from(loader));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .map_err(|_| AppError::Address(format!("{}:{}", cli.host, cli.port)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        guideline_year = metadata.year,
        effective_date = %metadata.effective_date,
        "fee waiver engine ready"
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
