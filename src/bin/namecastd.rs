//! namecastd - Namecast daemon.
//!
//! Serves name classification and questionnaire refinement over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use namecast::config::{Config, build_refiner};
use namecast::server::{AppState, serve};
use namecast::{NamecastError, SessionStore};

/// Namecast daemon: name classification with questionnaire refinement.
#[derive(Parser)]
#[command(name = "namecastd")]
#[command(version = namecast::PKG_VERSION)]
#[command(about = "Namecast classification daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "NAMECAST_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Override the listen address from the configuration.
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    // The model and catalog are loaded once and shared read-only
    let refiner = Arc::new(build_refiner(&config)?);
    let sessions = Arc::new(SessionStore::new(&config.session_config()));

    let address = args.address.unwrap_or_else(|| config.server.address.clone());
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| NamecastError::Configuration(format!("Invalid address {address:?}: {e}")))?;

    info!(
        version = %namecast::version_string(),
        classifier = refiner.classifier_name(),
        target = %refiner.target().label,
        %addr,
        "namecastd starting"
    );

    serve(addr, AppState::new(refiner, sessions)).await?;

    Ok(())
}
