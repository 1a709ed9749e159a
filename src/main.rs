use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use policy_impact_engine::api::{AppState, create_router};
use policy_impact_engine::config::RegimeRegistry;

/// Serve policy impact calculations over HTTP.
#[derive(Debug, Parser)]
#[command(name = "policy-impact-engine", version, about)]
struct Args {
    /// Directory containing registry.yaml and regimes/*.yaml.
    #[arg(long, default_value = "./config/policy")]
    config: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let registry = match RegimeRegistry::load(&args.config) {
        Ok(registry) => registry,
        Err(e) => {
            error!(error = %e, config = %args.config.display(), "Failed to load policy configuration");
            std::process::exit(1);
        }
    };

    info!(
        name = %registry.metadata().name,
        version = %registry.metadata().version,
        tax_year = registry.metadata().tax_year,
        regimes = registry.regimes().len(),
        "Loaded policy regimes"
    );

    let router = create_router(AppState::new(registry));
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, "Listening");
    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
