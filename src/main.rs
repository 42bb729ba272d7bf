mod api;
mod config;
mod error;
mod pricing;
mod projection;
mod types;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::types::PriceField;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let state = ApiState {
        health: Arc::new(HealthState::new()),
        latency: Arc::new(LatencyStats::new()),
    };
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "Rate card engine listening on {bind_addr} ({} known price fields)",
        PriceField::ALL.len()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
