//! TaxiFare Front Server
//!
//! Serves the ride form and forwards submissions to the fare prediction API

use anyhow::{Context, Result};
use taxifare_front::utils::logging::init_logging;
use taxifare_front::{create_router, version_info, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());
    info!("Prediction API: {}", settings.api.url);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app = create_router(settings).context("Failed to build router")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚕 TaxiFare front started!");
    info!("📝 Form: http://{}/", addr);
    info!("🔄 Prediction endpoint: http://{}/api/predict", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
