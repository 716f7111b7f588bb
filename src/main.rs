use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ev_range_estimator::{
    config::{Config, CONFIG_PATH},
    model::{warm_up, TorchPipeline},
    record::build_row,
    server::{self, AppState},
    showcase::sample_vehicles,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load(CONFIG_PATH)?;
    tracing::info!(
        "config: model={} meta={}",
        config.model_path.display(),
        config.meta_path.display()
    );

    // No artifact, no service.
    let pipeline = TorchPipeline::load(&config.model_path, &config.meta_path)
        .context("failed to load prediction artifact")?;
    // Showcase samples are the known-good inputs; form inputs may fail per request.
    let [first_sample, ..] = sample_vehicles();
    warm_up(&pipeline, &build_row(&first_sample))?;

    let state = AppState::new(Arc::new(pipeline))?;
    let app = server::router(state);

    let addr = config.bind_addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
