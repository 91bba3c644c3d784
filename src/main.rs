use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use tiendanube_copywriter::config::Config;
use tiendanube_copywriter::routes::{router, AppState};
use tiendanube_copywriter::slug::PicsumImages;
use tiendanube_copywriter::{GeminiClient, GenerationPipeline, RequestController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let client = GeminiClient::new(&config);
    if client.is_demo() {
        tracing::warn!("GEMINI_API_KEY not set, running in demo mode");
    } else {
        tracing::info!(model = %config.model, "Using Gemini model");
    }

    let controller = RequestController::new(
        GenerationPipeline::new(Arc::new(client)),
        Arc::new(PicsumImages::new(config.image_base.clone())),
    );
    let app = router(AppState { controller });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}
