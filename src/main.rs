use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vibe_api::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::{GeminiProvider, GenerationProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let generation = config.generation_config();

    if generation.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every generation request will fail");
    }

    let provider: Arc<dyn GenerationProvider> = Arc::new(GeminiProvider::new(generation));
    tracing::info!(
        provider = provider.name(),
        model = %config.gemini_model,
        "Generation provider ready"
    );

    let app = create_router(AppState::new(provider));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
