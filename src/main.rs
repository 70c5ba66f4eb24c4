use std::sync::Arc;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use energi_onboarding::config::{LogFormat, CONFIG};
use energi_onboarding::endpoints::create_router;
use energi_onboarding::services::ViewRenderer;
use energi_onboarding::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before anything reads CONFIG
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Starting onboarding server v{}", env!("CARGO_PKG_VERSION"));

    // Lazy pool: a bad configuration only shows up on the first query
    let db = energi_onboarding::db::connect().await?;

    let views = Arc::new(ViewRenderer::new()?);
    tracing::info!("View templates loaded");

    let state = AppState::new(db, views);
    let app = create_app(state);

    let addr = CONFIG.server.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "energi_onboarding=debug,tower_http=debug".into());

    match CONFIG.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

/// Create the main application router
fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_router(state))
        .nest_service("/static", ServeDir::new(&CONFIG.server.static_dir))
        .layer(TraceLayer::new_for_http())
}
