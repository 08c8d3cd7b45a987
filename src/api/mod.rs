pub mod handlers;
pub mod types;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::verifier::Verifier;

pub struct AppState {
    pub verifier: Verifier,
}

pub fn router(verifier: Verifier, static_dir: Option<&str>) -> Router {
    let state = Arc::new(AppState { verifier });

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/verify/owner/{owner_address}", get(handlers::verify_owner))
        .route("/verify/collection", get(handlers::verify_collection))
        .route("/verify/nft", get(handlers::verify_nft))
        .with_state(state);

    // Frontend: `/` serves index.html, `/static/*` the rest of the directory.
    if let Some(dir) = static_dir {
        router = router
            .route_service("/", ServeFile::new(Path::new(dir).join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(
    verifier: Verifier,
    config: &ApiConfig,
    shutdown: CancellationToken,
) -> eyre::Result<()> {
    let app = router(verifier, config.static_dir.as_deref());
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
