pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health, library::LibraryController, stream::StreamController, tts::TtsController,
};
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(
    tts_controller: Arc<TtsController>,
    library_controller: Arc<LibraryController>,
    stream_controller: Arc<StreamController>,
) -> Router {
    // Synthesis routes
    let tts_routes = Router::new()
        .route("/api/v1/", get(health::api_root))
        .route("/api/v1/tts", post(TtsController::synthesize))
        .route("/api/v1/tts/save", post(TtsController::synthesize_and_save))
        .route("/api/v1/languages", get(TtsController::languages))
        .with_state(tts_controller);

    // Library routes
    let library_routes = Router::new()
        .route("/api/v1/library", get(LibraryController::list))
        .route(
            "/api/v1/library/:filename",
            get(LibraryController::fetch).delete(LibraryController::delete),
        )
        .with_state(library_controller);

    // Streaming route
    let stream_routes = Router::new()
        .route("/ws/tts", get(StreamController::upgrade))
        .with_state(stream_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(tts_routes)
        .merge(library_routes)
        .merge(stream_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    tts_controller: Arc<TtsController>,
    library_controller: Arc<LibraryController>,
    stream_controller: Arc<StreamController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(tts_controller, library_controller, stream_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
