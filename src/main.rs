use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speechbox_backend::controllers::{
    library::LibraryController, stream::StreamController, tts::TtsController,
};
use speechbox_backend::domain::tts::TtsService;
use speechbox_backend::infrastructure::config::{Config, LogFormat};
use speechbox_backend::infrastructure::engines::GoogleTranslateEngine;
use speechbox_backend::infrastructure::http::start_http_server;
use speechbox_backend::infrastructure::repositories::LibraryRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting SpeechBox Backend on {}:{}",
        config.host,
        config.port
    );

    // Ensure the audio library root exists before serving
    tokio::fs::create_dir_all(&config.library_dir).await?;
    tracing::info!(
        library_dir = %config.library_dir.display(),
        "Audio library directory ready"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the synthesis engine
    let engine = Arc::new(GoogleTranslateEngine::new());

    // 2. Instantiate repositories and services
    let library_repo = Arc::new(LibraryRepository::new(config.library_dir.clone()));
    let tts_service = Arc::new(TtsService::new(engine, config.tts_cache_enabled));

    // 3. Instantiate controllers (inject services)
    let tts_controller = Arc::new(TtsController::new(
        tts_service.clone(),
        library_repo.clone(),
    ));
    let library_controller = Arc::new(LibraryController::new(library_repo));
    let stream_controller = Arc::new(StreamController::new(tts_service));

    // Start HTTP server with all routes
    start_http_server(
        config,
        tts_controller,
        library_controller,
        stream_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speechbox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speechbox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
