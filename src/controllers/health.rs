use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_NAME: &str = "SpeechBox API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET /health - container health check
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": SERVICE_VERSION
        })),
    )
}

/// GET /api/v1/ - API information
pub async fn api_root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "message": format!("Welcome to {}!", SERVICE_NAME),
            "version": SERVICE_VERSION,
            "endpoints": {
                "POST /api/v1/tts": "Convert text to speech (returns MP3 file)",
                "POST /api/v1/tts/save": "Convert text to speech and save to library",
                "GET /api/v1/library": "List all saved audio files",
                "GET /api/v1/library/{filename}": "Download a specific audio file",
                "DELETE /api/v1/library/{filename}": "Delete a specific audio file",
                "GET /api/v1/languages": "List available languages",
                "WebSocket /ws/tts": "Stream TTS audio in real-time"
            },
            "documentation": {
                "readme": "/api/v1/",
                "health": "/health"
            }
        })),
    )
}
