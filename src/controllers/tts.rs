use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    domain::tts::{supported_languages, SpeechRequest, TtsService},
    error::AppResult,
    infrastructure::repositories::LibraryRepository,
};

/// Body for POST /api/v1/tts and /api/v1/tts/save.
///
/// `text` defaults to empty so an absent field reaches the validator and
/// comes back as a structured `EmptyText` rejection instead of an extractor
/// rejection with a plain-text body.
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsApiRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Response for POST /api/v1/tts/save
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub message: String,
    pub filename: String,
    pub text: String,
    pub lang: String,
    pub size: u64,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: BTreeMap<String, String>,
}

pub struct TtsController {
    tts_service: Arc<TtsService>,
    library: Arc<LibraryRepository>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, library: Arc<LibraryRepository>) -> Self {
        Self {
            tts_service,
            library,
        }
    }

    /// POST /api/v1/tts - Convert text to speech and return the MP3 bytes
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsApiRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let request = SpeechRequest::validate(&request.text, request.lang.as_deref())?;

        let audio = controller.tts_service.synthesize(&request).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());
        if let Ok(disposition) =
            format!("attachment; filename=\"speech_{}.mp3\"", request.lang).parse()
        {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }

        // The audio buffer is owned by the response body from here on and is
        // dropped when the transfer completes or aborts
        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// POST /api/v1/tts/save - Convert text to speech and persist it
    pub async fn synthesize_and_save(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsApiRequest>,
    ) -> AppResult<Json<SaveResponse>> {
        let request = SpeechRequest::validate(&request.text, request.lang.as_deref())?;

        let audio = controller.tts_service.synthesize(&request).await?;
        let entry = controller.library.create(&request, &audio).await?;

        Ok(Json(SaveResponse {
            status: "success".to_string(),
            message: "Audio saved to library".to_string(),
            filename: entry.filename,
            text: request.text,
            lang: request.lang,
            size: entry.size,
            created: entry.created,
        }))
    }

    /// GET /api/v1/languages - Static list of supported language codes
    pub async fn languages(
        State(_controller): State<Arc<TtsController>>,
    ) -> AppResult<Json<LanguagesResponse>> {
        let languages = supported_languages()
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        Ok(Json(LanguagesResponse { languages }))
    }
}
