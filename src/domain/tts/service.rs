use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use super::error::TtsServiceError;
use super::request::SpeechRequest;
use crate::infrastructure::engines::SynthesisEngine;

/// Service orchestrating speech synthesis.
///
/// Thin by design: validation happens before this layer, persistence after
/// it. The service owns the engine handle and an optional result cache, and
/// normalizes engine failures into the caller-facing diagnostic.
pub struct TtsService {
    engine: Arc<dyn SynthesisEngine>,
    cache: Option<Cache<String, Vec<u8>>>,
}

impl TtsService {
    pub fn new(engine: Arc<dyn SynthesisEngine>, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self { engine, cache }
    }

    /// Synthesize a validated request into encoded audio bytes.
    ///
    /// The full audio is materialized in memory and handed to the caller,
    /// which owns it for exactly one response; no temporary files are left
    /// behind on any path.
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsServiceError> {
        tracing::info!(
            lang = %request.lang,
            text_length = request.text.chars().count(),
            "TTS synthesis request"
        );

        let cache_key = format!("{}:{}", request.lang, request.text);

        if let Some(cache) = &self.cache {
            if let Some(audio) = cache.get(&cache_key).await {
                tracing::info!(
                    lang = %request.lang,
                    cached_audio_size = audio.len(),
                    "TTS cache hit - returning cached audio"
                );
                return Ok(audio);
            }
        }

        let audio = self
            .engine
            .synthesize(&request.text, &request.lang)
            .await
            .map_err(TtsServiceError::Synthesis)?;

        tracing::info!(
            lang = %request.lang,
            audio_size = audio.len(),
            "Speech synthesized"
        );

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, audio.clone()).await;
        }

        Ok(audio)
    }
}
