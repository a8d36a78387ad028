use async_trait::async_trait;

use super::SynthesisEngine;

/// The unauthenticated endpoint rejects long query strings, so text is
/// synthesized in batches and the MP3 frames concatenated.
const MAX_BATCH_CHARS: usize = 200;

const DEFAULT_BASE_URL: &str = "https://translate.google.com/translate_tts";

/// Synthesis engine backed by the Google Translate TTS endpoint
pub struct GoogleTranslateEngine {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateEngine {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for GoogleTranslateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SynthesisEngine for GoogleTranslateEngine {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, String> {
        let batches = split_into_batches(text);
        let mut audio = Vec::new();

        tracing::debug!(
            lang = %lang,
            batches = batches.len(),
            "Requesting speech synthesis"
        );

        for batch in &batches {
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("q", batch.as_str()),
                ])
                .send()
                .await
                .map_err(|e| format!("speech backend request failed: {}", e))?;

            if !response.status().is_success() {
                return Err(format!(
                    "speech backend returned {} for language '{}'",
                    response.status(),
                    lang
                ));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| format!("speech backend response read failed: {}", e))?;
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }
}

/// Split text into whitespace-bounded batches of at most MAX_BATCH_CHARS
/// characters. A single word longer than the limit is hard-split.
fn split_into_batches(text: &str) -> Vec<String> {
    if text.chars().count() <= MAX_BATCH_CHARS {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > MAX_BATCH_CHARS {
            if !current.is_empty() {
                batches.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(MAX_BATCH_CHARS) {
                batches.push(piece.iter().collect());
            }
            continue;
        }

        let separator = usize::from(!current.is_empty());
        if current_chars + separator + word_chars > MAX_BATCH_CHARS {
            batches.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
