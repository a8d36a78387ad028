use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Maximum accepted text length, in characters, after trimming
pub const MAX_TEXT_LENGTH: usize = 5000;

const DEFAULT_LANGUAGE: &str = "en";

/// A validated text-to-speech request.
///
/// Constructed only through [`SpeechRequest::validate`], so every instance
/// carries trimmed non-empty text within bounds and a trimmed, lower-cased
/// language code. Whether the code is actually speakable is decided later by
/// the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
}

impl SpeechRequest {
    /// Validate and normalize raw text/language input.
    ///
    /// `raw_lang` of `None` defaults to `"en"`.
    pub fn validate(
        raw_text: &str,
        raw_lang: Option<&str>,
    ) -> Result<SpeechRequest, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_LENGTH {
            return Err(ValidationError::TooLong(char_count));
        }

        // The request must survive a round trip through JSON-based transports
        if let Err(e) = serde_json::to_string(text) {
            return Err(ValidationError::Unencodable(e.to_string()));
        }

        let lang = raw_lang.unwrap_or(DEFAULT_LANGUAGE).trim().to_lowercase();
        if lang.is_empty() {
            return Err(ValidationError::EmptyLanguage);
        }

        Ok(SpeechRequest {
            text: text.to_string(),
            lang,
        })
    }
}
