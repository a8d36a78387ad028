pub mod google;

pub use google::GoogleTranslateEngine;

use async_trait::async_trait;

/// Abstraction over the external text-to-speech backend.
///
/// Implementations are responsible for:
/// - Handling backend-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single MP3 byte sequence
#[async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Synthesize text to speech at normal narration speed.
    ///
    /// Returns merged audio data ready for playback (MP3 format).
    /// The error string describes why the backend refused the request,
    /// typically an unsupported language code.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, String>;
}
