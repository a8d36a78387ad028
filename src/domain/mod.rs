pub mod library;
pub mod tts;
