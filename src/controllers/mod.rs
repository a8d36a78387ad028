pub mod health;
pub mod library;
pub mod stream;
pub mod tts;
