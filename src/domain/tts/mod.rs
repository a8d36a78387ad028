pub mod error;
pub mod language;
pub mod request;
pub mod service;

pub use error::{TtsServiceError, ValidationError};
pub use language::supported_languages;
pub use request::SpeechRequest;
pub use service::TtsService;
