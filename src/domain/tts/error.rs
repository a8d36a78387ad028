use crate::error::AppError;

/// Rejections produced by [`super::SpeechRequest::validate`]
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Text cannot be empty or only whitespace")]
    EmptyText,
    #[error("Text must be 5000 characters or less (got {0})")]
    TooLong(usize),
    #[error("Text contains invalid characters: {0}")]
    Unencodable(String),
    #[error("Language code cannot be empty")]
    EmptyLanguage,
}

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    /// Engine-level failure. The message wording is a contract: callers
    /// surface it verbatim and expect it to mention speech/language.
    #[error("Failed to generate speech. Please check language code and text: {0}")]
    Synthesis(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Synthesis(_) => AppError::BadRequest(err.to_string()),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
