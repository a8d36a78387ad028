use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// Filename contains path separators or parent-directory markers.
    /// Rejected before any filesystem lookup.
    #[error("Invalid filename")]
    InvalidName,

    /// The file exists but is not an audio artifact
    #[error("Only MP3 files are allowed")]
    NotAudio,

    #[error("Audio file '{0}' not found")]
    NotFound(String),

    #[error("Library storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::InvalidName | LibraryError::NotAudio => {
                AppError::BadRequest(err.to_string())
            }
            LibraryError::NotFound(_) => AppError::NotFound(err.to_string()),
            LibraryError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}
