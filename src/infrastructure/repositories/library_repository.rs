use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};
use tokio::fs;

use crate::domain::library::{LibraryEntry, LibraryError};
use crate::domain::tts::SpeechRequest;

const AUDIO_EXTENSION: &str = "mp3";
const SAFE_PREFIX_MAX_CHARS: usize = 30;
const FALLBACK_PREFIX: &str = "audio";

/// Filesystem-backed audio library.
///
/// One flat directory of MP3 files named `{timestamp}_{lang}_{prefix}.mp3`.
/// No in-process locking: concurrent operations on distinct files never
/// conflict, and same-file races are resolved by the filesystem's atomic
/// create/delete semantics.
pub struct LibraryRepository {
    root: PathBuf,
}

impl LibraryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write synthesized audio to the library and return its metadata.
    ///
    /// Identical timestamp-second, language and text prefix overwrite the
    /// existing file silently; the naming scheme accepts that collision.
    pub async fn create(
        &self,
        request: &SpeechRequest,
        audio: &[u8],
    ) -> Result<LibraryEntry, LibraryError> {
        // One clock reading stamps both the filename and the metadata
        let now = Local::now();
        let filename = build_filename(request, &now);
        let path = self.root.join(&filename);

        fs::write(&path, audio).await?;

        tracing::info!(
            filename = %filename,
            size = audio.len(),
            "Audio saved to library"
        );

        let created = now.with_timezone(&Utc);
        Ok(LibraryEntry {
            filename,
            size: audio.len() as u64,
            size_mb: LibraryEntry::size_mb_from_bytes(audio.len() as u64),
            created,
            modified: created,
        })
    }

    /// List all audio files in the library, most recent first.
    ///
    /// Ordering comes from the filename-descending sort; the timestamp
    /// prefix in the naming scheme makes that newest-first.
    pub async fn list(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;

        while let Some(dir_entry) = dir.next_entry().await? {
            let path = dir_entry.path();
            if !is_audio_file(&path) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let metadata = dir_entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            // Not every filesystem records a creation time
            let created = metadata.created().unwrap_or(modified);

            entries.push(LibraryEntry {
                filename: filename.to_string(),
                size: metadata.len(),
                size_mb: LibraryEntry::size_mb_from_bytes(metadata.len()),
                created: DateTime::<Utc>::from(created),
                modified: DateTime::<Utc>::from(modified),
            });
        }

        entries.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(entries)
    }

    /// Open a library file for streaming
    pub async fn fetch(&self, filename: &str) -> Result<fs::File, LibraryError> {
        let path = self.checked_path(filename)?;

        if !fs::try_exists(&path).await? {
            return Err(LibraryError::NotFound(filename.to_string()));
        }
        if !is_audio_file(&path) {
            return Err(LibraryError::NotAudio);
        }

        Ok(fs::File::open(&path).await?)
    }

    /// Remove a file from the library
    pub async fn delete(&self, filename: &str) -> Result<(), LibraryError> {
        let path = self.checked_path(filename)?;

        if !fs::try_exists(&path).await? {
            return Err(LibraryError::NotFound(filename.to_string()));
        }

        fs::remove_file(&path).await?;
        tracing::info!(filename = %filename, "Audio deleted from library");
        Ok(())
    }

    /// Resolve a client-supplied filename under the root, rejecting any
    /// traversal attempt before touching the filesystem.
    fn checked_path(&self, filename: &str) -> Result<PathBuf, LibraryError> {
        if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
            return Err(LibraryError::InvalidName);
        }
        Ok(self.root.join(filename))
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(AUDIO_EXTENSION))
        .unwrap_or(false)
}

/// Build a collision-tolerant library filename from a request:
/// `{YYYYMMDD_HHMMSS}_{lang}_{safePrefix}.mp3`
fn build_filename(request: &SpeechRequest, now: &DateTime<Local>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    format!(
        "{}_{}_{}.{}",
        timestamp,
        request.lang,
        safe_prefix(&request.text),
        AUDIO_EXTENSION
    )
}

/// First 30 characters of the text filtered to ASCII alphanumerics, space,
/// hyphen and underscore, trimmed, spaces replaced by underscores. Falls back
/// to `audio` if nothing survives the filter.
fn safe_prefix(text: &str) -> String {
    let filtered: String = text
        .chars()
        .take(SAFE_PREFIX_MAX_CHARS)
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let prefix = filtered.trim().replace(' ', "_");
    if prefix.is_empty() {
        FALLBACK_PREFIX.to_string()
    } else {
        prefix
    }
}
