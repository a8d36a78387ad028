use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one persisted audio file in the library.
///
/// Entries are never mutated after creation; the directory listing is the
/// source of truth, there is no index file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub filename: String,
    pub size: u64,
    pub size_mb: f64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl LibraryEntry {
    /// Size in MiB rounded to two decimals
    pub fn size_mb_from_bytes(size: u64) -> f64 {
        (size as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
    }
}
