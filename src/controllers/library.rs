use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::{
    domain::library::LibraryEntry, error::AppResult,
    infrastructure::repositories::LibraryRepository,
};

/// Response for GET /api/v1/library
#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryListResponse {
    pub total_files: usize,
    pub files: Vec<LibraryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

pub struct LibraryController {
    library: Arc<LibraryRepository>,
}

impl LibraryController {
    pub fn new(library: Arc<LibraryRepository>) -> Self {
        Self { library }
    }

    /// GET /api/v1/library - List saved audio files, most recent first
    pub async fn list(
        State(controller): State<Arc<LibraryController>>,
    ) -> AppResult<Json<LibraryListResponse>> {
        let files = controller.library.list().await?;

        Ok(Json(LibraryListResponse {
            total_files: files.len(),
            files,
        }))
    }

    /// GET /api/v1/library/{filename} - Stream one audio file
    pub async fn fetch(
        State(controller): State<Arc<LibraryController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let file = controller.library.fetch(&filename).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());
        if let Ok(disposition) = format!("attachment; filename=\"{}\"", filename).parse() {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }

        let body = Body::from_stream(ReaderStream::new(file));
        Ok((StatusCode::OK, headers, body))
    }

    /// DELETE /api/v1/library/{filename} - Remove one audio file
    pub async fn delete(
        State(controller): State<Arc<LibraryController>>,
        Path(filename): Path<String>,
    ) -> AppResult<Json<DeleteResponse>> {
        controller.library.delete(&filename).await?;

        Ok(Json(DeleteResponse {
            status: "success".to_string(),
            message: format!("File '{}' deleted successfully", filename),
        }))
    }
}
