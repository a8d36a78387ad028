use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::tts::{SpeechRequest, TtsService};

/// One binary frame carries at most this many audio bytes
pub const CHUNK_SIZE: usize = 8192;

/// Client request frame: `{"text": "...", "lang": "en"}`
#[derive(Debug, Deserialize)]
struct StreamRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    lang: Option<String>,
}

/// Server status frames interleaved with the binary audio chunks
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusFrame {
    Generating { message: String },
    Ready { message: String, size: usize },
    Complete { message: String },
    Error { error: String },
}

/// Per-request phase of a streaming session.
///
/// A session accepts exactly one request at a time; the next request is only
/// read once the previous cycle has returned to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Validating,
    Generating,
    Streaming,
}

pub struct StreamController {
    tts_service: Arc<TtsService>,
}

impl StreamController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// GET /ws/tts - upgrade to a streaming TTS session
    pub async fn upgrade(
        ws: WebSocketUpgrade,
        State(controller): State<Arc<StreamController>>,
    ) -> Response {
        let tts_service = controller.tts_service.clone();
        ws.on_upgrade(move |socket| StreamSession::new(socket, tts_service).run())
    }
}

/// One WebSocket connection's lifetime: a strictly sequential loop of
/// generate -> stream -> complete cycles. Sessions share nothing but the
/// read-only service handle.
struct StreamSession {
    socket: WebSocket,
    tts_service: Arc<TtsService>,
    state: SessionState,
}

impl StreamSession {
    fn new(socket: WebSocket, tts_service: Arc<TtsService>) -> Self {
        Self {
            socket,
            tts_service,
            state: SessionState::Idle,
        }
    }

    async fn run(mut self) {
        while let Some(message) = self.socket.recv().await {
            let message = match message {
                Ok(message) => message,
                // Peer dropped mid-read; nobody left to report to
                Err(_) => break,
            };

            match message {
                Message::Text(payload) => {
                    if self.handle_cycle(&payload).await.is_err() {
                        break;
                    }
                    self.state = SessionState::Idle;
                }
                Message::Close(_) => break,
                _ => continue,
            }
        }

        tracing::debug!("Client disconnected from TTS stream");
    }

    /// Run one request cycle to completion.
    ///
    /// Cycle-level failures (bad JSON, validation, synthesis) are reported to
    /// the peer as an error frame and the session keeps going. `Err` here
    /// means a send failed, i.e. the peer is gone and the loop must stop.
    async fn handle_cycle(&mut self, payload: &str) -> Result<(), axum::Error> {
        self.state = SessionState::Validating;

        let request = match parse_request(payload) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(error = %error, "Rejected stream request");
                return self.send_frame(&StatusFrame::Error { error }).await;
            }
        };

        self.state = SessionState::Generating;
        let preview: String = request.text.chars().take(50).collect();
        self.send_frame(&StatusFrame::Generating {
            message: format!("Generating speech for: {}...", preview),
        })
        .await?;

        let audio = match self.tts_service.synthesize(&request).await {
            Ok(audio) => audio,
            Err(e) => {
                return self
                    .send_frame(&StatusFrame::Error {
                        error: e.to_string(),
                    })
                    .await;
            }
        };

        self.state = SessionState::Streaming;
        self.send_frame(&StatusFrame::Ready {
            message: "Audio ready, streaming...".to_string(),
            size: audio.len(),
        })
        .await?;

        // Sequential chunks in byte-offset order; the final one may be short
        for chunk in audio.chunks(CHUNK_SIZE) {
            self.socket.send(Message::Binary(chunk.to_vec())).await?;
        }

        self.send_frame(&StatusFrame::Complete {
            message: "Audio streaming complete".to_string(),
        })
        .await
    }

    async fn send_frame(&mut self, frame: &StatusFrame) -> Result<(), axum::Error> {
        let payload = serde_json::to_string(frame)
            .map_err(|e| axum::Error::new(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        self.socket.send(Message::Text(payload)).await
    }
}

fn parse_request(payload: &str) -> Result<SpeechRequest, String> {
    let request: StreamRequest =
        serde_json::from_str(payload).map_err(|e| format!("Invalid request: {}", e))?;
    SpeechRequest::validate(&request.text, request.lang.as_deref()).map_err(|e| e.to_string())
}
