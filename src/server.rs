/*!
 * HTTP binding for the transcript service.
 *
 * Routes:
 * - `GET /` - service banner
 * - `POST /transcript` - resolve a transcript for `{video_id, languages?}`
 * - `GET /available-transcripts/{video_id}` - list caption tracks
 */

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{error, info, warn};
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::signal;

use crate::errors::{FailureClass, ResolveError};
use crate::tracks::LanguagePreference;
use crate::transcript_service::{TrackListResponse, TranscriptResponse, TranscriptService};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: TranscriptService,
    pub default_preference: LanguagePreference,
}

/// Body of `POST /transcript`
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRequest {
    pub video_id: String,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a 404 error with the provided message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Creates a 500 error with the provided message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        match error.class() {
            FailureClass::NotFound => {
                warn!("{}", error);
                Self::not_found(error.to_string())
            }
            FailureClass::Internal => {
                error!("{}", error);
                Self::internal(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Build the router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/transcript", post(get_transcript))
        .route("/available-transcripts/{video_id}", get(list_transcripts))
        .with_state(state)
}

/// Bind `host:port` and serve until Ctrl+C
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding to {}:{}", host, port))?;
    let addr: SocketAddr = listener.local_addr().context("reading bound address")?;
    info!(
        "Caption API listening on http://{} (source: {})",
        addr,
        state.service.source_name()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running API server")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", err);
    }
}

pub async fn read_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Caption Track API Server" }))
}

pub async fn get_transcript(
    State(state): State<AppState>,
    Json(request): Json<TranscriptRequest>,
) -> ApiResult<Json<TranscriptResponse>> {
    let preference = LanguagePreference::or_default(request.languages, &state.default_preference);
    info!(
        "Transcript request for {} in {:?}",
        request.video_id,
        preference.codes()
    );

    let response = state.service.transcript(&request.video_id, &preference).await?;
    Ok(Json(response))
}

pub async fn list_transcripts(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<TrackListResponse>> {
    info!("Track listing request for {}", video_id);

    let collection = state.service.list_tracks(&video_id).await?;
    Ok(Json(collection.into()))
}
