/*!
 * Error types for the captionsrv application.
 *
 * This module contains the failure taxonomy shared by the caption sources,
 * the request façade and the binary, using the thiserror crate for
 * ergonomic error definitions.
 */

use thiserror::Error;

/// Errors reported by a caption source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The video exists but has captions turned off
    #[error("Transcripts are disabled for this video")]
    TracksDisabled,

    /// The video does not exist or cannot be played
    #[error("Video is unavailable")]
    VideoUnavailable,

    /// Any other upstream failure
    #[error("Caption source error: {0}")]
    Source(String),

    /// The track list was available but the transcript body was not
    #[error("Transcript fetch failed: {0}")]
    TranscriptFetchFailed(String),
}

/// Coarse classification used by the transport layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The caller asked for something that does not exist
    NotFound,
    /// Transient or internal failure
    Internal,
}

/// Failures of the request façade, annotated with the request context
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Transcripts are disabled for video {video_id}")]
    TracksDisabled {
        video_id: String,
        requested: Vec<String>,
    },

    #[error("Video {video_id} is unavailable")]
    VideoUnavailable {
        video_id: String,
        requested: Vec<String>,
    },

    #[error("No caption tracks available for video {video_id}")]
    NoTracksAvailable { video_id: String },

    #[error(
        "No transcript found for video {video_id} in languages {requested:?} (available: {available:?})"
    )]
    NoMatchingLanguage {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("Failed to fetch the {language_code} transcript for video {video_id}: {detail}")]
    TranscriptFetchFailed {
        video_id: String,
        requested: Vec<String>,
        language_code: String,
        detail: String,
    },

    #[error("Caption source failed for video {video_id}: {detail}")]
    Source {
        video_id: String,
        requested: Vec<String>,
        detail: String,
    },
}

impl ResolveError {
    /// Wrap a failure of the track-list call.
    ///
    /// `requested` is empty for listing requests.
    pub fn from_source(error: SourceError, video_id: &str, requested: &[String]) -> Self {
        let video_id = video_id.to_string();
        let requested = requested.to_vec();
        match error {
            SourceError::TracksDisabled => Self::TracksDisabled { video_id, requested },
            SourceError::VideoUnavailable => Self::VideoUnavailable { video_id, requested },
            SourceError::Source(detail) => Self::Source { video_id, requested, detail },
            // Not expected from a track-list call; keep the detail and classify as internal
            SourceError::TranscriptFetchFailed(detail) => Self::Source { video_id, requested, detail },
        }
    }

    /// Whether the failure is "not found" or internal
    pub fn class(&self) -> FailureClass {
        match self {
            Self::TracksDisabled { .. }
            | Self::VideoUnavailable { .. }
            | Self::NoTracksAvailable { .. }
            | Self::NoMatchingLanguage { .. } => FailureClass::NotFound,
            Self::TranscriptFetchFailed { .. } | Self::Source { .. } => FailureClass::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == FailureClass::NotFound
    }

    /// The video the failed request was about
    pub fn video_id(&self) -> &str {
        match self {
            Self::TracksDisabled { video_id, .. }
            | Self::VideoUnavailable { video_id, .. }
            | Self::NoTracksAvailable { video_id }
            | Self::NoMatchingLanguage { video_id, .. }
            | Self::TranscriptFetchFailed { video_id, .. }
            | Self::Source { video_id, .. } => video_id,
        }
    }

    /// The preference list of the failed request; empty for listings
    pub fn requested(&self) -> &[String] {
        match self {
            Self::NoTracksAvailable { .. } => &[],
            Self::TracksDisabled { requested, .. }
            | Self::VideoUnavailable { requested, .. }
            | Self::NoMatchingLanguage { requested, .. }
            | Self::TranscriptFetchFailed { requested, .. }
            | Self::Source { requested, .. } => requested,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    Io(String),

    /// Error running the HTTP server
    #[error("Server error: {0}")]
    Server(String),

    /// Error resolving captions
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}
