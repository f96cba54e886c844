/*!
 * Mock caption source for testing and local demos.
 *
 * This module provides an in-memory source that simulates different upstream behaviors:
 * - `MockCaptionSource::new()` - Serves whatever videos were registered
 * - `MockCaptionSource::failing()` - Every track-list request fails
 * - `MockCaptionSource::demo()` - A small fixed catalog used by `--source mock`
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::SourceError;
use crate::providers::CaptionSource;
use crate::tracks::{RawTrack, TranscriptSegment};

/// Behavior mode for the mock source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Serve registered videos; unknown ids are unavailable
    Working,
    /// Every video reports captions disabled
    TracksDisabled,
    /// Every video is unavailable
    VideoUnavailable,
    /// Track-list requests fail with a source error
    Failing,
    /// Track lists succeed but transcript bodies fail
    TranscriptFailing,
    /// Like `Working`, after sleeping on every call
    Slow { delay_ms: u64 },
}

#[derive(Debug, Clone, Default)]
struct MockVideo {
    tracks: Vec<RawTrack>,
    bodies: HashMap<String, Vec<TranscriptSegment>>,
}

/// In-memory caption source
#[derive(Debug, Clone)]
pub struct MockCaptionSource {
    behavior: MockBehavior,
    videos: HashMap<String, MockVideo>,
    track_requests: Arc<AtomicUsize>,
    transcript_requests: Arc<AtomicUsize>,
}

impl Default for MockCaptionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCaptionSource {
    /// Create a working source with no videos
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Working)
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            videos: HashMap::new(),
            track_requests: Arc::new(AtomicUsize::new(0)),
            transcript_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a source whose track-list requests always fail
    pub fn failing() -> Self {
        Self::with_behavior(MockBehavior::Failing)
    }

    /// Source preloaded with a couple of sample videos
    pub fn demo() -> Self {
        Self::new()
            .with_video(
                "abc123",
                vec![
                    RawTrack::new("en").named("English"),
                    RawTrack::new("pt-BR")
                        .named("Portuguese (Brazil) (auto-generated)")
                        .generated()
                        .translatable(["es", "fr"]),
                ],
            )
            .with_transcript(
                "abc123",
                "en",
                vec![
                    TranscriptSegment::new("Hello and welcome.", 0.0, 2.5),
                    TranscriptSegment::new("Let's get started.", 2.5, 1.8),
                ],
            )
            .with_transcript(
                "abc123",
                "pt-BR",
                vec![
                    TranscriptSegment::new("Olá e bem-vindos.", 0.0, 2.5),
                    TranscriptSegment::new("Vamos começar.", 2.5, 1.8),
                ],
            )
            .with_video("silent00001", vec![])
    }

    /// Register a video and its tracks
    pub fn with_video(mut self, video_id: &str, tracks: Vec<RawTrack>) -> Self {
        self.videos.entry(video_id.to_string()).or_default().tracks = tracks;
        self
    }

    /// Register the transcript body of one track
    pub fn with_transcript(
        mut self,
        video_id: &str,
        language_code: &str,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        self.videos
            .entry(video_id.to_string())
            .or_default()
            .bodies
            .insert(language_code.to_string(), segments);
        self
    }

    /// Number of `fetch_track_collection` calls, shared between clones
    pub fn track_requests(&self) -> usize {
        self.track_requests.load(Ordering::SeqCst)
    }

    /// Number of `fetch_transcript_body` calls, shared between clones
    pub fn transcript_requests(&self) -> usize {
        self.transcript_requests.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let MockBehavior::Slow { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }
    }
}

#[async_trait]
impl CaptionSource for MockCaptionSource {
    async fn fetch_track_collection(&self, video_id: &str) -> Result<Vec<RawTrack>, SourceError> {
        self.track_requests.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        match self.behavior {
            MockBehavior::TracksDisabled => Err(SourceError::TracksDisabled),
            MockBehavior::VideoUnavailable => Err(SourceError::VideoUnavailable),
            MockBehavior::Failing => Err(SourceError::Source(
                "Simulated caption source failure".to_string(),
            )),
            MockBehavior::Working | MockBehavior::TranscriptFailing | MockBehavior::Slow { .. } => {
                self.videos
                    .get(video_id)
                    .map(|video| video.tracks.clone())
                    .ok_or(SourceError::VideoUnavailable)
            }
        }
    }

    async fn fetch_transcript_body(
        &self,
        video_id: &str,
        language_code: &str,
    ) -> Result<Vec<TranscriptSegment>, SourceError> {
        self.transcript_requests.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.behavior == MockBehavior::TranscriptFailing {
            return Err(SourceError::TranscriptFetchFailed(
                "Simulated transcript download failure".to_string(),
            ));
        }

        self.videos
            .get(video_id)
            .and_then(|video| video.bodies.get(language_code))
            .cloned()
            .ok_or_else(|| {
                SourceError::TranscriptFetchFailed(format!(
                    "No transcript stored for {} ({})",
                    video_id, language_code
                ))
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
