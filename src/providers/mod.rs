/*!
 * Caption source implementations.
 *
 * This module contains the clients the request façade can fetch captions from:
 * - YouTube: the public watch page and InnerTube player API
 * - Mock: in-memory tracks for tests and local demos
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::SourceError;
use crate::tracks::{RawTrack, TranscriptSegment};

/// Common trait for all caption sources
///
/// Implementations are shared across concurrent requests, so they must be
/// `Send + Sync` and keep no per-request state.
#[async_trait]
pub trait CaptionSource: Send + Sync + Debug {
    /// Fetch every caption track the source knows for a video
    ///
    /// # Returns
    /// * `Result<Vec<RawTrack>, SourceError>` - Tracks in source order, or
    ///   `TracksDisabled`, `VideoUnavailable` or `Source`
    async fn fetch_track_collection(&self, video_id: &str) -> Result<Vec<RawTrack>, SourceError>;

    /// Fetch the transcript of one track
    ///
    /// # Arguments
    /// * `video_id` - The video the track belongs to
    /// * `language_code` - Code of a track returned by `fetch_track_collection`
    ///
    /// # Returns
    /// * `Result<Vec<TranscriptSegment>, SourceError>` - Segments in playback order
    async fn fetch_transcript_body(
        &self,
        video_id: &str,
        language_code: &str,
    ) -> Result<Vec<TranscriptSegment>, SourceError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

pub mod mock;
pub mod youtube;
