/*!
 * Request façade over a caption source.
 *
 * `TranscriptService` is what the HTTP layer and the CLI call. It fetches a
 * video's tracks from the configured [`CaptionSource`], normalizes them with
 * the [`CatalogResolver`], and either lists them or runs the
 * [`LanguageMatcher`] and downloads the chosen transcript.
 *
 * The service holds no per-request state and never caches; clones share the
 * same source and can be used from any number of tasks at once.
 */

use log::debug;
use serde::Serialize;
use std::sync::Arc;

use crate::errors::ResolveError;
use crate::providers::CaptionSource;
use crate::tracks::{
    CaptionTrack, CatalogResolver, LanguageMatcher, LanguagePreference, MatchOutcome,
    TrackCollection, TranscriptSegment,
};

/// Outcome of resolving a transcript for a preference list
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Matched {
        track: CaptionTrack,
        transcript: Vec<TranscriptSegment>,
    },
    NoTracksAvailable,
    NoMatchingLanguage {
        requested: Vec<String>,
        available: Vec<String>,
    },
}

/// Successful transcript response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub language_code: String,
    pub transcript: Vec<TranscriptSegment>,
}

/// Successful track listing response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackListResponse {
    pub video_id: String,
    pub available_transcripts: Vec<CaptionTrack>,
}

impl From<TrackCollection> for TrackListResponse {
    fn from(collection: TrackCollection) -> Self {
        Self {
            video_id: collection.video_id,
            available_transcripts: collection.tracks,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptService {
    source: Arc<dyn CaptionSource>,
    catalog: CatalogResolver,
    matcher: LanguageMatcher,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        Self {
            source,
            catalog: CatalogResolver::new(),
            matcher: LanguageMatcher::new(),
        }
    }

    /// Name of the underlying caption source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and normalize the tracks of a video
    async fn load_collection(
        &self,
        video_id: &str,
        requested: &[String],
    ) -> Result<TrackCollection, ResolveError> {
        let raw_tracks = self
            .source
            .fetch_track_collection(video_id)
            .await
            .map_err(|e| ResolveError::from_source(e, video_id, requested))?;

        let resolution = self.catalog.resolve(video_id, raw_tracks);
        if resolution.dropped() > 0 {
            debug!(
                "Video {}: dropped {} invalid and {} duplicate caption track(s)",
                video_id, resolution.dropped_invalid, resolution.dropped_duplicates
            );
        }
        Ok(resolution.collection)
    }

    /// Pick the best track for `preference` and fetch its transcript.
    ///
    /// "No tracks" and "no matching language" are outcomes, not errors; only
    /// caption source failures are returned as `Err`.
    pub async fn resolve_transcript(
        &self,
        video_id: &str,
        preference: &LanguagePreference,
    ) -> Result<ResolutionOutcome, ResolveError> {
        let collection = self.load_collection(video_id, preference.codes()).await?;

        let track = match self.matcher.select(&collection, preference) {
            MatchOutcome::Matched(track) => track.clone(),
            MatchOutcome::NoTracksAvailable => return Ok(ResolutionOutcome::NoTracksAvailable),
            MatchOutcome::NoMatchingLanguage {
                requested,
                available,
            } => {
                return Ok(ResolutionOutcome::NoMatchingLanguage {
                    requested,
                    available,
                });
            }
        };

        debug!(
            "Video {}: fetching {} transcript from {}",
            video_id,
            track.language_code,
            self.source.name()
        );

        let transcript = self
            .source
            .fetch_transcript_body(video_id, &track.language_code)
            .await
            .map_err(|e| ResolveError::TranscriptFetchFailed {
                video_id: video_id.to_string(),
                requested: preference.to_vec(),
                language_code: track.language_code.clone(),
                detail: e.to_string(),
            })?;

        Ok(ResolutionOutcome::Matched { track, transcript })
    }

    /// Resolve a transcript and fold non-matches into `ResolveError`
    pub async fn transcript(
        &self,
        video_id: &str,
        preference: &LanguagePreference,
    ) -> Result<TranscriptResponse, ResolveError> {
        match self.resolve_transcript(video_id, preference).await? {
            ResolutionOutcome::Matched { track, transcript } => Ok(TranscriptResponse {
                video_id: video_id.to_string(),
                language_code: track.language_code,
                transcript,
            }),
            ResolutionOutcome::NoTracksAvailable => Err(ResolveError::NoTracksAvailable {
                video_id: video_id.to_string(),
            }),
            ResolutionOutcome::NoMatchingLanguage {
                requested,
                available,
            } => Err(ResolveError::NoMatchingLanguage {
                video_id: video_id.to_string(),
                requested,
                available,
            }),
        }
    }

    /// List every valid track of a video without any language selection
    pub async fn list_tracks(&self, video_id: &str) -> Result<TrackCollection, ResolveError> {
        let collection = self.load_collection(video_id, &[]).await?;
        if collection.is_empty() {
            return Err(ResolveError::NoTracksAvailable {
                video_id: video_id.to_string(),
            });
        }
        Ok(collection)
    }
}
