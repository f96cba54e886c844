/*!
 * Normalization of caption source data into the track model.
 *
 * Caption sources report tracks as [`RawTrack`] values, which carry whatever
 * the upstream said. [`CatalogResolver`] is the only code that reads them:
 * it trims codes, fills in missing names, clears translation targets on
 * untranslatable tracks and drops entries that still fail validation. When
 * two tracks share a code, an uploaded track is kept over an auto-generated
 * one; otherwise the first reported track is kept.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::model::{CaptionTrack, TrackCollection};
use crate::language_utils;

/// A caption track exactly as a source reported it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    pub language_code: String,
    #[serde(default)]
    pub language_name: Option<String>,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub is_translatable: bool,
    #[serde(default)]
    pub translation_languages: Vec<String>,
}

impl RawTrack {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.language_name = Some(name.into());
        self
    }

    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }

    pub fn translatable<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_translatable = true;
        self.translation_languages = targets.into_iter().map(Into::into).collect();
        self
    }
}

/// Normalized collection plus bookkeeping about what was discarded
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResolution {
    pub collection: TrackCollection,
    /// Entries that failed validation
    pub dropped_invalid: usize,
    /// Entries whose code repeated an earlier track's code
    pub dropped_duplicates: usize,
}

impl CatalogResolution {
    pub fn dropped(&self) -> usize {
        self.dropped_invalid + self.dropped_duplicates
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogResolver;

impl CatalogResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the track collection for `video_id`, preserving source order
    pub fn resolve(&self, video_id: &str, raw_tracks: Vec<RawTrack>) -> CatalogResolution {
        let mut tracks: Vec<CaptionTrack> = Vec::with_capacity(raw_tracks.len());
        let mut dropped_invalid = 0;
        let mut dropped_duplicates = 0;

        for raw in raw_tracks {
            let track = Self::normalize(raw);

            if !track.is_valid() {
                debug!("Video {}: dropping invalid caption track {:?}", video_id, track);
                dropped_invalid += 1;
                continue;
            }

            let existing = tracks
                .iter_mut()
                .find(|t| language_utils::codes_equal(&t.language_code, &track.language_code));

            match existing {
                // Uploaded captions win over auto-generated ones with the same code
                Some(kept) if kept.is_generated && !track.is_generated => {
                    debug!(
                        "Video {}: uploaded {} track replaces the auto-generated one",
                        video_id, track.language_code
                    );
                    *kept = track;
                    dropped_duplicates += 1;
                }
                Some(_) => {
                    debug!(
                        "Video {}: dropping duplicate caption track {}",
                        video_id, track.language_code
                    );
                    dropped_duplicates += 1;
                }
                None => tracks.push(track),
            }
        }

        CatalogResolution {
            collection: TrackCollection::new(video_id, tracks),
            dropped_invalid,
            dropped_duplicates,
        }
    }

    fn normalize(raw: RawTrack) -> CaptionTrack {
        let language_code = language_utils::normalize_code(&raw.language_code);

        let language_name = raw
            .language_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .or_else(|| language_utils::get_language_name(&language_code).ok())
            .unwrap_or_else(|| language_code.clone());

        let translation_targets: BTreeSet<String> = if raw.is_translatable {
            raw.translation_languages
                .iter()
                .map(|code| language_utils::normalize_code(code))
                .filter(|code| !code.is_empty())
                .collect()
        } else {
            BTreeSet::new()
        };

        CaptionTrack {
            language_name,
            language_code,
            is_generated: raw.is_generated,
            is_translatable: raw.is_translatable,
            translation_targets,
        }
    }
}
