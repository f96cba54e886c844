/*!
 * Core caption track types.
 *
 * These are plain values: the catalog resolver builds them from whatever a
 * caption source reports, the matcher reads them, and the HTTP layer
 * serializes them.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::language_utils;

/// One selectable caption stream for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Human-readable language name
    #[serde(rename = "language")]
    pub language_name: String,

    /// Language tag such as `en` or `pt-BR`
    pub language_code: String,

    /// Machine-generated (ASR) rather than uploaded
    pub is_generated: bool,

    /// Can be used as a source for on-the-fly translation
    pub is_translatable: bool,

    /// Languages reachable by translating this track
    #[serde(rename = "translation_languages")]
    pub translation_targets: BTreeSet<String>,
}

impl CaptionTrack {
    /// Create an authored, non-translatable track
    pub fn new(language_name: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            language_name: language_name.into(),
            language_code: language_code.into(),
            is_generated: false,
            is_translatable: false,
            translation_targets: BTreeSet::new(),
        }
    }

    /// Mark the track as machine-generated
    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }

    /// Mark the track translatable into the given targets
    pub fn translatable<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_translatable = true;
        self.translation_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// A track is valid when it has a code and only translatable tracks carry targets
    pub fn is_valid(&self) -> bool {
        if self.language_code.trim().is_empty() {
            return false;
        }
        self.is_translatable || self.translation_targets.is_empty()
    }

    /// Whether `code` can be reached by translating this track
    pub fn can_translate_to(&self, code: &str) -> bool {
        self.is_translatable
            && self
                .translation_targets
                .iter()
                .any(|target| language_utils::codes_equal(target, code))
    }
}

/// All caption tracks of one video, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCollection {
    pub video_id: String,
    pub tracks: Vec<CaptionTrack>,
}

impl TrackCollection {
    pub fn new(video_id: impl Into<String>, tracks: Vec<CaptionTrack>) -> Self {
        Self {
            video_id: video_id.into(),
            tracks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionTrack> {
        self.tracks.iter()
    }

    /// Sorted, de-duplicated language codes of every track
    pub fn available_codes(&self) -> Vec<String> {
        self.tracks
            .iter()
            .map(|t| t.language_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Track with exactly this code (case-insensitive)
    pub fn find(&self, code: &str) -> Option<&CaptionTrack> {
        self.tracks
            .iter()
            .find(|t| language_utils::codes_equal(&t.language_code, code))
    }
}

impl<'a> IntoIterator for &'a TrackCollection {
    type Item = &'a CaptionTrack;
    type IntoIter = std::slice::Iter<'a, CaptionTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Ordered language codes, most preferred first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguagePreference(Vec<String>);

impl LanguagePreference {
    /// Build a preference list, dropping blank entries
    pub fn new<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|c| language_utils::normalize_code(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(anyhow!("Language preference list must not be empty"));
        }
        Ok(Self(codes))
    }

    /// Use the caller's list when it has any usable entry, otherwise `default`
    pub fn or_default(codes: Option<Vec<String>>, default: &LanguagePreference) -> Self {
        codes
            .and_then(|codes| Self::new(codes).ok())
            .unwrap_or_else(|| default.clone())
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// One timed line of a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Display duration, in seconds
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}
