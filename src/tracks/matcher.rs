/*!
 * Language negotiation between a preference list and a video's tracks.
 */

use log::debug;

use super::model::{CaptionTrack, LanguagePreference, TrackCollection};
use crate::language_utils;

/// Result of matching a preference list against a track collection
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    /// The selected track
    Matched(&'a CaptionTrack),
    /// The collection has no tracks at all
    NoTracksAvailable,
    /// Nothing matched; `available` is the sorted list of codes present
    NoMatchingLanguage {
        requested: Vec<String>,
        available: Vec<String>,
    },
}

impl MatchOutcome<'_> {
    pub fn track(&self) -> Option<&CaptionTrack> {
        match self {
            Self::Matched(track) => Some(*track),
            _ => None,
        }
    }
}

/// Selects one track for an ordered preference list.
///
/// Preferred codes are tried one at a time, in order. For each code an exact
/// (case-insensitive) match is tried first, then a primary subtag match
/// (`pt` <-> `pt-BR`); the first code with any match wins. Among tracks
/// matching the same code the earliest in the collection wins. Translation
/// targets are never considered.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageMatcher;

impl LanguageMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn select<'a>(
        &self,
        collection: &'a TrackCollection,
        preference: &LanguagePreference,
    ) -> MatchOutcome<'a> {
        if collection.is_empty() {
            return MatchOutcome::NoTracksAvailable;
        }

        for requested in preference.iter() {
            if let Some(track) = Self::find(collection, requested, language_utils::codes_equal) {
                debug!(
                    "Video {}: exact language match {} for {}",
                    collection.video_id, track.language_code, requested
                );
                return MatchOutcome::Matched(track);
            }

            if let Some(track) =
                Self::find(collection, requested, language_utils::primary_subtags_match)
            {
                debug!(
                    "Video {}: primary subtag match {} for {}",
                    collection.video_id, track.language_code, requested
                );
                return MatchOutcome::Matched(track);
            }
        }

        MatchOutcome::NoMatchingLanguage {
            requested: preference.to_vec(),
            available: collection.available_codes(),
        }
    }

    /// First track in collection order whose code satisfies `matches`
    fn find<'a>(
        collection: &'a TrackCollection,
        requested: &str,
        matches: fn(&str, &str) -> bool,
    ) -> Option<&'a CaptionTrack> {
        collection
            .iter()
            .find(|track| matches(requested, &track.language_code))
    }
}
