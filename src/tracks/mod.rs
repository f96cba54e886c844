/*!
 * Caption track model and the logic that works on it.
 *
 * - `model`: caption tracks, collections, preference lists, transcript segments
 * - `matcher`: picks one track for an ordered preference list
 * - `catalog`: turns caption source data into a validated collection
 */

pub mod catalog;
pub mod matcher;
pub mod model;

pub use catalog::{CatalogResolution, CatalogResolver, RawTrack};
pub use matcher::{LanguageMatcher, MatchOutcome};
pub use model::{CaptionTrack, LanguagePreference, TrackCollection, TranscriptSegment};
