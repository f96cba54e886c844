/*!
 * Common test utilities for the captionsrv test suite
 */

use std::sync::Arc;

use captionsrv::providers::mock::{MockBehavior, MockCaptionSource};
use captionsrv::server::AppState;
use captionsrv::tracks::RawTrack;
use captionsrv::{LanguagePreference, TranscriptSegment, TranscriptService};

/// Video used by the end-to-end scenarios
pub const SAMPLE_VIDEO: &str = "abc123";

/// Routes `log` output through the test harness; safe to call repeatedly
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a preference list from string slices
pub fn prefs(codes: &[&str]) -> LanguagePreference {
    LanguagePreference::new(codes.iter().copied()).expect("non-empty preference list")
}

/// Sample segments for a transcript body
pub fn sample_segments(prefix: &str) -> Vec<TranscriptSegment> {
    vec![
        TranscriptSegment::new(format!("{} line one", prefix), 0.0, 1.5),
        TranscriptSegment::new(format!("{} line two", prefix), 1.5, 2.0),
    ]
}

/// Source with `en` (uploaded) and `pt-BR` (generated, translatable to es/fr)
pub fn sample_source(behavior: MockBehavior) -> MockCaptionSource {
    MockCaptionSource::with_behavior(behavior)
        .with_video(
            SAMPLE_VIDEO,
            vec![
                RawTrack::new("en").named("English"),
                RawTrack::new("pt-BR")
                    .named("Portuguese (Brazil)")
                    .generated()
                    .translatable(["es", "fr"]),
            ],
        )
        .with_transcript(SAMPLE_VIDEO, "en", sample_segments("en"))
        .with_transcript(SAMPLE_VIDEO, "pt-BR", sample_segments("pt-BR"))
}

/// Wraps a mock source in a service
pub fn service_for(source: &MockCaptionSource) -> TranscriptService {
    TranscriptService::new(Arc::new(source.clone()))
}

/// Handler state with the default `["pt", "en"]` preference
pub fn app_state(source: &MockCaptionSource) -> AppState {
    AppState {
        service: service_for(source),
        default_preference: prefs(&["pt", "en"]),
    }
}
