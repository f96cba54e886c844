/*!
 * Integration tests for transcript resolution against a mock caption source
 */

use futures::future::join_all;
use std::sync::Arc;

use captionsrv::providers::CaptionSource;
use captionsrv::providers::mock::{MockBehavior, MockCaptionSource};
use captionsrv::tracks::RawTrack;
use captionsrv::{ResolutionOutcome, TranscriptService};
use crate::common::{self, prefs, sample_source, service_for};

/// The reference scenario: `pt` is absent, so `pt-BR` is chosen by subtag fallback
#[tokio::test]
async fn test_endToEnd_withPtEnPreference_shouldResolvePtBrAndFetchItsBody() {
    common::init_test_logger();
    let source = MockCaptionSource::new()
        .with_video(
            "abc123",
            vec![
                RawTrack::new("en"),
                RawTrack::new("pt-BR").generated().translatable(["es", "fr"]),
            ],
        )
        .with_transcript("abc123", "en", common::sample_segments("en"))
        .with_transcript("abc123", "pt-BR", common::sample_segments("pt-BR"));
    let service = service_for(&source);

    let outcome = service
        .resolve_transcript("abc123", &prefs(&["pt", "en"]))
        .await
        .unwrap();

    let ResolutionOutcome::Matched { track, transcript } = outcome else {
        panic!("expected a match, got {:?}", outcome);
    };
    assert_eq!(track.language_code, "pt-BR");
    assert!(track.is_generated);
    assert!(track.is_translatable);
    assert_eq!(transcript, common::sample_segments("pt-BR"));
    assert_eq!(source.transcript_requests(), 1);

    let response = service.transcript("abc123", &prefs(&["pt", "en"])).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["video_id"], "abc123");
    assert_eq!(json["language_code"], "pt-BR");
    assert_eq!(json["transcript"][0]["text"], "pt-BR line one");
    assert_eq!(json["transcript"][1]["start"], 1.5);
    assert_eq!(json["transcript"][1]["duration"], 2.0);
}

/// The demo catalog shipped for `--source mock` behaves like the reference scenario
#[tokio::test]
async fn test_demoSource_shouldResolveReferenceScenario() {
    let service = TranscriptService::new(Arc::new(MockCaptionSource::demo()));

    let response = service.transcript("abc123", &prefs(&["pt", "en"])).await.unwrap();
    assert_eq!(response.language_code, "pt-BR");

    let listing = service.list_tracks("abc123").await.unwrap();
    assert_eq!(listing.len(), 2);
}

/// The service can be driven from a blocking context
#[test]
fn test_blockOn_withNoMatch_shouldListAvailableCodes() {
    let source = sample_source(MockBehavior::Working);
    let service = service_for(&source);

    let outcome = tokio_test::block_on(async {
        service
            .resolve_transcript(common::SAMPLE_VIDEO, &prefs(&["de", "ja"]))
            .await
    })
    .unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::NoMatchingLanguage {
            requested: vec!["de".to_string(), "ja".to_string()],
            available: vec!["en".to_string(), "pt-BR".to_string()],
        }
    );
    assert_eq!(source.transcript_requests(), 0);
}

/// Concurrent requests share one service without interfering
#[tokio::test]
async fn test_concurrentRequests_shouldResolveIndependently() {
    common::init_test_logger();
    let source = sample_source(MockBehavior::Slow { delay_ms: 20 });
    let service = service_for(&source);

    let preferences = [
        prefs(&["en"]),
        prefs(&["pt"]),
        prefs(&["de", "en"]),
        prefs(&["pt-BR"]),
    ];
    let requests = (0..8).map(|i| {
        let service = service.clone();
        let preference = preferences[i % preferences.len()].clone();
        tokio::spawn(async move {
            service
                .transcript(common::SAMPLE_VIDEO, &preference)
                .await
                .map(|r| r.language_code)
        })
    });

    let results: Vec<String> = join_all(requests)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("resolution failed"))
        .collect();

    assert_eq!(
        results,
        vec!["en", "pt-BR", "en", "pt-BR", "en", "pt-BR", "en", "pt-BR"]
    );
    assert_eq!(source.track_requests(), 8);
    assert_eq!(source.transcript_requests(), 8);
}

/// Listing is unaffected by language preferences and never matches
#[tokio::test]
async fn test_listing_shouldExposeTranslationReachability() {
    let source: Arc<dyn CaptionSource> = Arc::new(sample_source(MockBehavior::Working));
    let service = TranscriptService::new(source);

    let collection = service.list_tracks(common::SAMPLE_VIDEO).await.unwrap();
    let reachable: Vec<&str> = collection
        .iter()
        .filter(|track| track.can_translate_to("fr"))
        .map(|track| track.language_code.as_str())
        .collect();

    assert_eq!(reachable, vec!["pt-BR"]);
}
