/*!
 * Tests for the request façade
 */

use captionsrv::errors::{FailureClass, ResolveError};
use captionsrv::providers::mock::{MockBehavior, MockCaptionSource};
use captionsrv::tracks::RawTrack;
use captionsrv::ResolutionOutcome;
use crate::common::{self, SAMPLE_VIDEO, prefs, sample_source, service_for};

#[tokio::test]
async fn test_resolveTranscript_withExactMatch_shouldReturnTrackAndBody() {
    let source = sample_source(MockBehavior::Working);
    let service = service_for(&source);

    let outcome = service
        .resolve_transcript(SAMPLE_VIDEO, &prefs(&["en"]))
        .await
        .unwrap();

    match outcome {
        ResolutionOutcome::Matched { track, transcript } => {
            assert_eq!(track.language_code, "en");
            assert_eq!(transcript, common::sample_segments("en"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_resolveTranscript_withNoMatch_shouldNotFetchBody() {
    let source = sample_source(MockBehavior::Working);
    let service = service_for(&source);

    let outcome = service
        .resolve_transcript(SAMPLE_VIDEO, &prefs(&["de", "ja"]))
        .await
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

#[tokio::test]
async fn test_resolveTranscript_withTranslationTargetOnly_shouldNotTranslate() {
    let source = sample_source(MockBehavior::Working);
    let outcome = service_for(&source)
        .resolve_transcript(SAMPLE_VIDEO, &prefs(&["fr"]))
        .await
        .unwrap();

    assert!(matches!(outcome, ResolutionOutcome::NoMatchingLanguage { .. }));
}

#[tokio::test]
async fn test_transcript_withNoMatch_shouldFoldIntoNotFoundError() {
    let source = sample_source(MockBehavior::Working);
    let error = service_for(&source)
        .transcript(SAMPLE_VIDEO, &prefs(&["de"]))
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        ResolveError::NoMatchingLanguage { video_id, .. } if video_id == SAMPLE_VIDEO
    ));
    assert_eq!(error.class(), FailureClass::NotFound);
}

#[tokio::test]
async fn test_transcript_withSourceFailures_shouldAnnotateVideoAndLanguages() {
    let cases = [
        (MockBehavior::TracksDisabled, FailureClass::NotFound),
        (MockBehavior::VideoUnavailable, FailureClass::NotFound),
        (MockBehavior::Failing, FailureClass::Internal),
        (MockBehavior::TranscriptFailing, FailureClass::Internal),
    ];

    for (behavior, class) in cases {
        let source = sample_source(behavior);
        let error = service_for(&source)
            .transcript(SAMPLE_VIDEO, &prefs(&["pt", "en"]))
            .await
            .unwrap_err();

        assert_eq!(error.class(), class, "{:?}", behavior);
        assert_eq!(error.video_id(), SAMPLE_VIDEO);
        assert_eq!(error.requested(), ["pt".to_string(), "en".to_string()]);
        match &error {
            ResolveError::TracksDisabled { requested, .. }
            | ResolveError::VideoUnavailable { requested, .. }
            | ResolveError::Source { requested, .. } => {
                assert_eq!(requested, &vec!["pt".to_string(), "en".to_string()]);
            }
            ResolveError::TranscriptFetchFailed {
                requested,
                language_code,
                ..
            } => {
                assert_eq!(language_code, "pt-BR");
                assert_eq!(requested, &vec!["pt".to_string(), "en".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_transcript_withUnknownVideo_shouldReportUnavailable() {
    let source = sample_source(MockBehavior::Working);
    let error = service_for(&source)
        .transcript("nope", &prefs(&["en"]))
        .await
        .unwrap_err();

    assert!(matches!(error, ResolveError::VideoUnavailable { .. }));
}

#[tokio::test]
async fn test_listTracks_shouldReturnAllTracksWithoutFetchingBodies() {
    let source = sample_source(MockBehavior::Working);
    let collection = service_for(&source).list_tracks(SAMPLE_VIDEO).await.unwrap();

    assert_eq!(collection.video_id, SAMPLE_VIDEO);
    assert_eq!(collection.available_codes(), vec!["en", "pt-BR"]);

    let pt = collection.find("pt-br").unwrap();
    assert!(pt.is_generated);
    assert!(pt.is_translatable);
    assert_eq!(pt.translation_targets.iter().collect::<Vec<_>>(), vec!["es", "fr"]);

    assert_eq!(source.track_requests(), 1);
    assert_eq!(source.transcript_requests(), 0);
}

#[tokio::test]
async fn test_listTracks_withUnavailableVideo_shouldBeNotFoundClass() {
    let source = sample_source(MockBehavior::VideoUnavailable);
    let error = service_for(&source).list_tracks(SAMPLE_VIDEO).await.unwrap_err();

    assert_eq!(
        error,
        ResolveError::VideoUnavailable {
            video_id: SAMPLE_VIDEO.to_string(),
            requested: vec![],
        }
    );
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_listTracks_withSourceFailure_shouldBeInternalClass() {
    let error = service_for(&MockCaptionSource::failing())
        .list_tracks(SAMPLE_VIDEO)
        .await
        .unwrap_err();
    assert_eq!(error.class(), FailureClass::Internal);
}

#[tokio::test]
async fn test_listTracks_withNoUsableTracks_shouldReportNoTracks() {
    let source = MockCaptionSource::new().with_video("vid", vec![RawTrack::new(" ")]);
    let error = service_for(&source).list_tracks("vid").await.unwrap_err();
    assert!(matches!(error, ResolveError::NoTracksAvailable { .. }));
}

#[tokio::test]
async fn test_repeatedRequests_shouldAlwaysHitTheSource() {
    let source = sample_source(MockBehavior::Working);
    let service = service_for(&source);

    for _ in 0..3 {
        service.list_tracks(SAMPLE_VIDEO).await.unwrap();
        service.transcript(SAMPLE_VIDEO, &prefs(&["en"])).await.unwrap();
    }

    assert_eq!(source.track_requests(), 6);
    assert_eq!(source.transcript_requests(), 3);
}
