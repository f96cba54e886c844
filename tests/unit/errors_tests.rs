/*!
 * Tests for error types and conversions
 */

use captionsrv::errors::{AppError, FailureClass, ResolveError, SourceError};

fn requested() -> Vec<String> {
    vec!["pt".to_string(), "en".to_string()]
}

#[test]
fn test_resolveError_notFoundVariants_shouldClassifyAsNotFound() {
    let errors = vec![
        ResolveError::TracksDisabled {
            video_id: "vid".to_string(),
            requested: requested(),
        },
        ResolveError::VideoUnavailable {
            video_id: "vid".to_string(),
            requested: requested(),
        },
        ResolveError::NoTracksAvailable {
            video_id: "vid".to_string(),
        },
        ResolveError::NoMatchingLanguage {
            video_id: "vid".to_string(),
            requested: requested(),
            available: vec!["de".to_string()],
        },
    ];

    for error in errors {
        assert_eq!(error.class(), FailureClass::NotFound, "{}", error);
        assert_eq!(error.video_id(), "vid");
    }
}

#[test]
fn test_resolveError_internalVariants_shouldClassifyAsInternal() {
    let fetch_failed = ResolveError::TranscriptFetchFailed {
        video_id: "vid".to_string(),
        requested: vec!["en".to_string()],
        language_code: "en".to_string(),
        detail: "timeout".to_string(),
    };
    let source = ResolveError::from_source(SourceError::Source("HTTP 503".to_string()), "vid", &[]);

    assert_eq!(fetch_failed.class(), FailureClass::Internal);
    assert_eq!(fetch_failed.requested(), ["en".to_string()]);
    assert!(fetch_failed.to_string().contains("timeout"));
    assert_eq!(source.class(), FailureClass::Internal);
    assert!(!source.is_not_found());
}

#[test]
fn test_resolveError_fromSource_shouldMapEveryVariant() {
    assert!(matches!(
        ResolveError::from_source(SourceError::TracksDisabled, "vid", &requested()),
        ResolveError::TracksDisabled { requested, .. } if requested == vec!["pt", "en"]
    ));
    assert!(matches!(
        ResolveError::from_source(SourceError::VideoUnavailable, "vid", &[]),
        ResolveError::VideoUnavailable { .. }
    ));
    assert!(matches!(
        ResolveError::from_source(SourceError::Source("x".to_string()), "vid", &[]),
        ResolveError::Source { detail, .. } if detail == "x"
    ));
}

#[test]
fn test_noMatchingLanguage_display_shouldNameRequestedAndAvailableLanguages() {
    let error = ResolveError::NoMatchingLanguage {
        video_id: "abc123".to_string(),
        requested: requested(),
        available: vec!["de".to_string(), "fr".to_string()],
    };
    let display = error.to_string();
    assert!(display.contains("abc123"));
    assert!(display.contains("\"pt\""));
    assert!(display.contains("\"fr\""));
}

#[test]
fn test_appError_fromResolveError_shouldWrapCorrectly() {
    let app_error: AppError = ResolveError::NoTracksAvailable {
        video_id: "vid".to_string(),
    }
    .into();
    assert!(matches!(app_error, AppError::Resolve(_)));
    assert!(app_error.to_string().contains("vid"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeIoVariant() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::Io(_)));
    assert!(app_error.to_string().contains("conf.json missing"));
}

#[test]
fn test_resolveError_requested_withListingFailure_shouldBeEmpty() {
    let no_tracks = ResolveError::NoTracksAvailable {
        video_id: "vid".to_string(),
    };
    let unavailable = ResolveError::from_source(SourceError::VideoUnavailable, "vid", &[]);

    assert!(no_tracks.requested().is_empty());
    assert!(unavailable.requested().is_empty());
}
