/*!
 * # captionsrv - Caption track API
 *
 * A Rust library and server exposing the caption tracks of online videos.
 *
 * ## Features
 *
 * - List every caption track of a video, with its origin (uploaded or
 *   auto-generated) and the languages it can be translated into
 * - Fetch a transcript using an ordered list of preferred languages, with
 *   region-agnostic fallback (`pt` finds `pt-BR`)
 * - Typed failures that separate "not found" from upstream errors
 * - Pluggable caption sources:
 *   - YouTube (InnerTube player API)
 *   - In-memory mock
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `tracks`: caption track model, language matcher and catalog resolver
 * - `transcript_service`: request façade used by the server and the CLI
 * - `providers`: caption source trait and implementations:
 *   - `providers::youtube`: YouTube client
 *   - `providers::mock`: in-memory source
 * - `server`: axum HTTP binding
 * - `app_config`: Configuration management
 * - `language_utils`: language tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod tracks;
pub mod transcript_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, FailureClass, ResolveError, SourceError};
pub use providers::CaptionSource;
pub use tracks::{CaptionTrack, LanguagePreference, TrackCollection, TranscriptSegment};
pub use transcript_service::{ResolutionOutcome, TranscriptService};
