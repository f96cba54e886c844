use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::SourceError;
use crate::language_utils;
use crate::providers::CaptionSource;
use crate::tracks::{RawTrack, TranscriptSegment};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap()
});

/// YouTube client that reads caption tracks from the InnerTube player API
#[derive(Debug)]
pub struct YouTube {
    /// HTTP client for API requests
    client: Client,
}

/// A caption track plus the URL its transcript is served from
#[derive(Debug, Clone, PartialEq)]
pub struct YouTubeTrack {
    pub raw: RawTrack,
    pub base_url: String,
}

/// `fmt=json3` timed text document
#[derive(Debug, Deserialize)]
struct TimedTextDocument {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

impl YouTube {
    /// Create a new YouTube client
    pub fn new(accept_language: &str, timeout_secs: u64) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Ok(value) = header::HeaderValue::from_str(accept_language) {
            headers.insert(header::ACCEPT_LANGUAGE, value);
        }

        Self {
            client: Client::builder()
                .default_headers(headers)
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the caption tracks of a video together with their base URLs
    pub async fn fetch_tracks(&self, video_id: &str) -> Result<Vec<YouTubeTrack>, SourceError> {
        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player_response(video_id, &api_key).await?;
        parse_player_response(&player)
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, SourceError> {
        let url = Url::parse_with_params(WATCH_URL, &[("v", video_id)])
            .map_err(|e| SourceError::Source(format!("Invalid watch URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Source(format!("Failed to fetch watch page: {}", e)))?;
        check_status(response.status())?;

        response
            .text()
            .await
            .map_err(|e| SourceError::Source(format!("Failed to read watch page: {}", e)))
    }

    async fn fetch_player_response(&self, video_id: &str, api_key: &str) -> Result<Value, SourceError> {
        let url = Url::parse_with_params(INNERTUBE_PLAYER_URL, &[("key", api_key)])
            .map_err(|e| SourceError::Source(format!("Invalid player URL: {}", e)))?;

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Source(format!("Failed to fetch player data: {}", e)))?;
        check_status(response.status())?;

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::Source(format!("Failed to parse player data: {}", e)))
    }

    async fn fetch_timed_text(&self, base_url: &str) -> Result<Vec<TranscriptSegment>, String> {
        let url = timed_text_url(base_url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Failed to send transcript request: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("YouTube timed text error ({}): {}", status, error_text);
            return Err(format!("Timed text request returned {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read transcript: {}", e))?;
        parse_timed_text(&body)
    }
}

#[async_trait]
impl CaptionSource for YouTube {
    async fn fetch_track_collection(&self, video_id: &str) -> Result<Vec<RawTrack>, SourceError> {
        let tracks = self.fetch_tracks(video_id).await?;
        debug!("YouTube reported {} caption track(s) for {}", tracks.len(), video_id);
        Ok(tracks.into_iter().map(|t| t.raw).collect())
    }

    async fn fetch_transcript_body(
        &self,
        video_id: &str,
        language_code: &str,
    ) -> Result<Vec<TranscriptSegment>, SourceError> {
        // Base URLs expire quickly, so they are looked up again for every body
        let tracks = self
            .fetch_tracks(video_id)
            .await
            .map_err(|e| SourceError::TranscriptFetchFailed(e.to_string()))?;

        let track = find_track(&tracks, language_code).ok_or_else(|| {
            SourceError::TranscriptFetchFailed(format!(
                "Track {} is no longer listed",
                language_code
            ))
        })?;

        self.fetch_timed_text(&track.base_url)
            .await
            .map_err(SourceError::TranscriptFetchFailed)
    }

    fn name(&self) -> &str {
        "youtube"
    }
}

fn check_status(status: StatusCode) -> Result<(), SourceError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::Source("Too many requests".to_string()));
    }
    if !status.is_success() {
        return Err(SourceError::Source(format!("HTTP {}", status)));
    }
    Ok(())
}

/// Track serving `language_code`, preferring uploaded captions over `asr` ones
pub fn find_track<'a>(tracks: &'a [YouTubeTrack], language_code: &str) -> Option<&'a YouTubeTrack> {
    tracks
        .iter()
        .filter(|t| language_utils::codes_equal(&t.raw.language_code, language_code))
        .min_by_key(|t| t.raw.is_generated)
}

/// Pull the InnerTube API key out of a watch page
pub fn extract_api_key(html: &str) -> Result<String, SourceError> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(SourceError::Source("Request blocked by a captcha".to_string()));
    }
    if html.contains("action=\"https://consent.youtube.com/s\"") {
        return Err(SourceError::Source("Cookie consent required".to_string()));
    }

    INNERTUBE_API_KEY_REGEX
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|key| key.as_str().to_string())
        .ok_or_else(|| SourceError::Source("Watch page has no InnerTube API key".to_string()))
}

/// Turn an InnerTube player response into caption tracks
pub fn parse_player_response(player: &Value) -> Result<Vec<YouTubeTrack>, SourceError> {
    check_playability(player)?;

    let renderer = player
        .pointer("/captions/playerCaptionsTracklistRenderer")
        .ok_or(SourceError::TracksDisabled)?;

    let translation_languages: Vec<String> = renderer
        .get("translationLanguages")
        .and_then(Value::as_array)
        .map(|languages| {
            languages
                .iter()
                .filter_map(|l| l.get("languageCode")?.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let caption_tracks = renderer
        .get("captionTracks")
        .and_then(Value::as_array)
        .filter(|tracks| !tracks.is_empty())
        .ok_or(SourceError::TracksDisabled)?;

    let tracks = caption_tracks
        .iter()
        .filter_map(|caption| {
            let language_code = caption
                .get("languageCode")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let Some(base_url) = caption.get("baseUrl").and_then(Value::as_str) else {
                debug!("Skipping caption track {:?} without a base URL", language_code);
                return None;
            };
            let base_url = base_url.to_string();

            let language_name = caption
                .pointer("/name/runs/0/text")
                .or_else(|| caption.pointer("/name/simpleText"))
                .and_then(Value::as_str)
                .map(str::to_string);

            let is_generated = caption.get("kind").and_then(Value::as_str) == Some("asr");
            let is_translatable = caption
                .get("isTranslatable")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let raw = RawTrack {
                language_code,
                language_name,
                is_generated,
                is_translatable,
                translation_languages: if is_translatable {
                    translation_languages.clone()
                } else {
                    Vec::new()
                },
            };
            Some(YouTubeTrack { raw, base_url })
        })
        .collect();

    Ok(tracks)
}

fn check_playability(player: &Value) -> Result<(), SourceError> {
    let Some(playability) = player.get("playabilityStatus") else {
        return Ok(());
    };

    let status = playability.get("status").and_then(Value::as_str).unwrap_or("");
    if status == "OK" {
        return Ok(());
    }

    let reason = playability.get("reason").and_then(Value::as_str).unwrap_or("");
    if status == "ERROR" && reason.to_lowercase().contains("unavailable") {
        return Err(SourceError::VideoUnavailable);
    }

    Err(SourceError::Source(format!(
        "Video is not playable ({}): {}",
        status, reason
    )))
}

/// Rewrite a caption base URL to request the json3 timed text format
fn timed_text_url(base_url: &str) -> Result<Url, String> {
    if base_url.contains("&exp=xpe") {
        return Err("Transcript requires a proof-of-origin token".to_string());
    }

    let mut url = Url::parse(base_url).map_err(|e| format!("Invalid transcript URL: {}", e))?;
    let params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "fmt")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(params)
        .append_pair("fmt", "json3");
    Ok(url)
}

/// Parse a json3 timed text document into transcript segments
pub fn parse_timed_text(body: &str) -> Result<Vec<TranscriptSegment>, String> {
    let document: TimedTextDocument =
        serde_json::from_str(body).map_err(|e| format!("Failed to parse transcript: {}", e))?;

    let segments = document
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}
