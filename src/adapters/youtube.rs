//! YouTube Data API v3 catalog adapter.
//!
//! Two calls per query: `search.list` for the newest long-form videos of a
//! channel (the `long` duration filter keeps Shorts out), then `videos.list`
//! for their ISO 8601 durations.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::CatalogSource;
use crate::domain::Item;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API client
pub struct YouTubeCatalog {
    /// API key
    api_key: String,
    /// API root (overridable for tests)
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoDetails>,
}

#[derive(Debug, Deserialize)]
struct VideoDetails {
    id: String,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

impl YouTubeCatalog {
    /// Create a new YouTube client
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build API URL
    fn api_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn search(
        &self,
        channel_id: &str,
        keywords: &[String],
        max_results: u32,
    ) -> Result<SearchResponse> {
        let query = keywords.join(" ");
        let max_results = max_results.to_string();

        let response = self
            .client
            .get(self.api_url("search"))
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("q", query.as_str()),
                ("type", "video"),
                ("order", "date"),
                ("maxResults", max_results.as_str()),
                ("videoDuration", "long"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send YouTube search request")?
            .error_for_status()
            .context("YouTube search request failed")?;

        response
            .json()
            .await
            .context("Failed to parse YouTube search response")
    }

    /// Durations in minutes keyed by video ID
    async fn durations(&self, video_ids: &[String]) -> Result<HashMap<String, u32>> {
        let ids = video_ids.join(",");

        let response = self
            .client
            .get(self.api_url("videos"))
            .query(&[
                ("part", "contentDetails"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send YouTube videos request")?
            .error_for_status()
            .context("YouTube videos request failed")?;

        let details: VideosResponse = response
            .json()
            .await
            .context("Failed to parse YouTube videos response")?;

        let durations: HashMap<String, u32> = details
            .items
            .into_iter()
            .map(|video| {
                let minutes = parse_iso8601_minutes(&video.content_details.duration);
                (video.id, minutes)
            })
            .collect();

        info!(count = durations.len(), "Fetched video details");
        Ok(durations)
    }
}

#[async_trait]
impl CatalogSource for YouTubeCatalog {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn fetch(
        &self,
        channel_id: &str,
        keywords: &[String],
        max_results: u32,
    ) -> Result<Vec<Item>> {
        info!(channel_id, ?keywords, "Fetching videos from channel");

        let search = self.search(channel_id, keywords, max_results).await?;
        let video_ids: Vec<String> = search
            .items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect();

        if video_ids.is_empty() {
            warn!(channel_id, "No videos found for the given query");
            return Ok(Vec::new());
        }

        // Missing details leave the videos in with a zero duration
        let durations = match self.durations(&video_ids).await {
            Ok(durations) => durations,
            Err(e) => {
                warn!(channel_id, error = ?e, "Failed to fetch video details");
                HashMap::new()
            }
        };

        let videos = build_items(search, &durations);

        info!(channel_id, count = videos.len(), "Fetched videos from channel");
        Ok(videos)
    }
}

/// Join search hits with their durations; unknown durations become 0
fn build_items(search: SearchResponse, durations: &HashMap<String, u32>) -> Vec<Item> {
    search
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let thumbnail = item
                .snippet
                .thumbnails
                .get("high")
                .map(|t| t.url.clone())
                .unwrap_or_default();
            let duration = durations.get(&id).copied().unwrap_or(0);
            Some(
                Item::new(id.clone(), item.snippet.title, watch_url(&id), duration)
                    .with_thumbnail(thumbnail),
            )
        })
        .collect()
}

/// Public watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Parse an ISO 8601 duration such as `PT1H2M30S` into whole minutes.
///
/// Seconds are floored. Anything that is not a `PT...` time duration yields 0.
pub fn parse_iso8601_minutes(duration: &str) -> u32 {
    debug!(duration, "Parsing duration");

    let Some(mut rest) = duration.strip_prefix("PT") else {
        warn!(duration, "Unexpected duration format");
        return 0;
    };

    let mut minutes: u32 = 0;
    for (unit, factor) in [('H', 60), ('M', 1)] {
        if let Some((value, tail)) = rest.split_once(unit) {
            if !value.is_empty() {
                match value.parse::<u32>() {
                    Ok(v) => minutes = minutes.saturating_add(v.saturating_mul(factor)),
                    Err(e) => {
                        warn!(duration, error = %e, "Failed to parse duration");
                        return 0;
                    }
                }
            }
            rest = tail;
        }
    }

    if let Some(seconds) = rest.strip_suffix('S') {
        match seconds.parse::<f64>() {
            Ok(s) => minutes = minutes.saturating_add((s / 60.0) as u32),
            Err(e) => {
                warn!(duration, error = %e, "Failed to parse duration");
                return 0;
            }
        }
    }

    minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_duration() {
        assert_eq!(parse_iso8601_minutes("PT1H2M30S"), 62);
        assert_eq!(parse_iso8601_minutes("PT45M"), 45);
        assert_eq!(parse_iso8601_minutes("PT2H"), 120);
        assert_eq!(parse_iso8601_minutes("PT59S"), 0);
        assert_eq!(parse_iso8601_minutes("PT1H125S"), 62);
    }

    #[test]
    fn test_parse_rejects_unexpected_formats() {
        assert_eq!(parse_iso8601_minutes("P1D"), 0);
        assert_eq!(parse_iso8601_minutes(""), 0);
        assert_eq!(parse_iso8601_minutes("PTxxM"), 0);
    }

    #[test]
    fn test_api_url() {
        let client = YouTubeCatalog::new("KEY").with_base_url("http://localhost:9000/");
        assert_eq!(client.api_url("search"), "http://localhost:9000/search");
    }

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123"},
                    "snippet": {
                        "title": "30 Minute HIIT",
                        "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg"}}
                    }
                },
                {
                    "id": {"kind": "youtube#channel"},
                    "snippet": {"title": "A channel"}
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].id.video_id.as_deref(), Some("abc123"));
        assert!(response.items[1].id.video_id.is_none());
    }

    #[test]
    fn test_build_items_without_durations() {
        let json = r#"{
            "items": [
                {"id": {"videoId": "a1"}, "snippet": {"title": "Leg Day"}},
                {"id": {"videoId": "b2"}, "snippet": {"title": "Yoga Flow"}},
                {"id": {"kind": "youtube#playlist"}, "snippet": {"title": "Playlist"}}
            ]
        }"#;
        let search: SearchResponse = serde_json::from_str(json).unwrap();

        let mut durations = HashMap::new();
        durations.insert("b2".to_string(), 35);

        let items = build_items(search, &durations);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].duration_minutes, 0);
        assert_eq!(items[0].url, "https://www.youtube.com/watch?v=a1");
        assert_eq!(items[1].duration_minutes, 35);
        assert!(items[1].thumbnail_ref.is_empty());
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc"), "https://www.youtube.com/watch?v=abc");
    }
}
