use crate::config::settings::YouTubeConfig;
use crate::schema::{self, CanonicalSearchResult, Platform, UNKNOWN_ARTIST, UNKNOWN_TITLE};
use crate::search::{item_list, parse_items, SearchProvider};
use crate::transport::{ProviderError, Transport};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// The Data API rejects `maxResults` above this
const API_PAGE_LIMIT: usize = 50;

/// YouTube Data API v3 search adapter
///
/// Requires an API key in `[search.youtube]`. Only the music category is
/// queried, and only `youtube#video` items are kept.
pub struct YouTubeProvider {
    transport: Arc<dyn Transport>,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: ItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    kind: Option<String>,
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    title: Option<String>,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    description: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

fn thumb_url(t: &Option<Thumbnail>) -> Option<&str> {
    t.as_ref().and_then(|t| t.url.as_deref())
}

impl YouTubeProvider {
    pub fn new(config: &YouTubeConfig, transport: Arc<dyn Transport>) -> Self {
        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            tracing::warn!("youtube api key not set, youtube searches will be skipped");
        }

        Self {
            transport,
            endpoint: config.endpoint.clone(),
            api_key,
        }
    }

    fn to_result(item: Item) -> Option<CanonicalSearchResult> {
        if item.id.kind.as_deref() != Some("youtube#video") {
            return None;
        }
        let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
        let snippet = item.snippet.unwrap_or_default();
        let thumbnails = snippet.thumbnails.unwrap_or_default();

        let title = schema::first_non_blank(&[snippet.title.as_deref()], UNKNOWN_TITLE);
        let artist = schema::first_non_blank(&[snippet.channel_title.as_deref()], UNKNOWN_ARTIST);
        let description = schema::describe(snippet.description.as_deref(), &title, &artist);

        Some(CanonicalSearchResult {
            thumbnail: schema::pick_thumbnail(
                thumb_url(&thumbnails.high),
                thumb_url(&thumbnails.medium),
                thumb_url(&thumbnails.default),
            ),
            // Search snippets carry neither length nor play count.
            duration: schema::format_duration(None, schema::DurationUnit::Seconds),
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            embed_url: format!("https://www.youtube.com/embed/{}", video_id),
            published_at: snippet.published_at.unwrap_or_default(),
            view_count: 0,
            id: video_id,
            title,
            artist,
            description,
            platform: Platform::YouTube,
        })
    }
}

#[async_trait::async_trait]
impl SearchProvider for YouTubeProvider {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Value, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingCredentials("search.youtube.api_key"));
        };

        tracing::debug!(query = %query, max_results, "performing youtube search");

        let params = vec![
            ("part".to_string(), "snippet".to_string()),
            ("type".to_string(), "video".to_string()),
            ("videoCategoryId".to_string(), "10".to_string()),
            ("maxResults".to_string(), max_results.min(API_PAGE_LIMIT).to_string()),
            ("q".to_string(), query.to_string()),
            ("key".to_string(), api_key.to_string()),
        ];

        self.transport.get_json(&self.endpoint, &params).await
    }

    fn normalize(
        &self,
        raw: &Value,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<CanonicalSearchResult>, ProviderError> {
        let items = item_list(raw, &["items"])?;

        let results: Vec<CanonicalSearchResult> = parse_items::<Item>(items, Platform::YouTube)
            .into_iter()
            .filter_map(Self::to_result)
            .take(max_results)
            .collect();

        tracing::debug!(result_count = results.len(), "youtube search normalized");
        Ok(results)
    }
}
