use crate::config::settings::MixcloudConfig;
use crate::schema::{
    self, CanonicalSearchResult, DurationUnit, Platform, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
use crate::search::{item_list, parse_items, SearchProvider};
use crate::transport::{ProviderError, Transport};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Mixcloud cloudcast search adapter (no credentials needed)
pub struct MixcloudProvider {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct Cloudcast {
    key: Option<String>,
    slug: Option<String>,
    name: Option<String>,
    url: Option<String>,
    /// Seconds
    audio_length: Option<f64>,
    created_time: Option<String>,
    play_count: Option<u64>,
    description: Option<String>,
    user: Option<User>,
    pictures: Option<Pictures>,
}

#[derive(Debug, Deserialize)]
struct User {
    name: Option<String>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Pictures {
    large: Option<String>,
    medium: Option<String>,
    thumbnail: Option<String>,
}

impl MixcloudProvider {
    pub fn new(config: &MixcloudConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
        }
    }

    fn to_result(cast: Cloudcast) -> Option<CanonicalSearchResult> {
        let key = cast.key.clone().filter(|k| !k.is_empty());
        let id = key.clone().or_else(|| cast.slug.clone().filter(|s| !s.is_empty()))?;

        let user = cast.user.as_ref();
        let title = schema::first_non_blank(&[cast.name.as_deref()], UNKNOWN_TITLE);
        let artist = schema::first_non_blank(
            &[
                user.and_then(|u| u.name.as_deref()),
                user.and_then(|u| u.username.as_deref()),
            ],
            UNKNOWN_ARTIST,
        );
        let description = schema::describe(cast.description.as_deref(), &title, &artist);

        let pictures = cast.pictures.as_ref();
        let key = key.unwrap_or_default();

        Some(CanonicalSearchResult {
            id,
            thumbnail: schema::pick_thumbnail(
                pictures.and_then(|p| p.large.as_deref()),
                pictures.and_then(|p| p.medium.as_deref()),
                pictures.and_then(|p| p.thumbnail.as_deref()),
            ),
            duration: schema::format_duration(cast.audio_length, DurationUnit::Seconds),
            url: cast
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("https://www.mixcloud.com{}", key)),
            embed_url: format!(
                "https://www.mixcloud.com/widget/iframe/?hide_cover=1&feed={}",
                urlencoding::encode(&key)
            ),
            published_at: cast.created_time.clone().unwrap_or_default(),
            view_count: cast.play_count.unwrap_or(0),
            title,
            artist,
            description,
            platform: Platform::Mixcloud,
        })
    }
}

#[async_trait::async_trait]
impl SearchProvider for MixcloudProvider {
    fn platform(&self) -> Platform {
        Platform::Mixcloud
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Value, ProviderError> {
        tracing::debug!(query = %query, max_results, "performing mixcloud search");

        let params = vec![
            ("q".to_string(), query.to_string()),
            ("type".to_string(), "cloudcast".to_string()),
            ("limit".to_string(), max_results.to_string()),
        ];

        self.transport.get_json(&self.endpoint, &params).await
    }

    fn normalize(
        &self,
        raw: &Value,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<CanonicalSearchResult>, ProviderError> {
        let items = item_list(raw, &["data"])?;

        let results: Vec<CanonicalSearchResult> =
            parse_items::<Cloudcast>(items, Platform::Mixcloud)
                .into_iter()
                .filter_map(Self::to_result)
                .take(max_results)
                .collect();

        tracing::debug!(result_count = results.len(), "mixcloud search normalized");
        Ok(results)
    }
}
