use crate::config::settings::SoundCloudConfig;
use crate::schema::{
    self, CanonicalSearchResult, DurationUnit, Platform, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
use crate::search::{item_list, parse_items, SearchProvider, StringOrNumber};
use crate::transport::{ProviderError, Transport};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// SoundCloud api-v2 search adapter
///
/// The search endpoint mixes tracks, playlists and users in one
/// `collection`; only tracks survive normalization.
pub struct SoundCloudProvider {
    transport: Arc<dyn Transport>,
    endpoint: String,
    client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Item {
    kind: Option<String>,
    id: Option<StringOrNumber>,
    title: Option<String>,
    /// Milliseconds
    duration: Option<f64>,
    artwork_url: Option<String>,
    permalink: Option<String>,
    permalink_url: Option<String>,
    created_at: Option<String>,
    playback_count: Option<u64>,
    description: Option<String>,
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct User {
    username: Option<String>,
    permalink: Option<String>,
    avatar_url: Option<String>,
}

impl SoundCloudProvider {
    pub fn new(config: &SoundCloudConfig, transport: Arc<dyn Transport>) -> Self {
        let client_id = config
            .client_id
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if client_id.is_none() {
            tracing::warn!("soundcloud client_id not set, soundcloud searches will be skipped");
        }

        Self {
            transport,
            endpoint: config.endpoint.clone(),
            client_id,
        }
    }

    fn to_result(item: Item) -> Option<CanonicalSearchResult> {
        if item.kind.as_deref() != Some("track") {
            return None;
        }
        let id = item.id?.into_string();

        let user = item.user.as_ref();
        let username = user.and_then(|u| u.username.as_deref());
        let title = schema::first_non_blank(&[item.title.as_deref()], UNKNOWN_TITLE);
        let artist = schema::first_non_blank(&[username], UNKNOWN_ARTIST);
        let description = schema::describe(item.description.as_deref(), &title, &artist);

        let permalink_url = item.permalink_url.clone().filter(|u| !u.is_empty());
        let url = permalink_url.clone().unwrap_or_else(|| {
            format!(
                "https://soundcloud.com/{}/{}",
                user.and_then(|u| u.permalink.as_deref()).unwrap_or_default(),
                item.permalink.as_deref().unwrap_or_default()
            )
        });
        let embed_url = format!(
            "https://w.soundcloud.com/player/?url={}",
            urlencoding::encode(permalink_url.as_deref().unwrap_or_default())
        );

        Some(CanonicalSearchResult {
            id,
            thumbnail: schema::pick_thumbnail(
                item.artwork_url.as_deref(),
                user.and_then(|u| u.avatar_url.as_deref()),
                None,
            ),
            duration: schema::format_duration(item.duration, DurationUnit::Milliseconds),
            url,
            embed_url,
            published_at: item.created_at.clone().unwrap_or_default(),
            view_count: item.playback_count.unwrap_or(0),
            title,
            artist,
            description,
            platform: Platform::SoundCloud,
        })
    }
}

#[async_trait::async_trait]
impl SearchProvider for SoundCloudProvider {
    fn platform(&self) -> Platform {
        Platform::SoundCloud
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Value, ProviderError> {
        let Some(client_id) = self.client_id.as_deref() else {
            return Err(ProviderError::MissingCredentials("search.soundcloud.client_id"));
        };

        tracing::debug!(query = %query, max_results, "performing soundcloud search");

        let params = vec![
            ("q".to_string(), query.to_string()),
            ("limit".to_string(), max_results.to_string()),
            ("client_id".to_string(), client_id.to_string()),
        ];

        self.transport.get_json(&self.endpoint, &params).await
    }

    fn normalize(
        &self,
        raw: &Value,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<CanonicalSearchResult>, ProviderError> {
        let items = item_list(raw, &["collection"])?;

        let results: Vec<CanonicalSearchResult> = parse_items::<Item>(items, Platform::SoundCloud)
            .into_iter()
            .filter_map(Self::to_result)
            .take(max_results)
            .collect();

        tracing::debug!(
            raw_count = items.len(),
            result_count = results.len(),
            "soundcloud search normalized"
        );
        Ok(results)
    }
}
