use crate::config::{Config, SearchConfig};
use crate::fallback::ProviderSpec;
use crate::llm::{ChatError, ChatFallbackService, ChatMessage, ChatOptions};
use crate::lyrics::{LyricsOvhClient, LyricsResolver, LyricsSource};
use crate::schema::{CanonicalSearchResult, Platform};
use crate::search::providers::{self, YouTubeProvider};
use crate::search::{AdapterOutcome, PlatformFilter, SearchAggregator, SearchProvider};
use crate::transport::{with_timeout, ProviderError, Transport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Search boundary input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// Falls back to `search.default_max_results` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub platform: PlatformFilter,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: None,
            platform: PlatformFilter::All,
        }
    }
}

/// Lyrics/song-info boundary output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub video_id: Option<String>,
    /// Never empty: lyrics or the fixed placeholder
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("query parameter is required")]
    EmptyQuery,
}

/// Entry point for the three user-facing operations: search, chat and song info.
///
/// Built once from immutable configuration; holds no per-request state.
pub struct MusicService {
    search: SearchAggregator,
    chat: ChatFallbackService,
    lyrics: LyricsResolver,
    video: Option<Arc<dyn SearchProvider>>,
    search_timeout_ms: u64,
    default_max_results: usize,
}

impl MusicService {
    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let adapters = providers::from_config(&config.search, transport.clone());

        // The song-info video lookup needs YouTube even if it is hidden from search.
        let video: Option<Arc<dyn SearchProvider>> = adapters
            .iter()
            .find(|p| p.platform() == Platform::YouTube)
            .cloned()
            .or_else(|| {
                config.search.youtube.api_key.as_ref().map(|_| {
                    Arc::new(YouTubeProvider::new(&config.search.youtube, transport.clone()))
                        as Arc<dyn SearchProvider>
                })
            });

        let chat_providers = config
            .chat
            .providers
            .iter()
            .map(ProviderSpec::from_config)
            .collect();

        let lyrics_source: Arc<dyn LyricsSource> =
            Arc::new(LyricsOvhClient::new(&config.lyrics.endpoint, transport.clone()));

        let search = SearchAggregator::new(adapters, config.search.timeout_ms);
        tracing::debug!(platforms = ?search.platforms(), "search adapters enabled");

        Self::new(
            search,
            ChatFallbackService::new(chat_providers, transport),
            LyricsResolver::new(lyrics_source, config.lyrics.timeout_ms),
            video,
            config.search.timeout_ms,
        )
        .with_default_max_results(config.search.default_max_results)
    }

    /// Assemble a service from already-built parts
    pub fn new(
        search: SearchAggregator,
        chat: ChatFallbackService,
        lyrics: LyricsResolver,
        video: Option<Arc<dyn SearchProvider>>,
        search_timeout_ms: u64,
    ) -> Self {
        Self {
            search,
            chat,
            lyrics,
            video,
            search_timeout_ms,
            default_max_results: SearchConfig::default().default_max_results,
        }
    }

    /// Cap used when a search request does not name one
    pub fn with_default_max_results(mut self, max_results: usize) -> Self {
        self.default_max_results = max_results;
        self
    }

    pub async fn search(&self, request: &SearchRequest) -> Vec<CanonicalSearchResult> {
        self.search
            .search(
                &request.query,
                request.max_results.unwrap_or(self.default_max_results),
                request.platform,
            )
            .await
    }

    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, ChatError> {
        self.chat.complete(messages, options).await
    }

    pub async fn song_info(&self, query: &str) -> Result<SongInfo, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }

        let (video_id, resolution) = tokio::join!(self.video_id(query), self.lyrics.resolve(query));

        tracing::debug!(
            query = %query,
            has_video = video_id.is_some(),
            stage = ?resolution.stage,
            "song info resolved"
        );

        Ok(SongInfo {
            video_id,
            lyrics: resolution.lyrics,
        })
    }

    async fn video_id(&self, query: &str) -> Option<String> {
        let provider = self.video.as_ref()?;

        let outcome = with_timeout(self.search_timeout_ms, async {
            Ok::<_, ProviderError>(provider.search(query, 1).await)
        })
        .await
        .unwrap_or_else(AdapterOutcome::Failed);

        match outcome {
            AdapterOutcome::Hits(items) => items.first().and_then(|r| watch_video_id(&r.url)),
            AdapterOutcome::NoMatch => None,
            AdapterOutcome::Failed(e) => {
                tracing::warn!(error = %e, "video lookup failed");
                None
            }
        }
    }
}

/// The `v` query parameter of a watch URL
pub fn watch_video_id(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())
}
