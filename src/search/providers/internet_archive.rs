use crate::config::settings::InternetArchiveConfig;
use crate::schema::{
    self, CanonicalSearchResult, DurationUnit, Platform, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
use crate::search::{item_list, parse_items, OneOrMany, SearchProvider};
use crate::transport::{ProviderError, Transport};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Internet Archive advanced-search adapter over the `audio` collection
///
/// Asks for twice the requested rows so documents without an identifier
/// can be dropped without coming up short.
pub struct InternetArchiveProvider {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct Doc {
    identifier: Option<String>,
    title: Option<OneOrMany>,
    creator: Option<OneOrMany>,
    date: Option<OneOrMany>,
    description: Option<OneOrMany>,
}

impl InternetArchiveProvider {
    pub fn new(config: &InternetArchiveConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
        }
    }

    fn to_result(doc: Doc) -> Option<CanonicalSearchResult> {
        let id = doc.identifier.filter(|id| !id.trim().is_empty())?;

        let title = schema::first_non_blank(
            &[doc.title.as_ref().and_then(OneOrMany::first)],
            UNKNOWN_TITLE,
        );
        let artist = schema::first_non_blank(
            &[doc.creator.as_ref().and_then(OneOrMany::first)],
            UNKNOWN_ARTIST,
        );
        let description = schema::describe(
            doc.description.as_ref().and_then(OneOrMany::first),
            &title,
            &artist,
        );

        Some(CanonicalSearchResult {
            thumbnail: format!("https://archive.org/services/img/{}", id),
            // Search documents do not carry a runtime.
            duration: schema::format_duration(None, DurationUnit::Seconds),
            url: format!("https://archive.org/details/{}", id),
            embed_url: format!("https://archive.org/embed/{}", id),
            published_at: doc
                .date
                .as_ref()
                .and_then(OneOrMany::first)
                .unwrap_or_default()
                .to_string(),
            view_count: 0,
            id,
            title,
            artist,
            description,
            platform: Platform::InternetArchive,
        })
    }
}

#[async_trait::async_trait]
impl SearchProvider for InternetArchiveProvider {
    fn platform(&self) -> Platform {
        Platform::InternetArchive
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Value, ProviderError> {
        tracing::debug!(query = %query, max_results, "performing internet archive search");

        let params = vec![
            ("q".to_string(), format!("collection:audio AND ({})", query)),
            (
                "fl[]".to_string(),
                "identifier,title,creator,date,format,description".to_string(),
            ),
            ("rows".to_string(), max_results.saturating_mul(2).to_string()),
            ("page".to_string(), "1".to_string()),
            ("output".to_string(), "json".to_string()),
        ];

        self.transport.get_json(&self.endpoint, &params).await
    }

    fn normalize(
        &self,
        raw: &Value,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<CanonicalSearchResult>, ProviderError> {
        let docs = item_list(raw, &["response", "docs"])?;

        let results: Vec<CanonicalSearchResult> =
            parse_items::<Doc>(docs, Platform::InternetArchive)
                .into_iter()
                .filter_map(Self::to_result)
                .take(max_results)
                .collect();

        tracing::debug!(
            raw_count = docs.len(),
            result_count = results.len(),
            "internet archive search normalized"
        );
        Ok(results)
    }
}
