pub mod aggregator;
pub mod providers;

pub use aggregator::{PlatformFilter, SearchAggregator};

use crate::schema::{CanonicalSearchResult, Platform};
use crate::transport::ProviderError;
use serde_json::Value;

/// Result of running one adapter for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    /// At least one normalized result
    Hits(Vec<CanonicalSearchResult>),
    /// Well-formed response with nothing usable in it
    NoMatch,
    /// The call itself failed; diagnostic only
    Failed(ProviderError),
}

impl AdapterOutcome {
    /// Results this outcome contributes to an aggregate (empty unless `Hits`)
    pub fn into_results(self) -> Vec<CanonicalSearchResult> {
        match self {
            AdapterOutcome::Hits(items) => items,
            AdapterOutcome::NoMatch | AdapterOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Search provider abstraction - one implementation per upstream platform
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn platform(&self) -> Platform;

    /// Issue the single outbound request for `query`. No retries.
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Value, ProviderError>;

    /// Translate a raw response body into canonical results.
    ///
    /// Non-matching item kinds are dropped before the `max_results` cap.
    fn normalize(&self, raw: &Value, query: &str, max_results: usize)
        -> Result<Vec<CanonicalSearchResult>, ProviderError>;

    /// Fetch and normalize, folding every failure into an [`AdapterOutcome`]
    async fn search(&self, query: &str, max_results: usize) -> AdapterOutcome {
        let raw = match self.fetch(query, max_results).await {
            Ok(raw) => raw,
            Err(e) => return AdapterOutcome::Failed(e),
        };

        match self.normalize(&raw, query, max_results) {
            Ok(items) if items.is_empty() => AdapterOutcome::NoMatch,
            Ok(items) => AdapterOutcome::Hits(items),
            Err(ProviderError::NoMatch) => AdapterOutcome::NoMatch,
            Err(e) => AdapterOutcome::Failed(e),
        }
    }
}

/// Locate the raw item list at `path`; a missing list means no items.
pub(crate) fn item_list<'a>(raw: &'a Value, path: &[&str]) -> Result<&'a [Value], ProviderError> {
    if !raw.is_object() {
        return Err(ProviderError::Malformed("expected a JSON object".to_string()));
    }

    let mut node = raw;
    for key in path {
        match node.get(key) {
            Some(next) => node = next,
            None => return Ok(&[]),
        }
    }

    match node {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Null => Ok(&[]),
        _ => Err(ProviderError::Malformed(format!(
            "expected an array at `{}`",
            path.join(".")
        ))),
    }
}

/// Deserialize each element of a raw item list on its own, skipping the ones
/// that do not fit `T` instead of rejecting the whole page.
pub(crate) fn parse_items<T: serde::de::DeserializeOwned>(
    items: &[Value],
    platform: Platform,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::trace!(platform = %platform, error = %e, "skipping unparseable item");
                None
            }
        })
        .collect()
}

/// Scalar that some providers send as a number and others as a string
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum StringOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl StringOrNumber {
    pub(crate) fn into_string(self) -> String {
        match self {
            StringOrNumber::Number(n) => n.to_string(),
            StringOrNumber::Text(s) => s,
        }
    }
}

/// Field that may arrive as a single value or as a list
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub(crate) fn first(&self) -> Option<&str> {
        match self {
            OneOrMany::One(s) => Some(s.as_str()),
            OneOrMany::Many(v) => v.first().map(String::as_str),
        }
    }
}
