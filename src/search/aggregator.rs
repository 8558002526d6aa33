use crate::schema::{CanonicalSearchResult, Platform};
use crate::search::{AdapterOutcome, SearchProvider};
use crate::transport::{with_timeout, ProviderError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which platforms a search request may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub fn allows(&self, platform: Platform) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(p) => *p == platform,
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PlatformFilter::All);
        }
        Ok(PlatformFilter::Only(s.parse()?))
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFilter::All => f.write_str("all"),
            PlatformFilter::Only(p) => write!(f, "{}", p),
        }
    }
}

impl Serialize for PlatformFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Fans a query out to every adapter the filter allows and merges the results.
///
/// Adapters are independent (not a priority chain): each runs under its own
/// timeout and a failing one simply contributes nothing.
pub struct SearchAggregator {
    providers: Vec<Arc<dyn SearchProvider>>,
    timeout_ms: u64,
}

impl SearchAggregator {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>, timeout_ms: u64) -> Self {
        Self {
            providers,
            timeout_ms,
        }
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.providers.iter().map(|p| p.platform()).collect()
    }

    /// Run the query and return at most `max_results` results, grouped by
    /// adapter in configured order.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: PlatformFilter,
    ) -> Vec<CanonicalSearchResult> {
        let query = query.trim();
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let selected: Vec<&Arc<dyn SearchProvider>> = self
            .providers
            .iter()
            .filter(|p| filter.allows(p.platform()))
            .collect();

        if selected.is_empty() {
            tracing::debug!(filter = %filter, "no search adapters match filter");
            return Vec::new();
        }

        tracing::debug!(
            query = %query,
            max_results,
            adapter_count = selected.len(),
            "dispatching search"
        );

        let timeout_ms = self.timeout_ms;
        let outcomes = futures::future::join_all(selected.iter().map(|provider| async move {
            let outcome = match with_timeout(timeout_ms, async {
                Ok::<_, ProviderError>(provider.search(query, max_results).await)
            })
            .await
            {
                Ok(outcome) => outcome,
                Err(e) => AdapterOutcome::Failed(e),
            };
            (provider.platform(), outcome)
        }))
        .await;

        let mut merged = Vec::new();
        for (platform, outcome) in outcomes {
            match &outcome {
                AdapterOutcome::Hits(items) => {
                    tracing::debug!(
                        platform = %platform,
                        result_count = items.len(),
                        "adapter returned results"
                    );
                }
                AdapterOutcome::NoMatch => {
                    tracing::debug!(platform = %platform, "adapter found no matches");
                }
                AdapterOutcome::Failed(e) => {
                    tracing::warn!(platform = %platform, error = %e, "search adapter failed");
                }
            }
            merged.extend(outcome.into_results());
        }

        merged.truncate(max_results);

        tracing::debug!(query = %query, result_count = merged.len(), "search completed");
        merged
    }
}
