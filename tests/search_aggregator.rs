//! Integration tests for the multi-platform search aggregator

mod common;

use common::{fixtures, test_config, Reply, ScriptedTransport};
use mate::schema::Platform;
use mate::search::providers;
use mate::search::{PlatformFilter, SearchAggregator};
use mate::transport::ProviderError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn aggregator(transport: Arc<ScriptedTransport>, timeout_ms: u64) -> SearchAggregator {
    let adapters = providers::from_config(&test_config().search, transport);
    SearchAggregator::new(adapters, timeout_ms)
}

fn all_platforms_transport() -> ScriptedTransport {
    ScriptedTransport::new()
        .on_json("youtube.test", fixtures::youtube_search())
        .on_json("soundcloud.test", fixtures::soundcloud_search())
        .on_json("mixcloud.test", fixtures::mixcloud_search())
        .on_json("archive.test", fixtures::internet_archive_search())
}

#[tokio::test]
async fn test_merges_in_adapter_order() {
    let transport = all_platforms_transport().into_arc();

    let results = aggregator(transport.clone(), 1_000)
        .search("music", 20, PlatformFilter::All)
        .await;

    let platforms: Vec<Platform> = results.iter().map(|r| r.platform).collect();
    assert_eq!(
        platforms,
        vec![
            Platform::YouTube,
            Platform::SoundCloud,
            Platform::SoundCloud,
            Platform::Mixcloud,
            Platform::Mixcloud,
            Platform::InternetArchive,
            Platform::InternetArchive,
        ]
    );
    // Each adapter's own order survives the merge.
    assert_eq!(results[1].id, "2001");
    assert_eq!(results[2].id, "2002");
    assert_eq!(transport.calls().len(), 4);
}

#[tokio::test]
async fn test_caps_merged_results() {
    let transport = all_platforms_transport().into_arc();

    let results = aggregator(transport, 1_000)
        .search("music", 3, PlatformFilter::All)
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].platform, Platform::YouTube);
    assert_eq!(results[2].id, "2002");
}

#[tokio::test]
async fn test_filter_applied_before_dispatch() {
    let transport = all_platforms_transport().into_arc();

    let results = aggregator(transport.clone(), 1_000)
        .search("music", 20, PlatformFilter::Only(Platform::Mixcloud))
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.platform == Platform::Mixcloud));
    assert_eq!(transport.urls(), vec!["http://mixcloud.test/search/"]);
}

#[tokio::test]
async fn test_failing_adapter_contributes_nothing() {
    let transport = ScriptedTransport::new()
        .on_fail("youtube.test", ProviderError::Status(403))
        .on_fail("soundcloud.test", ProviderError::Network("dns".into()))
        .on_json("mixcloud.test", json!({"data": "garbage"}))
        .on_json("archive.test", fixtures::internet_archive_search())
        .into_arc();

    let results = aggregator(transport, 1_000)
        .search("blues", 20, PlatformFilter::All)
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.platform == Platform::InternetArchive));
}

#[tokio::test]
async fn test_slow_adapter_times_out_without_blocking_others() {
    let transport = ScriptedTransport::new()
        .on(
            "youtube.test",
            Reply::Slow(Duration::from_secs(10), fixtures::youtube_search()),
        )
        .on_json("soundcloud.test", fixtures::soundcloud_search())
        .on_json("mixcloud.test", json!({"data": []}))
        .on_json("archive.test", json!({"response": {"docs": []}}))
        .into_arc();

    let started = std::time::Instant::now();
    let results = aggregator(transport, 50)
        .search("music", 20, PlatformFilter::All)
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.platform == Platform::SoundCloud));
}

#[tokio::test]
async fn test_adapters_run_concurrently() {
    let delay = Duration::from_millis(30);
    let transport = ScriptedTransport::new()
        .on("youtube.test", Reply::Slow(delay, fixtures::youtube_search()))
        .on("soundcloud.test", Reply::Slow(delay, fixtures::soundcloud_search()))
        .on("mixcloud.test", Reply::Slow(delay, fixtures::mixcloud_search()))
        .on("archive.test", Reply::Slow(delay, fixtures::internet_archive_search()))
        .into_arc();

    let results = aggregator(transport.clone(), 1_000)
        .search("music", 20, PlatformFilter::All)
        .await;

    assert_eq!(results.len(), 7);
    assert!(transport.max_in_flight() > 1);
}

#[tokio::test]
async fn test_blank_query_or_zero_cap_makes_no_calls() {
    let transport = all_platforms_transport().into_arc();
    let aggregator = aggregator(transport.clone(), 1_000);

    assert!(aggregator.search("   ", 20, PlatformFilter::All).await.is_empty());
    assert!(aggregator.search("music", 0, PlatformFilter::All).await.is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_disabled_platform_is_not_queried() {
    let transport = all_platforms_transport().into_arc();
    let mut config = test_config();
    config.search.youtube.enabled = false;
    let aggregator = SearchAggregator::new(
        providers::from_config(&config.search, transport.clone()),
        1_000,
    );

    assert_eq!(
        aggregator.platforms(),
        vec![Platform::SoundCloud, Platform::Mixcloud, Platform::InternetArchive]
    );
    let results = aggregator
        .search("music", 20, PlatformFilter::Only(Platform::YouTube))
        .await;
    assert!(results.is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_search_is_byte_identical() {
    let transport = all_platforms_transport().into_arc();
    let aggregator = aggregator(transport, 1_000);

    let first = aggregator.search("music", 20, PlatformFilter::All).await;
    let second = aggregator.search("music", 20, PlatformFilter::All).await;

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
