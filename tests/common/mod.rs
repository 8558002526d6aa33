//! Common test utilities: a scripted in-memory transport and config fixtures

#![allow(dead_code)]

use mate::config::{ChatProviderConfig, Config, WireKind};
use mate::transport::{ProviderError, Transport};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub mod fixtures;

/// What the fake transport answers for a matching URL
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Fail(ProviderError),
    /// Answer only after sleeping; used to trip caller timeouts
    Slow(Duration, Value),
}

/// One recorded outbound call
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that answers from a route table instead of the network.
///
/// Routes match when their pattern is a substring of the URL; the first
/// match wins. Unmatched URLs fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, pattern: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((pattern.to_string(), reply));
        self
    }

    pub fn on_json(self, pattern: &str, body: Value) -> Self {
        self.on(pattern, Reply::Json(body))
    }

    pub fn on_fail(self, pattern: &str, err: ProviderError) -> Self {
        self.on(pattern, Reply::Fail(err))
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }

    pub fn calls_to(&self, pattern: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.url.contains(pattern))
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, call: Call) -> Result<Value, ProviderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let reply = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, _)| call.url.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());
        let url = call.url.clone();
        self.calls.lock().unwrap().push(call);

        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Slow(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            None => Err(ProviderError::Network(format!("no route for {}", url))),
        }
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Value, ProviderError> {
        self.answer(Call {
            method: "GET",
            url: url.to_string(),
            query: query.to_vec(),
            body: None,
        })
        .await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ProviderError> {
        self.answer(Call {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
        .await
    }
}

/// Chat provider entry pointing at a fake host
pub fn chat_provider(name: &str, timeout_ms: u64, wire: WireKind) -> ChatProviderConfig {
    ChatProviderConfig {
        name: name.to_string(),
        endpoint: format!("http://{}.chat.test/chat/", name),
        timeout_ms,
        wire,
        model: None,
    }
}

/// Config whose endpoints all live on `.test` hosts
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.search.timeout_ms = 1_000;
    config.search.youtube.endpoint = "http://youtube.test/search".to_string();
    config.search.youtube.api_key = Some("yt-key".to_string());
    config.search.soundcloud.endpoint = "http://soundcloud.test/search".to_string();
    config.search.soundcloud.client_id = Some("sc-client".to_string());
    config.search.mixcloud.endpoint = "http://mixcloud.test/search/".to_string();
    config.search.internet_archive.endpoint = "http://archive.test/advancedsearch.php".to_string();
    config.lyrics.endpoint = "http://lyrics.test".to_string();
    config.lyrics.timeout_ms = 1_000;
    config.chat.providers = vec![
        chat_provider("primary", 1_000, WireKind::Message),
        chat_provider("backup", 1_000, WireKind::OpenAi),
    ];
    config
}
