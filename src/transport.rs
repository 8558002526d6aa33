use reqwest::Client;
use serde_json::Value;

/// Failure modes of a single outbound provider call.
///
/// Every variant is recoverable: callers degrade the provider to
/// "no contribution" and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no match")]
    NoMatch,

    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else {
            ProviderError::Network(crate::logging::redact_secrets(&err.to_string()))
        }
    }
}

/// JSON-over-HTTP seam between the orchestration code and the network.
///
/// Implementations perform exactly one request per call and never retry.
/// Timeouts are enforced by the caller.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given query pairs and parse the body as JSON.
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, ProviderError>;

    /// POST `body` as JSON to `url` and parse the response body as JSON.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ProviderError>;
}

/// `reqwest`-backed transport used outside of tests.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                status = %status,
                url = %crate::logging::redact_secrets(response.url().as_str()),
                "provider returned non-success status"
            );
            return Err(ProviderError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

/// Run `fut` under `timeout_ms`, mapping expiry to [`ProviderError::Timeout`].
///
/// The inner future is dropped on expiry, so a late response is discarded.
pub async fn with_timeout<T, F>(timeout_ms: u64, fut: F) -> Result<T, ProviderError>
where
    F: std::future::Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(std::time::Duration::from_millis(timeout_ms), fut).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout { timeout_ms }),
    }
}
