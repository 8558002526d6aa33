//! lyrics.ovh API client
//!
//! API: `GET /v1/{artist}/{title}` → `{"lyrics": "..."}`, 404 when unknown.

use super::LyricsSource;
use crate::transport::{ProviderError, Transport};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    lyrics: Option<String>,
}

pub struct LyricsOvhClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl LyricsOvhClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn lookup_url(&self, artist: &str, track: &str) -> String {
        format!(
            "{}/v1/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(track)
        )
    }
}

#[async_trait::async_trait]
impl LyricsSource for LyricsOvhClient {
    async fn lookup(&self, artist: &str, track: &str) -> Result<Option<String>, ProviderError> {
        let url = self.lookup_url(artist, track);

        let raw = match self.transport.get_json(&url, &[]).await {
            Ok(raw) => raw,
            Err(ProviderError::Status(404)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let response = LyricsResponse::deserialize(&raw)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        Ok(response.lyrics.filter(|l| !l.trim().is_empty()))
    }
}
