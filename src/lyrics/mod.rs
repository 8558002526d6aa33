//! Lyrics lookup for free-form queries
//!
//! This module provides:
//! - `LyricsSource`, the per-lookup seam (lyrics.ovh in production)
//! - `LookupPlan`, the artist/track guesses derived from a query
//! - `LyricsResolver`, which walks the guesses and always yields one value

pub mod ovh;

pub use ovh::LyricsOvhClient;

use crate::transport::{with_timeout, ProviderError};
use serde::Serialize;
use std::sync::Arc;

/// Returned when no guess produced lyrics
pub const LYRICS_PLACEHOLDER: &str =
    "Lyrics not available. Try searching with format: Artist - Song Name";

/// Looks up lyrics for an exact artist/track pair
#[async_trait::async_trait]
pub trait LyricsSource: Send + Sync {
    /// `Ok(None)` when the source has nothing for this pair
    async fn lookup(&self, artist: &str, track: &str) -> Result<Option<String>, ProviderError>;
}

/// An artist/track pair to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub artist: String,
    pub track: String,
}

/// Which stage produced the returned lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStage {
    /// Query split on a dash into artist and track
    Delimited,
    /// Track words split at the midpoint
    WordSplit,
    /// Nothing found; the placeholder was returned
    Unresolved,
}

/// Guesses derived from a query, in the order they are tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPlan {
    pub delimited: Option<Guess>,
    pub word_split: Option<Guess>,
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

impl LookupPlan {
    pub fn from_query(query: &str) -> Self {
        let (artist, track) = match query.split_once(is_dash) {
            Some((artist, track)) => (artist.trim(), track.trim()),
            None => ("", query.trim()),
        };

        let delimited = (!artist.is_empty() && !track.is_empty()).then(|| Guess {
            artist: artist.to_string(),
            track: track.to_string(),
        });

        let words: Vec<&str> = track.split_whitespace().collect();
        let word_split = (words.len() >= 2).then(|| {
            let mid = words.len() / 2;
            Guess {
                artist: words[..mid].join(" "),
                track: words[mid..].join(" "),
            }
        });

        Self {
            delimited,
            word_split,
        }
    }
}

/// Final answer for one query: exactly one lyrics value, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsResolution {
    pub lyrics: String,
    pub stage: ResolveStage,
}

/// Two-stage lyrics resolver over a single [`LyricsSource`]
pub struct LyricsResolver {
    source: Arc<dyn LyricsSource>,
    timeout_ms: u64,
}

impl LyricsResolver {
    pub fn new(source: Arc<dyn LyricsSource>, timeout_ms: u64) -> Self {
        Self { source, timeout_ms }
    }

    async fn try_guess(&self, guess: &Guess, stage: ResolveStage) -> Option<String> {
        tracing::debug!(
            artist = %guess.artist,
            track = %guess.track,
            stage = ?stage,
            "looking up lyrics"
        );

        match with_timeout(self.timeout_ms, self.source.lookup(&guess.artist, &guess.track)).await {
            Ok(Some(lyrics)) if !lyrics.trim().is_empty() => Some(lyrics),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(stage = ?stage, error = %e, "lyrics lookup failed");
                None
            }
        }
    }

    pub async fn resolve(&self, query: &str) -> LyricsResolution {
        let plan = LookupPlan::from_query(query);

        let stages = [
            (plan.delimited.as_ref(), ResolveStage::Delimited),
            (plan.word_split.as_ref(), ResolveStage::WordSplit),
        ];
        for (guess, stage) in stages {
            let Some(guess) = guess else { continue };
            if let Some(lyrics) = self.try_guess(guess, stage).await {
                return LyricsResolution { lyrics, stage };
            }
        }

        tracing::debug!(query = %query, "no lyrics found");
        LyricsResolution {
            lyrics: LYRICS_PLACEHOLDER.to_string(),
            stage: ResolveStage::Unresolved,
        }
    }
}
