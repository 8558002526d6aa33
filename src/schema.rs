use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_TITLE: &str = "Unknown";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Platform tag identifying which adapter produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "soundcloud")]
    SoundCloud,
    #[serde(rename = "mixcloud")]
    Mixcloud,
    #[serde(rename = "internet-archive")]
    InternetArchive,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::YouTube,
        Platform::SoundCloud,
        Platform::Mixcloud,
        Platform::InternetArchive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::SoundCloud => "soundcloud",
            Platform::Mixcloud => "mixcloud",
            Platform::InternetArchive => "internet-archive",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown platform: {}", s))
    }
}

/// The single result shape every search adapter normalizes into.
///
/// All fields are always populated; adapters fill defaults instead of omitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSearchResult {
    /// Provider-scoped identifier (not globally unique)
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
    /// `M:SS`, `"0:00"` when unknown
    pub duration: String,
    pub url: String,
    pub embed_url: String,
    /// ISO-8601 or provider-native date; not guaranteed parseable
    pub published_at: String,
    pub view_count: u64,
    pub description: String,
    pub platform: Platform,
}

/// Unit a provider reports track length in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Milliseconds,
}

/// Format a provider-native length as `minutes:seconds`, seconds zero-padded.
pub fn format_duration(value: Option<f64>, unit: DurationUnit) -> String {
    let raw = value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0);
    let total_seconds = match unit {
        DurationUnit::Seconds => raw.floor() as u64,
        DurationUnit::Milliseconds => (raw / 1000.0).floor() as u64,
    };
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Prefer the largest image, then medium, then the smallest; `""` if none.
pub fn pick_thumbnail(large: Option<&str>, medium: Option<&str>, small: Option<&str>) -> String {
    [large, medium, small]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
        .to_string()
}

/// Provider description, or `"{title} by {artist}"` when blank.
pub fn describe(description: Option<&str>, title: &str, artist: &str) -> String {
    match description {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => format!("{} by {}", title, artist),
    }
}

/// First non-blank candidate, else `fallback`.
pub fn first_non_blank(candidates: &[Option<&str>], fallback: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .copied()
        .unwrap_or(fallback)
        .to_string()
}
