use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file instead of stderr
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory (defaults next to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub lyrics: LyricsConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Single append-only file
    None,
    /// `tracing-appender` daily files
    Daily,
    /// One file per process start
    Session,
}

/// Search adapters and their shared limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_max_results: usize,
    /// Per-adapter timeout
    pub timeout_ms: u64,
    pub user_agent: String,
    pub youtube: YouTubeConfig,
    pub soundcloud: SoundCloudConfig,
    pub mixcloud: MixcloudConfig,
    pub internet_archive: InternetArchiveConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: 20,
            timeout_ms: 10_000,
            user_agent: "Mozilla/5.0 (compatible; mate/0.1)".to_string(),
            youtube: YouTubeConfig::default(),
            soundcloud: SoundCloudConfig::default(),
            mixcloud: MixcloudConfig::default(),
            internet_archive: InternetArchiveConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// YouTube Data API v3 key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://www.googleapis.com/youtube/v3/search".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundCloudConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Public api-v2 client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Default for SoundCloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api-v2.soundcloud.com/search".to_string(),
            client_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MixcloudConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MixcloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.mixcloud.com/search/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InternetArchiveConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for InternetArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://archive.org/advancedsearch.php".to_string(),
        }
    }
}

/// Ordered chat provider list; earlier entries are preferred
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub providers: Vec<ChatProviderConfig>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ChatProviderConfig {
                    name: "Primary API".to_string(),
                    endpoint: "https://ai-wtsg.onrender.com/chat/".to_string(),
                    // Render free instances can take a while to wake up
                    timeout_ms: 45_000,
                    wire: WireKind::Message,
                    model: None,
                },
                ChatProviderConfig {
                    name: "Fallback API 1".to_string(),
                    endpoint: "https://free-unoficial-gpt4o-mini-api-g70n.onrender.com/chat/"
                        .to_string(),
                    timeout_ms: 30_000,
                    wire: WireKind::Message,
                    model: None,
                },
                ChatProviderConfig {
                    name: "Fallback API 2".to_string(),
                    endpoint: "https://chatgpt-api.shn.hk/v1/".to_string(),
                    timeout_ms: 30_000,
                    wire: WireKind::OpenAi,
                    model: Some("gpt-3.5-turbo".to_string()),
                },
            ],
        }
    }
}

/// One chat completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatProviderConfig {
    /// Human-readable name, used in logs only
    pub name: String,

    pub endpoint: String,

    pub timeout_ms: u64,

    /// Request/response shape spoken by the endpoint
    #[serde(default)]
    pub wire: WireKind,

    /// Model sent to OpenAI-shaped endpoints when the caller gives no hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Supported chat wire formats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    /// `{"message": ...}` in, a single answer field out
    #[default]
    Message,
    /// OpenAI chat-completions shape
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.lyrics.ovh".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Reject values the orchestration code cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.timeout_ms == 0 {
            anyhow::bail!("search.timeout_ms must be positive");
        }
        if self.lyrics.timeout_ms == 0 {
            anyhow::bail!("lyrics.timeout_ms must be positive");
        }
        if self.lyrics.endpoint.trim().is_empty() {
            anyhow::bail!("lyrics.endpoint must not be empty");
        }

        let adapters = [
            ("youtube", self.search.youtube.enabled, &self.search.youtube.endpoint),
            ("soundcloud", self.search.soundcloud.enabled, &self.search.soundcloud.endpoint),
            ("mixcloud", self.search.mixcloud.enabled, &self.search.mixcloud.endpoint),
            (
                "internet_archive",
                self.search.internet_archive.enabled,
                &self.search.internet_archive.endpoint,
            ),
        ];
        for (name, enabled, endpoint) in adapters {
            if enabled && endpoint.trim().is_empty() {
                anyhow::bail!("search.{}.endpoint must not be empty", name);
            }
        }

        for (idx, provider) in self.chat.providers.iter().enumerate() {
            if provider.name.trim().is_empty() {
                anyhow::bail!("chat.providers[{}].name must not be empty", idx);
            }
            if provider.endpoint.trim().is_empty() {
                anyhow::bail!("chat provider '{}' has an empty endpoint", provider.name);
            }
            if provider.timeout_ms == 0 {
                anyhow::bail!("chat provider '{}' must have a positive timeout_ms", provider.name);
            }
        }

        Ok(())
    }
}
