pub mod settings;

pub use settings::{
    ChatConfig, ChatProviderConfig, Config, DebugLogRotation, LyricsConfig, SearchConfig,
    WireKind,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("mate");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from the default path, or create it with defaults
pub fn load_or_create_config() -> Result<Config> {
    let path = config_path()?;

    if path.exists() {
        load_config_from(&path)
    } else {
        let config = Config::default();
        save_config_to(&config, &path)?;

        eprintln!("Created default config at: {}", path.display());
        eprintln!("Add a YouTube API key and SoundCloud client id to enable those platforms.");

        Ok(config)
    }
}

/// Load and validate configuration from an explicit file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config file")?;
    Ok(())
}
