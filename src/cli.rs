use crate::config::{self, Config};
use crate::llm::{ChatMessage, ChatOptions};
use crate::search::PlatformFilter;
use crate::service::{MusicService, SearchRequest};
use crate::transport::ReqwestTransport;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "mate", version, about = "Music discovery: search, chat and lyrics")]
struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search every enabled platform and print results as JSON.
    Search {
        query: String,
        /// Defaults to `search.default_max_results` from the config file
        #[arg(long)]
        max_results: Option<usize>,
        /// all, youtube, soundcloud, mixcloud or internet-archive
        #[arg(long, default_value = "all")]
        platform: PlatformFilter,
    },
    /// Ask the music assistant a question.
    Chat {
        message: String,
        #[arg(long)]
        system: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        temperature: Option<f32>,
        #[arg(long)]
        max_tokens: Option<u32>,
    },
    /// Find a video id and lyrics for "Artist - Song".
    SongInfo { query: String },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the default config file location.
    Path,
    /// Print the effective configuration.
    Show,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => config::load_config_from(path),
        None => config::load_or_create_config(),
    }
}

/// Parse arguments and run one command
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Config { cmd: ConfigCommand::Path } = cli.command {
        println!("{}", config::config_path()?.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;
    let _log_guard = crate::logging::init(&config)?;

    let transport = Arc::new(ReqwestTransport::new(&config.search.user_agent)?);
    let service = MusicService::from_config(&config, transport);

    match cli.command {
        Command::Search {
            query,
            max_results,
            platform,
        } => {
            let request = SearchRequest {
                query,
                max_results,
                platform,
            };
            let results = service.search(&request).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Chat {
            message,
            system,
            model,
            temperature,
            max_tokens,
        } => {
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(ChatMessage::system(system));
            }
            messages.push(ChatMessage::user(message));

            let options = ChatOptions {
                model,
                temperature,
                max_tokens,
            };
            let answer = service.chat(&messages, &options).await?;
            println!("{}", answer);
        }
        Command::SongInfo { query } => {
            let info = service.song_info(&query).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Config { cmd: ConfigCommand::Show } => {
            let mut shown = config.clone();
            if shown.search.youtube.api_key.is_some() {
                shown.search.youtube.api_key = Some("***".to_string());
            }
            if shown.search.soundcloud.client_id.is_some() {
                shown.search.soundcloud.client_id = Some("***".to_string());
            }
            print!("{}", toml::to_string_pretty(&shown)?);
        }
        Command::Config { cmd: ConfigCommand::Path } => {}
    }

    Ok(())
}
