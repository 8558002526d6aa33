use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "mate-debug.log";

/// Keeps the non-blocking file writer flushing until dropped
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize logging.
///
/// With `debug = true`, everything from this crate at debug level goes to a
/// log file (`~/.config/mate/mate-debug.log` by default). Otherwise warnings
/// go to stderr, filtered by `RUST_LOG` when set.
pub fn init(config: &Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mate=warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .ok(); // Already initialized (e.g. in tests).
        return Ok(None);
    }

    let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::Session);
    let base = resolve_base_log_path(config.debug_log_path.as_deref())?;
    let (writer, log_path, guard) = open_writer(&base, rotation, config.debug_log_keep)?;

    let filter = EnvFilter::try_new("mate=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok();

    tracing::info!(log_file = %log_path.display(), rotation = ?rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn open_writer(
    base: &Path,
    rotation: DebugLogRotation,
    keep: Option<usize>,
) -> Result<(NonBlocking, PathBuf, WorkerGuard)> {
    let (dir, base_name) = split_dir_and_name(base)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    match rotation {
        DebugLogRotation::None => {
            let (writer, guard) = tracing_appender::non_blocking(open_append(base)?);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Daily => {
            // tracing-appender names daily files `{base_name}.{YYYY-MM-DD}`
            cleanup_rotated_logs(&dir, &format!("{base_name}."), keep.unwrap_or(7))?;
            let appender = tracing_appender::rolling::daily(&dir, &base_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Ok((writer, base.to_path_buf(), guard))
        }
        DebugLogRotation::Session => {
            cleanup_rotated_logs(&dir, &format!("{base_name}.session-"), keep.unwrap_or(20))?;
            let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
            let session_path = dir.join(format!("{base_name}.session-{ts}"));
            let (writer, guard) = tracing_appender::non_blocking(open_append(&session_path)?);
            Ok((writer, session_path, guard))
        }
    }
}

fn open_append(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

fn resolve_base_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        return Ok(crate::config::config_path()?.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));

    // Trailing separator or an existing directory means "put the log in here".
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid debug_log_path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Delete all but the newest `keep` files starting with `prefix`. `keep == 0`
/// keeps everything.
fn cleanup_rotated_logs(dir: &Path, prefix: &str, keep: usize) -> Result<()> {
    if keep == 0 {
        return Ok(());
    }

    let mut candidates: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else { continue };
        if name.starts_with(prefix) {
            candidates.push(name.to_string());
        }
    }

    // Both suffix formats sort lexicographically by age.
    candidates.sort();
    candidates.reverse();

    for name in candidates.iter().skip(keep) {
        let path = dir.join(name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}

/// Best-effort redaction of credentials before URLs or bodies reach a log:
/// `client_id=` / `key=` query values and `sk-...` style API keys.
pub fn redact_secrets(input: &str) -> String {
    let mut out = redact_query_param(input, "client_id=");
    out = redact_query_param(&out, "key=");
    redact_sk_keys(&out)
}

fn redact_query_param(input: &str, param: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(param) {
        let at_boundary = pos == 0 || matches!(rest.as_bytes()[pos - 1], b'?' | b'&');
        let value_start = pos + param.len();
        out.push_str(&rest[..value_start]);

        if at_boundary {
            let value_len = rest[value_start..]
                .find(|c: char| c == '&' || c == '#' || c.is_whitespace())
                .unwrap_or(rest.len() - value_start);
            if value_len > 0 {
                out.push_str("***");
            }
            rest = &rest[value_start + value_len..];
        } else {
            rest = &rest[value_start..];
        }
    }

    out.push_str(rest);
    out
}

fn redact_sk_keys(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut last = 0usize;
    let mut i = 0usize;

    while let Some(offset) = input[i..].find("sk-") {
        let start = i + offset;
        let mut j = start + 3;
        while j < input.len()
            && matches!(bytes[j], b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_')
        {
            j += 1;
        }

        // Require a minimum length to reduce false positives.
        if j - (start + 3) >= 8 {
            out.push_str(&input[last..start]);
            out.push_str("sk-***REDACTED***");
            last = j;
        }
        i = j.max(start + 3);
    }

    out.push_str(&input[last..]);
    out
}
