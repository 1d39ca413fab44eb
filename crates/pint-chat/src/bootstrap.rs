use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pint_core::time_utils::ChatClock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.pint-chat/` exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(home.join(".pint-chat"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber on stderr.
///
/// `log_level` takes the CLI level names and falls back to `"info"`.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(tracing_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

/// Map CLI level names onto `tracing` directives.
fn tracing_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

// ── Reference time ─────────────────────────────────────────────────────────────

/// The `--now` override when given, otherwise the current chat-local time.
pub fn reference_time(clock: &ChatClock, now: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    match now {
        Some(s) => Ok(clock.parse_reference_time(s)?),
        None => Ok(clock.now()),
    }
}

// ── Chat discovery ─────────────────────────────────────────────────────────────

/// Look for a chat export in `base`.
///
/// Checks `_chat.txt` (the exporter's default name), then `chat.txt`.
pub fn discover_chat_path(base: &Path) -> Option<PathBuf> {
    let candidates = [base.join("_chat.txt"), base.join("chat.txt")];
    candidates.into_iter().find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
