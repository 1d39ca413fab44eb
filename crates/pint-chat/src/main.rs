mod bootstrap;
mod report;

use anyhow::Result;
use pint_core::error::ChatError;
use pint_core::settings::Settings;
use pint_core::time_utils::ChatClock;
use pint_data::analysis::analyze_export;
use pint_data::ChatAnalyzer;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Pint Chat v{} starting", env!("CARGO_PKG_VERSION"));

    let clock = ChatClock::new(&settings.timezone)?;
    let now = bootstrap::reference_time(&clock, settings.now.as_deref())?;
    tracing::info!("Timezone: {}, reference time: {}", clock.timezone(), now);

    let chat_path = match settings.chat.clone() {
        Some(path) => path,
        None => bootstrap::discover_chat_path(&std::env::current_dir()?).ok_or_else(|| {
            ChatError::Config("no chat export given and no _chat.txt here".to_string())
        })?,
    };

    let analysis = analyze_export(&ChatAnalyzer::default(), &chat_path, now)?;
    tracing::info!(
        "Read {} lines from {}: {} media posts",
        analysis.metadata.lines_read,
        analysis.metadata.source,
        analysis.metadata.posts_accepted
    );

    let output = if settings.json_output() {
        report::render_json(&analysis)?
    } else {
        report::render_text(&analysis, usize::from(settings.top))
    };
    println!("{}", output.trim_end());

    Ok(())
}
