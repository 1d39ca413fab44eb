//! Plain-text and JSON summaries for the terminal.

use pint_core::formatting::{bar, format_count, share_percent};
use pint_core::models::AnalysisResult;
use pint_data::analysis::ExportAnalysis;

const BAR_WIDTH: usize = 24;

/// Render the analysis as a JSON document with `analysis` and `metadata`.
pub fn render_json(analysis: &ExportAnalysis) -> pint_core::Result<String> {
    let doc = serde_json::json!({
        "analysis": analysis.result,
        "metadata": analysis.metadata,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render the analysis as a text summary, listing at most `top` users.
pub fn render_text(analysis: &ExportAnalysis, top: usize) -> String {
    match &analysis.result {
        Some(result) => render_result(result, top),
        None => format!("No media posts found in {}\n", analysis.metadata.source),
    }
}

fn render_result(result: &AnalysisResult, top: usize) -> String {
    let total = result.total_posts as u64;
    let mut out = String::new();

    out.push_str(&format!("Pint Chat: {} media posts\n", format_count(total)));
    out.push_str(&format!("As of: {}\n\n", result.latest_timestamp));

    let facts = [
        ("Top poster (today)", result.top_poster_today.to_string()),
        ("Top poster (this week)", result.top_poster_this_week.to_string()),
        ("Top poster (all time)", result.top_poster_all_time.to_string()),
        (
            "Record day",
            format!(
                "{} ({} posts)",
                result.record_day_date,
                format_count(u64::from(result.record_day_count))
            ),
        ),
        (
            "Unique images",
            format_count(result.image_files.len() as u64),
        ),
    ];
    for (label, value) in facts {
        out.push_str(&format!("{:<24}{}\n", label, value));
    }

    let leaderboard = result.leaderboard();
    let name_width = leaderboard
        .iter()
        .take(top)
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let leader_max = leaderboard.first().map_or(0, |(_, c)| u64::from(*c));

    out.push_str("\nLeaderboard\n");
    for (rank, (name, count)) in leaderboard.iter().take(top).enumerate() {
        let count = u64::from(*count);
        out.push_str(&format!(
            "{:>3}. {:<name_width$}  {:>6}  {:>5.1}%  {}\n",
            rank + 1,
            name,
            format_count(count),
            share_percent(count, total),
            bar(count, leader_max, BAR_WIDTH),
        ));
    }
    if leaderboard.len() > top {
        out.push_str(&format!("     ... and {} more\n", leaderboard.len() - top));
    }

    render_histogram(&mut out, "Weekly rhythm", result.posts_by_day_data.pairs());
    render_histogram(&mut out, "Peak hours", result.posts_by_hour_data.pairs());

    out
}

fn render_histogram<'a>(out: &mut String, title: &str, pairs: impl Iterator<Item = (&'a str, u32)>) {
    let rows: Vec<(&str, u64)> = pairs.map(|(label, v)| (label, u64::from(v))).collect();
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);

    out.push_str(&format!("\n{}\n", title));
    for (label, value) in rows {
        out.push_str(&format!(
            "  {:>5}  {:>6}  {}\n",
            label,
            format_count(value),
            bar(value, max, BAR_WIDTH)
        ));
    }
}
