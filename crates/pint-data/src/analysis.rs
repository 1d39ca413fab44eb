//! Export analysis pipeline.
//!
//! Loads an export from disk, runs the [`ChatAnalyzer`] and records timing
//! and line counts alongside the result.

use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use pint_core::error::Result;
use pint_core::models::AnalysisResult;
use serde::Serialize;

use crate::analyzer::ChatAnalyzer;
use crate::reader::load_chat_text;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Export file or directory that was analysed.
    pub source: String,
    /// Reference time used for "today" and "this week".
    pub reference_time: String,
    pub lines_read: usize,
    pub posts_accepted: usize,
    pub lines_rejected: usize,
    /// Wall-clock seconds spent reading the export.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent parsing and aggregating.
    pub analyze_time_seconds: f64,
}

/// The complete output of [`analyze_export`].
#[derive(Debug, Clone)]
pub struct ExportAnalysis {
    /// `None` when the export holds no media posts.
    pub result: Option<AnalysisResult>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline on the export at `path`.
///
/// 1. Read the export text.
/// 2. Parse lines into events.
/// 3. Aggregate relative to `now`.
pub fn analyze_export(
    analyzer: &ChatAnalyzer,
    path: &Path,
    now: NaiveDateTime,
) -> Result<ExportAnalysis> {
    let load_start = std::time::Instant::now();
    let text = load_chat_text(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let analyze_start = std::time::Instant::now();
    let (events, summary) = analyzer.collect_events(&text);
    let result = ChatAnalyzer::analyze_events(events, now);
    let analyze_time = analyze_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: path.display().to_string(),
        reference_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        lines_read: summary.lines,
        posts_accepted: summary.accepted,
        lines_rejected: summary.rejected_total(),
        load_time_seconds: load_time,
        analyze_time_seconds: analyze_time,
    };

    Ok(ExportAnalysis { result, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
