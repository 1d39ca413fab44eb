//! Chat analyser.
//!
//! Runs the [`LineParser`] over an export, sorts the surviving media posts by
//! time and folds them into an [`AnalysisResult`] relative to a caller-supplied
//! reference time. No clock is read and no I/O happens here.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use pint_core::models::{AnalysisResult, Event, ParseOutcome, Rejection};
use tracing::debug;

use crate::aggregator::PostAggregator;
use crate::parser::LineParser;

// ── ParseSummary ──────────────────────────────────────────────────────────────

/// Line counts from one pass of the parser over an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Number of lines seen.
    pub lines: usize,
    /// Number of lines that became events.
    pub accepted: usize,
    /// Rejected lines per reason.
    pub rejected: BTreeMap<Rejection, usize>,
}

impl ParseSummary {
    fn record(&mut self, outcome: &ParseOutcome) {
        self.lines += 1;
        match outcome {
            ParseOutcome::Accepted(_) => self.accepted += 1,
            ParseOutcome::Rejected(reason) => *self.rejected.entry(*reason).or_insert(0) += 1,
        }
    }

    /// Total rejected lines across all reasons.
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

// ── ChatAnalyzer ──────────────────────────────────────────────────────────────

/// Turns export text into summary statistics.
#[derive(Debug, Clone, Default)]
pub struct ChatAnalyzer {
    parser: LineParser,
}

impl ChatAnalyzer {
    pub fn new(parser: LineParser) -> Self {
        Self { parser }
    }

    /// Parse every line of `text`, keeping accepted events in input order.
    pub fn collect_events(&self, text: &str) -> (Vec<Event>, ParseSummary) {
        let mut summary = ParseSummary::default();
        let mut events = Vec::new();

        for line in text.lines() {
            let outcome = self.parser.parse(line);
            summary.record(&outcome);
            if let ParseOutcome::Accepted(event) = outcome {
                events.push(event);
            }
        }

        debug!(
            "Parsed {} lines: {} accepted, {} rejected {:?}",
            summary.lines,
            summary.accepted,
            summary.rejected_total(),
            summary.rejected
        );
        (events, summary)
    }

    /// Analyse raw export text relative to `now`.
    ///
    /// Returns `None` when no line yields a media post.
    pub fn analyze(&self, text: &str, now: NaiveDateTime) -> Option<AnalysisResult> {
        let (events, _) = self.collect_events(text);
        Self::analyze_events(events, now)
    }

    /// Analyse already-parsed events relative to `now`.
    ///
    /// Events may arrive in any order; equal timestamps keep their relative
    /// order.
    pub fn analyze_events(mut events: Vec<Event>, now: NaiveDateTime) -> Option<AnalysisResult> {
        if events.is_empty() {
            debug!("ChatAnalyzer: no media posts to analyse");
            return None;
        }

        events.sort_by_key(|e| e.timestamp);

        let mut aggregator = PostAggregator::new(now);
        for event in &events {
            aggregator.add_event(event);
        }

        let result = aggregator.finish();
        if let Some(r) = &result {
            debug!(
                "ChatAnalyzer: {} posts from {} users, {} images, record day {} ({})",
                r.total_posts,
                r.leaderboard_data.len(),
                r.image_files.len(),
                r.record_day_date,
                r.record_day_count
            );
        }
        result
    }
}

/// Analyse `text` with a fresh [`ChatAnalyzer`].
pub fn analyze_chat(text: &str, now: NaiveDateTime) -> Option<AnalysisResult> {
    ChatAnalyzer::default().analyze(text, now)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
