use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Chart labels for the weekday histogram, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Placeholder shown for a top-poster scope with no posts.
pub const NO_POSTER: &str = "N/A";

/// A single media post extracted from a chat export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Wall-clock time of the post in the chat's timezone.
    pub timestamp: NaiveDateTime,
    /// Normalised display name of the poster.
    pub user: String,
    /// Attachment filename, when the message named one.
    pub image_file: Option<String>,
}

/// Why a line did not become an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    /// The line does not follow `[DD/MM/YYYY, HH:MM:SS] user: message`.
    NoMatch,
    /// The message carries no media marker.
    NotMedia,
    /// The message is nothing but digits.
    BareNumber,
    /// The date or time fields do not form a real point in time.
    InvalidTimestamp,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::NoMatch => "no match",
            Rejection::NotMedia => "not media",
            Rejection::BareNumber => "bare number",
            Rejection::InvalidTimestamp => "invalid timestamp",
        };
        f.write_str(s)
    }
}

/// Result of parsing one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted(Event),
    Rejected(Rejection),
}

impl ParseOutcome {
    /// Convert into the accepted event, discarding the rejection reason.
    pub fn into_event(self) -> Option<Event> {
        match self {
            ParseOutcome::Accepted(event) => Some(event),
            ParseOutcome::Rejected(_) => None,
        }
    }
}

/// Parallel label / value sequences, as consumed by chart renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

impl ChartSeries {
    /// Build a series from `(label, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let (labels, data) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, data }
    }

    /// Iterate `(label, value)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The user with the most posts within one time scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopPoster {
    /// `None` when the scope had no posts at all.
    pub name: Option<String>,
    pub count: u32,
}

impl TopPoster {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: Some(name.into()),
            count,
        }
    }

    /// The empty-scope sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    /// Name for display, [`NO_POSTER`] for the sentinel.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NO_POSTER)
    }
}

impl fmt::Display for TopPoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} posts)", self.display_name(), self.count)
    }
}

/// Summary statistics for one chat export.
///
/// Serialises to the camelCase shape read by the dashboard renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Number of accepted media posts.
    pub total_posts: usize,
    /// Latest post time, e.g. `"1 Jun 2024, 12:00"`.
    pub latest_timestamp: String,
    /// All-time post counts per user, highest first.
    pub leaderboard_data: ChartSeries,
    /// Seven buckets, Sunday first.
    pub posts_by_day_data: ChartSeries,
    /// Twenty-four buckets, `0:00` to `23:00`.
    pub posts_by_hour_data: ChartSeries,
    /// Attachment filenames without duplicates.
    pub image_files: Vec<String>,
    pub record_day_count: u32,
    /// Busiest day, e.g. `"1 Jun 2024"`.
    pub record_day_date: String,
    pub top_poster_all_time: TopPoster,
    pub top_poster_today: TopPoster,
    pub top_poster_this_week: TopPoster,
    /// Timestamp of the chronologically last post.
    #[serde(skip)]
    pub latest_event_at: NaiveDateTime,
    /// Date behind `record_day_date`.
    #[serde(skip)]
    pub record_day: NaiveDate,
}

impl AnalysisResult {
    /// Leaderboard as `(user, count)` pairs, highest first.
    pub fn leaderboard(&self) -> Vec<(&str, u32)> {
        self.leaderboard_data.pairs().collect()
    }
}
