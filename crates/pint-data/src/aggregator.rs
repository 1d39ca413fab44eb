//! Counting structures for one analysis run.
//!
//! All keyed tallies use `BTreeMap`, so iteration order is the key order and
//! every tie-break below is deterministic.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use pint_core::models::{AnalysisResult, ChartSeries, Event, TopPoster, WEEKDAY_LABELS};
use pint_core::time_utils::{
    format_day, format_latest_timestamp, hour_label, start_of_week, weekday_index,
};

// ── UserTally ─────────────────────────────────────────────────────────────────

/// Post counts per user within one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTally {
    counts: BTreeMap<String, u32>,
}

impl UserTally {
    pub fn add(&mut self, user: &str) {
        match self.counts.get_mut(user) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(user.to_string(), 1);
            }
        }
    }

    /// Highest count; ties go to the lexicographically smallest name.
    /// An empty tally yields [`TopPoster::none`].
    pub fn top_poster(&self) -> TopPoster {
        let mut best: Option<(&str, u32)> = None;
        for (user, &count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((user.as_str(), count));
            }
        }
        best.map_or_else(TopPoster::none, |(user, count)| TopPoster::new(user, count))
    }

    /// `(user, count)` pairs, highest count first, ties by name ascending.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut pairs: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(user, &count)| (user.as_str(), count))
            .collect();
        // Stable sort keeps the name order from the map for equal counts.
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

// ── DayTally ──────────────────────────────────────────────────────────────────

/// Post counts per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayTally {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DayTally {
    pub fn add(&mut self, day: NaiveDate) {
        *self.counts.entry(day).or_insert(0) += 1;
    }

    /// Busiest day and its count; the earliest day wins a tie.
    pub fn record_day(&self) -> Option<(NaiveDate, u32)> {
        let mut best: Option<(NaiveDate, u32)> = None;
        for (&day, &count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((day, count));
            }
        }
        best
    }
}

// ── ImageCatalog ──────────────────────────────────────────────────────────────

/// Attachment filenames in first-seen order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    seen: HashSet<String>,
    files: Vec<String>,
}

impl ImageCatalog {
    pub fn add(&mut self, file: &str) {
        if self.seen.insert(file.to_string()) {
            self.files.push(file.to_string());
        }
    }

    pub fn into_files(self) -> Vec<String> {
        self.files
    }
}

// ── PostAggregator ────────────────────────────────────────────────────────────

/// Single-pass accumulator over time-sorted events.
#[derive(Debug, Clone)]
pub struct PostAggregator {
    today: NaiveDate,
    week_start: NaiveDateTime,
    total: usize,
    latest: Option<NaiveDateTime>,
    all_time: UserTally,
    posted_today: UserTally,
    this_week: UserTally,
    by_date: DayTally,
    by_weekday: [u32; 7],
    by_hour: [u32; 24],
    images: ImageCatalog,
}

impl PostAggregator {
    /// Start an empty aggregate relative to the reference time `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            today: now.date(),
            week_start: start_of_week(now),
            total: 0,
            latest: None,
            all_time: UserTally::default(),
            posted_today: UserTally::default(),
            this_week: UserTally::default(),
            by_date: DayTally::default(),
            by_weekday: [0; 7],
            by_hour: [0; 24],
            images: ImageCatalog::default(),
        }
    }

    /// Accumulate one event. Events must arrive in timestamp order.
    pub fn add_event(&mut self, event: &Event) {
        let ts = event.timestamp;
        let day = ts.date();

        self.total += 1;
        self.latest = Some(ts);

        self.all_time.add(&event.user);
        self.by_date.add(day);
        self.by_weekday[weekday_index(ts)] += 1;
        self.by_hour[ts.hour() as usize] += 1;
        if let Some(file) = &event.image_file {
            self.images.add(file);
        }

        if day == self.today {
            self.posted_today.add(&event.user);
        }
        if ts >= self.week_start {
            self.this_week.add(&event.user);
        }
    }

    /// Build the final summary, or `None` when no event was added.
    pub fn finish(self) -> Option<AnalysisResult> {
        let latest = self.latest?;
        let (record_day, record_day_count) = self.by_date.record_day()?;

        let leaderboard_data = ChartSeries::from_pairs(self.all_time.ranked());
        let posts_by_day_data = ChartSeries::from_pairs(
            WEEKDAY_LABELS
                .iter()
                .copied()
                .zip(self.by_weekday.iter().copied()),
        );
        let posts_by_hour_data = ChartSeries::from_pairs(
            (0u32..24).map(hour_label).zip(self.by_hour.iter().copied()),
        );

        Some(AnalysisResult {
            total_posts: self.total,
            latest_timestamp: format_latest_timestamp(latest),
            leaderboard_data,
            posts_by_day_data,
            posts_by_hour_data,
            image_files: self.images.into_files(),
            record_day_count,
            record_day_date: format_day(record_day),
            top_poster_all_time: self.all_time.top_poster(),
            top_poster_today: self.posted_today.top_poster(),
            top_poster_this_week: self.this_week.top_poster(),
            latest_event_at: latest,
            record_day,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(y: i32, m: u32, d: u32, h: u32, user: &str, file: Option<&str>) -> Event {
        Event {
            timestamp: day(y, m, d).and_hms_opt(h, 0, 0).unwrap(),
            user: user.to_string(),
            image_file: file.map(str::to_string),
        }
    }

    // ── UserTally ─────────────────────────────────────────────────────────────

    #[test]
    fn test_user_tally_counts() {
        let mut tally = UserTally::default();
        tally.add("Alice");
        tally.add("Bob");
        tally.add("Alice");
        assert_eq!(tally.ranked(), vec![("Alice", 2), ("Bob", 1)]);
    }

    #[test]
    fn test_user_tally_top_poster_tie_goes_to_smallest_name() {
        let mut tally = UserTally::default();
        for user in ["Zoe", "Mike", "Zoe", "Mike", "Adam"] {
            tally.add(user);
        }
        assert_eq!(tally.top_poster(), TopPoster::new("Mike", 2));
    }

    #[test]
    fn test_user_tally_empty_top_poster_is_sentinel() {
        assert_eq!(UserTally::default().top_poster(), TopPoster::none());
    }

    #[test]
    fn test_user_tally_ranked() {
        let mut tally = UserTally::default();
        for user in ["Carol", "Bob", "Alice", "Bob", "Carol", "Carol"] {
            tally.add(user);
        }
        tally.add("Dave");
        assert_eq!(
            tally.ranked(),
            vec![("Carol", 3), ("Bob", 2), ("Alice", 1), ("Dave", 1)]
        );
    }

    // ── DayTally ──────────────────────────────────────────────────────────────

    #[test]
    fn test_day_tally_record_day() {
        let mut tally = DayTally::default();
        tally.add(day(2024, 6, 1));
        tally.add(day(2024, 6, 3));
        tally.add(day(2024, 6, 3));
        assert_eq!(tally.record_day(), Some((day(2024, 6, 3), 2)));
    }

    #[test]
    fn test_day_tally_tie_goes_to_earliest_day() {
        let mut tally = DayTally::default();
        tally.add(day(2024, 6, 9));
        tally.add(day(2024, 6, 9));
        tally.add(day(2024, 5, 2));
        tally.add(day(2024, 5, 2));
        assert_eq!(tally.record_day(), Some((day(2024, 5, 2), 2)));
    }

    #[test]
    fn test_day_tally_empty() {
        assert_eq!(DayTally::default().record_day(), None);
    }

    // ── ImageCatalog ──────────────────────────────────────────────────────────

    #[test]
    fn test_image_catalog_dedups_in_first_seen_order() {
        let mut catalog = ImageCatalog::default();
        for file in ["b.jpg", "a.jpg", "b.jpg", "c.jpg", "a.jpg"] {
            catalog.add(file);
        }
        assert_eq!(catalog.into_files(), vec!["b.jpg", "a.jpg", "c.jpg"]);
    }

    // ── PostAggregator ────────────────────────────────────────────────────────

    #[test]
    fn test_aggregator_empty_finishes_none() {
        let now = day(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap();
        assert!(PostAggregator::new(now).finish().is_none());
    }

    #[test]
    fn test_aggregator_scopes() {
        // Wednesday 5 June 2024; the week began Sunday 2 June.
        let now = day(2024, 6, 5).and_hms_opt(20, 0, 0).unwrap();
        let mut agg = PostAggregator::new(now);
        for e in [
            event(2024, 5, 30, 9, "Alice", Some("old.jpg")),
            event(2024, 5, 31, 9, "Alice", None),
            event(2024, 6, 3, 18, "Bob", Some("mon.jpg")),
            event(2024, 6, 5, 19, "Carol", Some("wed.jpg")),
        ] {
            agg.add_event(&e);
        }
        let result = agg.finish().unwrap();

        assert_eq!(result.total_posts, 4);
        assert_eq!(result.top_poster_all_time, TopPoster::new("Alice", 2));
        assert_eq!(result.top_poster_this_week, TopPoster::new("Bob", 1));
        assert_eq!(result.top_poster_today, TopPoster::new("Carol", 1));
        assert_eq!(result.image_files, vec!["old.jpg", "mon.jpg", "wed.jpg"]);
        assert_eq!(result.latest_timestamp, "5 Jun 2024, 19:00");
        assert_eq!(result.record_day, day(2024, 5, 30));
        assert_eq!(result.record_day_date, "30 May 2024");
        assert_eq!(result.record_day_count, 1);
    }

    #[test]
    fn test_aggregator_chart_labels() {
        let now = day(2024, 6, 1).and_hms_opt(23, 0, 0).unwrap();
        let mut agg = PostAggregator::new(now);
        agg.add_event(&event(2024, 6, 1, 0, "Alice", None));
        let result = agg.finish().unwrap();

        assert_eq!(
            result.posts_by_day_data.labels,
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(result.posts_by_day_data.data, vec![0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(result.posts_by_hour_data.len(), 24);
        assert_eq!(result.posts_by_hour_data.labels[0], "0:00");
        assert_eq!(result.posts_by_hour_data.labels[23], "23:00");
        assert_eq!(result.posts_by_hour_data.data[0], 1);
    }

    #[test]
    fn test_aggregator_no_posts_today_or_this_week() {
        let now = day(2024, 7, 1).and_hms_opt(12, 0, 0).unwrap();
        let mut agg = PostAggregator::new(now);
        agg.add_event(&event(2024, 6, 1, 10, "Alice", None));
        let result = agg.finish().unwrap();

        assert_eq!(result.top_poster_today, TopPoster::none());
        assert_eq!(result.top_poster_this_week, TopPoster::none());
        assert_eq!(result.top_poster_all_time, TopPoster::new("Alice", 1));
    }
}
