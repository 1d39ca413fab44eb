//! Line grammar for chat exports.
//!
//! Accepts `[DD/MM/YYYY, HH:MM:SS] user: message` lines whose message is a
//! media post and turns them into [`Event`]s. Everything else is rejected
//! with a [`Rejection`] reason.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pint_core::models::{Event, ParseOutcome, Rejection};
use regex::{Captures, Regex};

/// Marker the exporter writes in place of an image that was left out.
/// The leading left-to-right mark is part of the marker.
pub const IMAGE_OMITTED_MARKER: &str = "\u{200e}image omitted";

/// Prefix of an inline attachment reference, `<attached: NAME>`.
pub const ATTACHED_MARKER: &str = "<attached: ";

/// Stateless apart from its compiled patterns; build once and reuse.
#[derive(Debug, Clone)]
pub struct LineParser {
    line_re: Regex,
    attached_re: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        // Attachment lines are often prefixed with a left-to-right mark.
        let line_re = Regex::new(
            r"^\x{200e}?\[([0-9]{2})/([0-9]{2})/([0-9]{4}), ([0-9]{2}):([0-9]{2}):([0-9]{2})\] ([^:]+): (.*)$",
        )
        .expect("regex is valid");
        let attached_re = Regex::new(r"<attached: (.*?)>").expect("regex is valid");
        Self {
            line_re,
            attached_re,
        }
    }

    /// Parse a single raw line.
    pub fn parse(&self, line: &str) -> ParseOutcome {
        let Some(caps) = self.line_re.captures(line) else {
            return ParseOutcome::Rejected(Rejection::NoMatch);
        };

        let message = &caps[8];
        if is_bare_number(message) {
            return ParseOutcome::Rejected(Rejection::BareNumber);
        }
        if !has_media(message) {
            return ParseOutcome::Rejected(Rejection::NotMedia);
        }

        let Some(timestamp) = timestamp_from_captures(&caps) else {
            return ParseOutcome::Rejected(Rejection::InvalidTimestamp);
        };

        let image_file = self
            .attached_re
            .captures(message)
            .map(|c| c[1].to_string());

        ParseOutcome::Accepted(Event {
            timestamp,
            user: normalize_user(&caps[7]),
            image_file,
        })
    }

    /// Parse every line of `text`, yielding only accepted events.
    pub fn parse_lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Event> + 'a {
        text.lines()
            .filter_map(move |line| self.parse(line).into_event())
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `true` when the message refers to an image or an attachment.
pub fn has_media(message: &str) -> bool {
    message.contains(IMAGE_OMITTED_MARKER) || message.contains(ATTACHED_MARKER)
}

/// `true` when the trimmed message is one or more ASCII digits.
pub fn is_bare_number(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Strip every `"~ "` marker and surrounding whitespace from a user field.
pub fn normalize_user(raw: &str) -> String {
    raw.replace("~ ", "").trim().to_string()
}

/// Day/month/year order is fixed; out-of-range fields yield `None`.
fn timestamp_from_captures(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let field = |i: usize| caps[i].parse::<u32>().ok();

    let day = field(1)?;
    let month = field(2)?;
    let year = caps[3].parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(field(4)?, field(5)?, field(6)?)?;
    Some(date.and_time(time))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
