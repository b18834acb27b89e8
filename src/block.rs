//! Block filtering: segments raw log text into blank-line-delimited entries and
//! keeps whole entries that mention a keyword, optionally restricted to one day.
//!
//! Filtering runs in two steps. [`segment`] finds the entry spans, then
//! [`BlockFilter::apply`] walks each span line by line, tracking the date
//! section the line falls under and counting keyword hits.

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime};

use crate::filter::Keywords;

const DATE_MARKER: &str = "date:";
/// Timestamp layout that follows the date marker, e.g. `01/15/2024 10:00:00 AM`.
pub const MARKER_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// How often a matching entry is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Once per entry, however many of its lines match.
    #[default]
    PerEntry,
    /// Once per matching line.
    PerMatch,
}

/// Result of one filtering pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filtered {
    /// Retained entry lines, every entry followed by one empty line.
    pub lines: Vec<String>,
    /// Number of entries emitted.
    pub entries: usize,
    /// Non-blank lines in the input.
    pub scanned: usize,
}

impl Filtered {
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Spans of maximal runs of non-blank lines, in order.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < lines.len() {
        if is_blank(lines[start].as_ref()) {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < lines.len() && !is_blank(lines[end].as_ref()) {
            end += 1;
        }
        spans.push(start..end);
        start = end;
    }
    spans
}

/// Date carried by a `Date:` marker line, if the line is one and its timestamp parses.
pub fn marker_date(line: &str) -> Option<NaiveDate> {
    let line = line.trim_start();
    let head = line.get(..DATE_MARKER.len())?;
    if !head.eq_ignore_ascii_case(DATE_MARKER) {
        return None;
    }
    let stamp = line[DATE_MARKER.len()..].trim();
    match NaiveDateTime::parse_from_str(stamp, MARKER_DATE_FORMAT) {
        Ok(dt) => Some(dt.date()),
        Err(e) => {
            tracing::debug!(stamp, error = %e, "ignoring unparsable date marker");
            None
        }
    }
}

pub struct BlockFilter<'a> {
    keywords: &'a Keywords,
    date: Option<NaiveDate>,
    mode: EmitMode,
}

impl<'a> BlockFilter<'a> {
    pub fn new(keywords: &'a Keywords) -> Self {
        Self { keywords, date: None, mode: EmitMode::default() }
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_mode(mut self, mode: EmitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn apply<S: AsRef<str>>(&self, lines: &[S]) -> Filtered {
        let mut out = Filtered {
            scanned: lines.iter().filter(|l| !is_blank(l.as_ref())).count(),
            ..Filtered::default()
        };

        // Date sections run from one parsable marker to the next and may span entries.
        let mut skip = false;
        for span in segment(lines) {
            let mut hits = 0usize;
            for line in &lines[span.clone()] {
                let line = line.as_ref();
                if let Some(target) = self.date {
                    if let Some(found) = marker_date(line) {
                        skip = found != target;
                    }
                }
                if !skip && self.keywords.matches(line) {
                    hits += 1;
                }
            }

            let times = match self.mode {
                EmitMode::PerEntry => hits.min(1),
                EmitMode::PerMatch => hits,
            };
            for _ in 0..times {
                out.lines.extend(lines[span.clone()].iter().map(|l| l.as_ref().to_string()));
                out.lines.push(String::new());
                out.entries += 1;
            }
        }

        tracing::debug!(scanned = out.scanned, entries = out.entries, "block filter finished");
        out
    }
}
