//! Calendar helpers for the word-of-the-day log.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::ParseError;

/// Explicit date formats accepted for a start date, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Where a word list starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDate {
    Today,
    Tomorrow,
    /// Blank answer: the first day after the log's latest entry.
    NextOpen,
    On(NaiveDate),
}

impl StartDate {
    /// Parse a user answer. `today` and `tomorrow` are case-insensitive,
    /// blank input means [`StartDate::NextOpen`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::NextOpen);
        }
        match trimmed.to_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            _ => parse_date(trimmed).map(Self::On),
        }
    }

    /// Resolve against the current date and the log's latest entry.
    pub fn resolve(self, today: NaiveDate, latest: Option<NaiveDate>) -> Result<NaiveDate, ParseError> {
        match self {
            Self::Today => Ok(today),
            Self::Tomorrow => next_day(today),
            Self::NextOpen => latest.map_or(Ok(today), next_day),
            Self::On(date) => Ok(date),
        }
    }
}

/// Parse an explicit calendar date in any of the accepted formats.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ParseError::InvalidDate(trimmed.to_string()))
}

/// The day after `date`, or [`ParseError::InvalidDate`] past the end of the
/// calendar.
pub fn next_day(date: NaiveDate) -> Result<NaiveDate, ParseError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| ParseError::InvalidDate(format!("day after {date}")))
}

/// Consecutive dates starting at `start`, one per item, ending with
/// [`NaiveDate::MAX`].
pub fn consecutive_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |date| date.succ_opt())
}

/// Every date in `[min, max]` that is not in `present`, ascending.
pub fn missing_dates(present: &BTreeSet<NaiveDate>, min: NaiveDate, max: NaiveDate) -> Vec<NaiveDate> {
    min.iter_days()
        .take_while(|d| *d <= max)
        .filter(|d| !present.contains(d))
        .collect()
}
