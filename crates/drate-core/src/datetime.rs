//! Conversion between calendar dates and integer day indices.
//!
//! Every date in a cohort is stored as a signed day offset from a fixed
//! epoch. Parsing never fails loudly: an empty or unparseable cell becomes
//! `None`, which downstream code treats as "absent" (no death, no dose).

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use drate_model::{DATE_FORMAT, DayIndex};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a calendar date, tolerating a trailing time component.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|datetime| datetime.date())
}

/// Maps dates to day offsets from an epoch and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayIndexer {
    epoch: NaiveDate,
}

impl DayIndexer {
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Day offset of `date`; dates before the epoch are negative.
    pub fn day_index(&self, date: NaiveDate) -> DayIndex {
        date.signed_duration_since(self.epoch).num_days()
    }

    /// Day offset of a raw cell, or `None` when it is empty or unparseable.
    pub fn parse(&self, value: &str) -> Option<DayIndex> {
        parse_date(value).map(|date| self.day_index(date))
    }

    /// Calendar date for a day offset, `None` outside chrono's date range.
    pub fn date(&self, day: DayIndex) -> Option<NaiveDate> {
        let delta = TimeDelta::try_days(day)?;
        self.epoch.checked_add_signed(delta)
    }

    /// `YYYY-MM-DD` text for an optional day offset; absent values become "".
    pub fn format(&self, day: Option<DayIndex>) -> String {
        day.and_then(|day| self.date(day))
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}
