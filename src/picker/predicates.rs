//! Per-cell rendering predicates.
//!
//! Pure queries the renderer asks for every visible cell. All date
//! comparisons are by calendar day; a period that is mid-selection
//! answers from the live preview bounds instead of the committed value.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::dates;
use crate::model::DateRange;
use crate::types::{Mode, PeriodName};

use super::DatePicker;

fn within(date: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    dates::day_cmp(date, start) != Ordering::Less && dates::day_cmp(date, end) != Ordering::Greater
}

impl DatePicker {
    /// False when the date falls outside the configured min/max limits.
    pub fn is_date_enabled(&self, date: NaiveDateTime) -> bool {
        if let Some(min) = self.config.min_date() {
            if dates::day_cmp(date, min) == Ordering::Less {
                return false;
            }
        }
        if let Some(max) = self.config.max_date() {
            if dates::day_cmp(date, max) == Ordering::Greater {
                return false;
            }
        }
        true
    }

    /// Day-equality against the "today" cached at construction.
    pub fn is_today(&self, date: NaiveDateTime) -> bool {
        dates::day_eq(date, self.today)
    }

    /// Single mode: day match against the bound date. Range mode: the
    /// date falls within either committed period.
    pub fn is_date_selected(&self, date: NaiveDateTime) -> bool {
        match self.mode() {
            Mode::Range => {
                self.is_date_within_base_period(date)
                    || self.is_date_within_comparison_period(date)
            }
            Mode::Single => self
                .value
                .as_single()
                .map_or(false, |d| dates::day_eq(d, date)),
        }
    }

    pub fn is_date_within_base_period(&self, date: NaiveDateTime) -> bool {
        self.is_date_within_period(PeriodName::Base, date)
    }

    pub fn is_date_within_comparison_period(&self, date: NaiveDateTime) -> bool {
        self.is_date_within_period(PeriodName::Comparison, date)
    }

    /// Whether the date falls inside the given period: the live preview
    /// bounds while that period is the one being selected, otherwise the
    /// committed range (inclusive on both ends). Always false in single
    /// mode.
    pub fn is_date_within_period(&self, period: PeriodName, date: NaiveDateTime) -> bool {
        if !self.is_range() {
            return false;
        }
        if self.is_selecting() && self.current_period() == period {
            return self.is_date_within_selection(date);
        }

        match self.committed_period(period) {
            Some(range) => within(date, range.start, range.end),
            None => false,
        }
    }

    fn is_date_within_selection(&self, date: NaiveDateTime) -> bool {
        match self.in_progress_selection() {
            Some(selection) => within(date, selection.start, selection.end),
            None => false,
        }
    }

    fn committed_period(&self, period: PeriodName) -> Option<&DateRange> {
        self.value.as_range().and_then(|range| range.period(period))
    }

    /// Configured starting day of the week (0 = Sunday).
    pub fn starting_day(&self) -> u32 {
        self.config.starting_day()
    }
}
