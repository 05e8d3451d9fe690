//! The two-click range selection state machine.
//!
//! Each period is either idle (no in-progress entry) or selecting
//! (anchored at the first-clicked date, with live bounds tracking the
//! hover preview). Single mode bypasses the machine entirely: one click
//! commits and closes the popup.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dates;
use crate::model::{BoundValue, DateRange, RangeValue};
use crate::types::{Mode, PeriodName};

use super::events::PickerEvent;
use super::DatePicker;

/// A range selection between its first and second click. `selected` is
/// the anchor; `start`/`end` track the live preview around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InProgressSelection {
    pub selected: NaiveDateTime,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl InProgressSelection {
    fn anchored_at(date: NaiveDateTime) -> Self {
        InProgressSelection {
            selected: date,
            start: date,
            end: date,
        }
    }
}

/// Per-period in-progress selection slots.
#[derive(Debug, Clone, Default)]
pub(crate) struct Selections {
    base: Option<InProgressSelection>,
    comparison: Option<InProgressSelection>,
}

impl Selections {
    pub fn get(&self, period: PeriodName) -> Option<&InProgressSelection> {
        match period {
            PeriodName::Base => self.base.as_ref(),
            PeriodName::Comparison => self.comparison.as_ref(),
        }
    }

    pub fn get_mut(&mut self, period: PeriodName) -> Option<&mut InProgressSelection> {
        match period {
            PeriodName::Base => self.base.as_mut(),
            PeriodName::Comparison => self.comparison.as_mut(),
        }
    }

    pub fn set(&mut self, period: PeriodName, selection: InProgressSelection) {
        match period {
            PeriodName::Base => self.base = Some(selection),
            PeriodName::Comparison => self.comparison = Some(selection),
        }
    }

    pub fn clear(&mut self, period: PeriodName) {
        match period {
            PeriodName::Base => self.base = None,
            PeriodName::Comparison => self.comparison = None,
        }
    }
}

/// Order two clicks into range endpoints. Comparison is by calendar day;
/// a same-day second click keeps the anchor first.
fn ordered_endpoints(
    anchor: NaiveDateTime,
    date: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    if dates::day_cmp(date, anchor) == Ordering::Less {
        (date, anchor)
    } else {
        (anchor, date)
    }
}

impl DatePicker {
    /// Handle a cell click.
    ///
    /// Single mode commits directly and closes the popup. Range mode
    /// runs the two-click machine on the current period: first click
    /// arms the selection, second click commits it.
    pub fn select_date(&mut self, date: NaiveDateTime) {
        match self.mode() {
            Mode::Range => self.handle_range_selection(date),
            Mode::Single => {
                debug!("SELECT: committing single date {}", date.date());
                self.set_value(BoundValue::Single(date));
                self.close_popup();
            }
        }
    }

    fn handle_range_selection(&mut self, date: NaiveDateTime) {
        if !self.is_selecting() {
            self.start_selection(date);
        } else {
            self.stop_selection(date);
            self.close_popup();
        }
    }

    /// True while the current period is between its first and second
    /// click. Other periods' stale entries are not consulted.
    pub fn is_selecting(&self) -> bool {
        self.selections.get(self.current_period).is_some()
    }

    /// Live bounds of the current period's in-progress selection, if any.
    pub fn in_progress_selection(&self) -> Option<&InProgressSelection> {
        self.selections.get(self.current_period)
    }

    fn start_selection(&mut self, date: NaiveDateTime) {
        let period = self.current_period;
        debug!("SELECT: starting {:?} selection at {}", period, date.date());
        self.selections
            .set(period, InProgressSelection::anchored_at(date));
        self.broadcast(PickerEvent::SelectionStarted { period });
    }

    fn stop_selection(&mut self, date: NaiveDateTime) {
        let period = self.current_period;
        let Some(selection) = self.selections.get(period).copied() else {
            return;
        };

        let (start, end) = ordered_endpoints(selection.selected, date);
        debug!(
            "SELECT: committing {:?} period {} .. {}",
            period,
            start.date(),
            end.date()
        );
        self.commit_current_period(start, end);
        self.selections.clear(period);
        self.broadcast(PickerEvent::SelectionEnded { period });
    }

    fn commit_current_period(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        // A foreign mutation may have stolen the range shape between
        // clicks; reshape rather than drop the commit.
        if self.value.as_range().is_none() {
            self.value = BoundValue::Range(RangeValue::default());
        }
        if let BoundValue::Range(range) = &mut self.value {
            range.set_period(self.current_period, DateRange { start, end });
        }
    }

    /// Update the live hover preview while selecting. Returns `false`
    /// (and does nothing) while idle.
    pub fn preview_selection(&mut self, date: NaiveDateTime) -> bool {
        let period = self.current_period;
        let Some(selection) = self.selections.get_mut(period) else {
            return false;
        };

        let (start, end) = ordered_endpoints(selection.selected, date);
        selection.start = start;
        selection.end = end;
        true
    }
}
