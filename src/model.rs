//! The externally bound value and its normalizer.
//!
//! Hosts bind all sorts of shapes: a date, a date string, a range pair,
//! or nothing at all. [`normalize`] coerces whatever is there into the
//! canonical shape for the active mode before any panel or predicate
//! logic runs, and it runs again on every external mutation. Invalid
//! shapes are coerced, never rejected.

use chrono::NaiveDateTime;

use crate::dates;
use crate::types::{Mode, PeriodName};

/// A committed period: both endpoints present, `start <= end` by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The two independently selectable periods of range mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeValue {
    pub base: Option<DateRange>,
    pub comparison: Option<DateRange>,
}

impl RangeValue {
    pub fn period(&self, period: PeriodName) -> Option<&DateRange> {
        match period {
            PeriodName::Base => self.base.as_ref(),
            PeriodName::Comparison => self.comparison.as_ref(),
        }
    }

    pub fn set_period(&mut self, period: PeriodName, range: DateRange) {
        match period {
            PeriodName::Base => self.base = Some(range),
            PeriodName::Comparison => self.comparison = Some(range),
        }
    }
}

/// The externally bound value in all the shapes a host may hand over.
///
/// `Text` is transitional: the normalizer migrates it to a real date (or
/// discards it) on first touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BoundValue {
    #[default]
    Unset,
    Single(NaiveDateTime),
    Text(String),
    Range(RangeValue),
}

impl BoundValue {
    pub fn as_single(&self) -> Option<NaiveDateTime> {
        match self {
            BoundValue::Single(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            BoundValue::Range(r) => Some(r),
            _ => None,
        }
    }
}

/// Coerce the bound value into the canonical shape for the active mode.
///
/// Range mode: `Unset` and `Text` become an empty range pair; a bare date
/// survives with its time zeroed (hosts that bound a single date before
/// switching modes keep their value, and every consumer treats the
/// non-range shape as "nothing committed"). Single mode: dates are
/// truncated to midnight, strings are parsed (unparseable ones reset to
/// `Unset`), and range shapes reset to `Unset`.
pub fn normalize(value: &mut BoundValue, mode: Mode) {
    match mode {
        Mode::Range => match value {
            BoundValue::Unset | BoundValue::Text(_) => {
                *value = BoundValue::Range(RangeValue::default());
            }
            BoundValue::Single(d) => *d = dates::midnight(*d),
            BoundValue::Range(_) => {}
        },
        Mode::Single => match value {
            BoundValue::Single(d) => *d = dates::midnight(*d),
            BoundValue::Text(s) => {
                *value = match dates::parse_date(s) {
                    Some(d) => BoundValue::Single(dates::midnight(d)),
                    None => BoundValue::Unset,
                };
            }
            BoundValue::Range(_) => *value = BoundValue::Unset,
            BoundValue::Unset => {}
        },
    }
}
