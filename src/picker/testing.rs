//! General test utilities for picker tests.
//!
//! This module provides the common helpers used across the picker test
//! modules: pickers pinned to a fixed "today", a popup stub that counts
//! closes, and an observer that records lifecycle events.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::DatepickerConfig;
use crate::picker::{DatePicker, PickerEvent, Popup};

/// Build a midnight timestamp for test assertions.
pub fn test_date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// The fixed "today" every test picker is pinned to: 2024-03-15.
pub fn fixed_today() -> NaiveDateTime {
    test_date(2024, 3, 15)
}

/// A single-mode picker with `panels` panels, pinned to [`fixed_today`].
pub fn single_picker(panels: i64) -> DatePicker {
    let mut config = DatepickerConfig::default();
    config.overrides.panels = Some(panels.into());
    DatePicker::new(config).with_today(fixed_today())
}

/// A range-mode picker with `panels` panels, pinned to [`fixed_today`].
pub fn range_picker(panels: i64) -> DatePicker {
    let mut config = DatepickerConfig::default();
    config.overrides.mode = Some("range".into());
    config.overrides.panels = Some(panels.into());
    DatePicker::new(config).with_today(fixed_today())
}

/// Route tracing output to the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Popup stub that counts `close()` calls.
pub struct RecordingPopup {
    closes: Rc<RefCell<u32>>,
}

impl RecordingPopup {
    /// Attach a recording popup to the picker and return the probe used
    /// to assert on close counts.
    pub fn attach(picker: &mut DatePicker) -> PopupProbe {
        let closes = Rc::new(RefCell::new(0));
        picker.attach_popup(Box::new(RecordingPopup {
            closes: Rc::clone(&closes),
        }));
        PopupProbe { closes }
    }
}

impl Popup for RecordingPopup {
    fn close(&mut self) {
        *self.closes.borrow_mut() += 1;
    }
}

pub struct PopupProbe {
    closes: Rc<RefCell<u32>>,
}

impl PopupProbe {
    pub fn count(&self) -> u32 {
        *self.closes.borrow()
    }
}

/// Recorded lifecycle events, in broadcast order.
pub struct CapturedEvents {
    events: Rc<RefCell<Vec<PickerEvent>>>,
}

impl CapturedEvents {
    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<PickerEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// Subscribe a recording observer to the picker.
pub fn capture_events(picker: &mut DatePicker) -> CapturedEvents {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    picker.subscribe(move |event| sink.borrow_mut().push(*event));
    CapturedEvents { events }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_popup_counts_closes() {
        let mut picker = single_picker(1);
        let probe = RecordingPopup::attach(&mut picker);
        assert_eq!(probe.count(), 0);

        picker.close_popup();
        picker.close_popup();
        assert_eq!(probe.count(), 2);
    }

    #[test]
    fn test_capture_events_records_broadcasts() {
        let mut picker = range_picker(1);
        let events = capture_events(&mut picker);
        assert!(events.is_empty());

        picker.select_date(test_date(2024, 3, 10));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_pickers_are_pinned_to_fixed_today() {
        assert_eq!(single_picker(1).today(), fixed_today());
        assert_eq!(range_picker(1).today(), fixed_today());
    }
}
