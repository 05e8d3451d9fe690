//! The date-picker controller.
//!
//! `DatePicker` owns the interactive state behind the widget: the
//! normalized bound value, the cached "today", the visible month panels,
//! the per-period in-progress selections and the current period. UI
//! events come in through the mutators (`select_date`,
//! `preview_selection`, `update_panels`, `set_current_period`); the
//! renderer reads back through the per-cell predicates.

pub mod events;
mod predicates;
mod selection;

#[cfg(test)]
pub mod testing;


pub use events::{PickerEvent, Popup};
pub use selection::InProgressSelection;

use std::cmp::Ordering;
use std::fmt;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, trace};

use crate::config::DatepickerConfig;
use crate::dates;
use crate::model::{self, BoundValue};
use crate::panels::{self, PanelDescriptor};
use crate::types::{Mode, PeriodName};

use events::EventObserver;
use selection::Selections;

pub struct DatePicker {
    config: DatepickerConfig,
    /// Cached at construction; a clock tick during a long-lived session
    /// does not move it.
    today: NaiveDateTime,
    value: BoundValue,
    /// Target of the next selection. Persists across re-renders.
    current_period: PeriodName,
    selections: Selections,
    panels: Vec<PanelDescriptor>,
    observers: Vec<EventObserver>,
    popup: Option<Box<dyn Popup>>,
}

impl DatePicker {
    pub fn new(config: DatepickerConfig) -> Self {
        let today = dates::midnight(Local::now().naive_local());
        Self::build(config, today)
    }

    fn build(config: DatepickerConfig, today: NaiveDateTime) -> Self {
        let mut picker = DatePicker {
            config,
            today,
            value: BoundValue::Unset,
            current_period: PeriodName::Base,
            selections: Selections::default(),
            panels: Vec::new(),
            observers: Vec::new(),
            popup: None,
        };
        picker.normalize_model();
        picker.rebuild_panels();
        picker
    }

    /// Pin the cached "today" (tests, deterministic hosts). Re-anchors
    /// the panel strip.
    pub fn with_today(mut self, today: NaiveDateTime) -> Self {
        self.today = dates::midnight(today);
        self.rebuild_panels();
        self
    }

    /// Seed the bound value at construction time.
    pub fn with_value(mut self, value: BoundValue) -> Self {
        self.value = value;
        self.resync();
        self
    }

    pub fn config(&self) -> &DatepickerConfig {
        &self.config
    }

    pub fn value(&self) -> &BoundValue {
        &self.value
    }

    pub fn today(&self) -> NaiveDateTime {
        self.today
    }

    pub fn panels(&self) -> &[PanelDescriptor] {
        &self.panels
    }

    pub fn current_period(&self) -> PeriodName {
        self.current_period
    }

    pub fn set_current_period(&mut self, period: PeriodName) {
        debug!("PERIOD: current period set to {:?}", period);
        self.current_period = period;
    }

    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    pub fn is_range(&self) -> bool {
        self.mode() == Mode::Range
    }

    /// Replace the bound value from the host side. Re-normalizes and
    /// re-paginates, like any other external mutation.
    pub fn set_value(&mut self, value: BoundValue) {
        self.value = value;
        self.resync();
    }

    /// The host's notification that it mutated the bound value out of
    /// band. Re-runs the normalizer and the panel generator so panels
    /// stay anchored to the new value.
    pub fn notify_external_model_changed(&mut self) {
        debug!("MODEL: external mutation reported, re-syncing");
        self.resync();
    }

    fn resync(&mut self) {
        self.normalize_model();
        self.rebuild_panels();
    }

    fn normalize_model(&mut self) {
        model::normalize(&mut self.value, self.config.mode());
    }

    fn rebuild_panels(&mut self) {
        let count = self.config.panels().unwrap_or(0);
        let anchor = self.panel_start();
        self.panels = panels::build_panels(anchor, count);
        trace!(
            "PANEL: rebuilt {} panel(s) anchored at {}",
            self.panels.len(),
            anchor.date()
        );
    }

    /// Shift every visible panel by `delta` months (prev/next controls).
    pub fn update_panels(&mut self, delta: i32) {
        debug!("PANEL: shifting strip by {}", delta);
        panels::shift_panels(&mut self.panels, delta);
    }

    /// The anchor date deciding which months the panel strip displays.
    fn panel_start(&self) -> NaiveDateTime {
        match self.mode() {
            Mode::Range => self.range_panel_start(),
            Mode::Single => self.value.as_single().unwrap_or(self.today),
        }
    }

    fn range_panel_start(&self) -> NaiveDateTime {
        let Some(range) = self.value.as_range() else {
            return self.today;
        };

        match (range.base.as_ref(), range.comparison.as_ref()) {
            // Later of the two committed ends; ties favor base.
            (Some(base), Some(comparison)) => {
                if dates::day_cmp(comparison.end, base.end) == Ordering::Greater {
                    comparison.end
                } else {
                    base.end
                }
            }
            (Some(base), None) => base.end,
            _ => self.today,
        }
    }

    /// Register a lifecycle observer. Observers are called synchronously
    /// on every broadcast, in registration order.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&PickerEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn attach_popup(&mut self, popup: Box<dyn Popup>) {
        self.popup = Some(popup);
    }

    pub(crate) fn broadcast(&mut self, event: PickerEvent) {
        trace!(
            "EVENT: broadcasting {:?} to {} observer(s)",
            event,
            self.observers.len()
        );
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    pub(crate) fn close_popup(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.close();
        }
    }
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("config", &self.config)
            .field("today", &self.today)
            .field("value", &self.value)
            .field("current_period", &self.current_period)
            .field("selections", &self.selections)
            .field("panels", &self.panels)
            .field("observers", &self.observers.len())
            .field("popup", &self.popup.is_some())
            .finish()
    }
}
