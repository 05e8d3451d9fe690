use crate::types::PeriodName;

/// Selection lifecycle events, broadcast to every registered observer.
///
/// Broadcasts are synchronous and fire-and-forget: listeners get the
/// affected period and re-query the picker for anything else they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// A first click armed a range selection on `period`. Dependent UI
    /// typically reacts by locking the other period's calendar.
    SelectionStarted { period: PeriodName },
    /// A second click committed the range on `period`.
    SelectionEnded { period: PeriodName },
}

/// The popup container seam. The picker only ever asks it to close,
/// which it does after a committing selection.
pub trait Popup {
    fn close(&mut self);
}

pub(crate) type EventObserver = Box<dyn FnMut(&PickerEvent)>;
