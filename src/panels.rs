//! Month panel generation and navigation.
//!
//! A panel is one rendered month grid. The generator lays out `count`
//! consecutive months ending at the anchor month; prev/next navigation
//! shifts every panel's month offset in lockstep.

use chrono::{Datelike, NaiveDateTime};

/// One visible month panel.
///
/// `month` is a 0-based offset from January of `year` and is deliberately
/// left unnormalized: navigation can push it outside `0..12`, and
/// [`PanelDescriptor::calendar`] is the single place where the overflow
/// is rolled into the year. `first`/`last` flag the ends of the strip for
/// UI chrome such as disabling the previous-month control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDescriptor {
    pub year: i32,
    pub month: i32,
    pub first: bool,
    pub last: bool,
}

impl PanelDescriptor {
    /// The calendar position of this panel as `(year, month0)`, with the
    /// raw month offset rolled across year boundaries.
    pub fn calendar(&self) -> (i32, u32) {
        let months = i64::from(self.year) * 12 + i64::from(self.month);
        (months.div_euclid(12) as i32, months.rem_euclid(12) as u32)
    }
}

/// Generate the panel strip for an anchor date.
///
/// Panel `i` shows the month `count - 1 - i` months before the anchor
/// month, so the strip runs oldest first and the anchor month lands on
/// the last panel. A non-positive count yields an empty strip.
pub fn build_panels(anchor: NaiveDateTime, count: i64) -> Vec<PanelDescriptor> {
    let mut panels = Vec::new();

    for i in 0..count {
        panels.push(PanelDescriptor {
            first: i == 0,
            last: i == count - 1,
            year: anchor.year(),
            month: anchor.month0() as i32 + i as i32 - (count as i32 - 1),
        });
    }

    panels
}

/// Shift every panel's month by `delta` (prev/next navigation).
pub fn shift_panels(panels: &mut [PanelDescriptor], delta: i32) {
    for panel in panels {
        panel.month += delta;
    }
}
