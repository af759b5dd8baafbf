//! Date-based period resolution
//!
//! Maps a calendar date onto the period whose window contains it. Only the
//! month and day matter; the year is ignored.

use chrono::NaiveDate;

use crate::calendar::{self, PERIOD_COUNT};
use crate::models::{MonthDay, Period};

/// Windows are tested in this order: Sadha first, then Kasa through Dhesta.
const RESOLUTION_ORDER: [usize; PERIOD_COUNT] = [11, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Period for a calendar date
pub fn resolve(date: NaiveDate) -> &'static Period {
    resolve_month_day(MonthDay::from_date(date))
}

/// Period for a month/day pair
pub fn resolve_month_day(day: MonthDay) -> &'static Period {
    resolve_in(calendar::all(), day)
}

/// Resolve against an arbitrary table.
///
/// When no window matches, the last period is returned. With a table that
/// passes [`calendar::validate_periods`] that branch is unreachable.
pub fn resolve_in(periods: &[Period; PERIOD_COUNT], day: MonthDay) -> &Period {
    RESOLUTION_ORDER
        .iter()
        .map(|&index| &periods[index])
        .find(|period| period.window.contains(day))
        .unwrap_or_else(|| {
            let last = &periods[PERIOD_COUNT - 1];
            tracing::warn!(
                "No mangsa window covers {}, defaulting to {}",
                day,
                last.display_name
            );
            last
        })
}
