//! Rolling training load accumulation.
//!
//! Sums session load over trailing calendar windows (7 and 30 days) ending on
//! each session's own date. Windows depend only on dates: sessions on the same
//! day always see each other, and rest days do not shrink the window.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days in the short (weekly) window.
pub const WEEK_WINDOW_DAYS: u32 = 7;

/// Days in the long (monthly) window.
pub const MONTH_WINDOW_DAYS: u32 = 30;

/// Rolling load values for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingLoad {
    /// Load of the session itself.
    pub load: f64,
    /// Sum of load over the trailing 7 days.
    pub rolling_7d: f64,
    /// Sum of load over the trailing 30 days.
    pub rolling_30d: f64,
}

/// Rolling load calculator for a single athlete's history.
pub struct TrainingLoadCalculator {
    week_days: u32,
    month_days: u32,
}

impl TrainingLoadCalculator {
    /// Create with the standard 7/30 day windows.
    pub fn new() -> Self {
        Self {
            week_days: WEEK_WINDOW_DAYS,
            month_days: MONTH_WINDOW_DAYS,
        }
    }

    /// Calculate rolling loads for one athlete.
    ///
    /// `history` holds `(date, load)` pairs in any order; the result is in the
    /// same order as the input.
    pub fn calculate_history(&self, history: &[(NaiveDate, f64)]) -> Vec<RollingLoad> {
        if history.is_empty() {
            return Vec::new();
        }

        let window = DatedLoads::new(history);

        history
            .iter()
            .map(|&(date, load)| RollingLoad {
                load,
                rolling_7d: window.trailing_sum(date, self.week_days),
                rolling_30d: window.trailing_sum(date, self.month_days),
            })
            .collect()
    }

    /// Sum of load in the `days`-long window ending on `date` (inclusive).
    pub fn window_sum(&self, history: &[(NaiveDate, f64)], date: NaiveDate, days: u32) -> f64 {
        DatedLoads::new(history).trailing_sum(date, days)
    }
}

impl Default for TrainingLoadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads sorted by date, searched by binary search for window bounds.
struct DatedLoads {
    dates: Vec<NaiveDate>,
    loads: Vec<f64>,
}

impl DatedLoads {
    fn new(history: &[(NaiveDate, f64)]) -> Self {
        let mut sorted = history.to_vec();
        sorted.sort_by_key(|(date, _)| *date);
        let (dates, loads) = sorted.into_iter().unzip();
        Self { dates, loads }
    }

    /// Sum of loads dated in `[end - (days - 1), end]`.
    ///
    /// A window reaching past the earliest representable date starts there.
    fn trailing_sum(&self, end: NaiveDate, days: u32) -> f64 {
        if days == 0 {
            return 0.0;
        }

        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);
        let hi = self.dates.partition_point(|d| *d <= end);
        let lo = self.dates.partition_point(|d| *d < start);

        if hi <= lo {
            0.0
        } else {
            self.loads[lo..hi].iter().sum()
        }
    }
}
