//! Reporting windows.
//!
//! Every window except [`Period::All`] is a lower bound only: it keeps the
//! expenses dated on or after its cutoff, so anything dated in the future is
//! always included.
use core::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ParsePeriodError;

/// Time window selector for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
    All,
}

impl Period {
    pub const VARIANTS: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::All];

    /// Lowercase name, as accepted by [`FromStr`] and used in file names.
    pub fn name(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::All => "all",
        }
    }

    /// How many days before `today` the window opens, `None` when unbounded.
    pub fn lookback_days(self) -> Option<u64> {
        match self {
            Period::Daily => Some(0),
            Period::Weekly => Some(7),
            Period::Monthly => Some(30),
            Period::All => None,
        }
    }

    /// Earliest date, inclusive, that falls in the window.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        self.lookback_days().map(|days| {
            today
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN)
        })
    }

    /// Whether `date` is inside the window as seen from `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.cutoff(today).is_none_or(|cutoff| date >= cutoff)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::VARIANTS
            .into_iter()
            .find(|period| period.name() == s)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}
