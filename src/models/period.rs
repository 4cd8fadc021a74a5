//! Bi-monthly budgeting periods
//!
//! Every month is split into two periods: the 1st through the 15th and the
//! 16th through the last day of the month. A `Period` is never persisted; it
//! is recomputed from a reference date on every request.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last day that belongs to the first half of a month
const FIRST_HALF_LAST_DAY: u32 = 15;

/// Which half of the month a period covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodHalf {
    /// The 1st through the 15th
    First,
    /// The 16th through the last day of the month
    Second,
}

/// A bi-monthly budgeting window with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Period {
    /// The period containing `date`
    ///
    /// Day 1-15 yields `[1st 00:00:00, 15th 23:59:59]`; day 16 onwards yields
    /// `[16th 00:00:00, last-day 23:59:59]`.
    pub fn containing(date: NaiveDate) -> Self {
        let (year, month) = (date.year(), date.month());
        let (first_day, last_day) = if date.day() <= FIRST_HALF_LAST_DAY {
            (1, FIRST_HALF_LAST_DAY)
        } else {
            (FIRST_HALF_LAST_DAY + 1, last_day_of_month(year, month))
        };

        Self {
            start: at_time(year, month, first_day, NaiveTime::MIN),
            end: at_time(year, month, last_day, end_of_day()),
        }
    }

    /// The period containing the given timestamp
    pub fn containing_timestamp(timestamp: NaiveDateTime) -> Self {
        Self::containing(timestamp.date())
    }

    /// The period containing the local current date
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// First instant of the period (00:00:00)
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant of the period (23:59:59)
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn half(&self) -> PeriodHalf {
        if self.start.day() == 1 {
            PeriodHalf::First
        } else {
            PeriodHalf::Second
        }
    }

    /// Check if a timestamp falls within this period (both ends inclusive)
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Human-readable label, e.g. `1st–15th Jan 2025` or `16th–31st Jan 2025`
    ///
    /// The closing-day suffix is "st" only for the 31st and "th" for every
    /// other day, so February reads `16th–28th` and April `16th–30th`.
    pub fn label(&self) -> String {
        let month = self.start.format("%b");
        let year = self.start.year();
        match self.half() {
            PeriodHalf::First => format!("1st–15th {} {}", month, year),
            PeriodHalf::Second => {
                let last_day = self.end.day();
                let suffix = if last_day == 31 { "st" } else { "th" };
                format!("16th–{}{} {} {}", last_day, suffix, month, year)
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bounds of the period containing `date`
pub fn period_bounds(date: NaiveDate) -> Period {
    Period::containing(date)
}

/// Label of the period containing `date`
pub fn period_label(date: NaiveDate) -> String {
    Period::containing(date).label()
}

/// Last calendar day of a month: the day before the 1st of the following
/// month, rolling December into January of the next year.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn at_time(year: i32, month: u32, day: u32, time: NaiveTime) -> NaiveDateTime {
    // Callers only pass days that exist in the month
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or(NaiveDate::MIN)
        .and_time(time)
}
