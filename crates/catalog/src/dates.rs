//! Calendar windows for date-filtered list queries.
//!
//! The upstream `dates` parameter takes an inclusive `start,end` pair of ISO
//! calendar dates. Constructors take `today` explicitly so tests (and
//! callers replaying a fixed day) stay deterministic; [`CatalogClient`]
//! passes the current UTC date.
//!
//! [`CatalogClient`]: crate::client::CatalogClient

use chrono::{Months, NaiveDate};

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window for "trending" lists: the month leading up to `today`.
    pub fn trailing_month(today: NaiveDate) -> Self {
        Self {
            start: today - Months::new(1),
            end: today,
        }
    }

    /// Window for "events" lists: the three months after `today`.
    pub fn next_quarter(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Months::new(3),
        }
    }

    /// Window for "upcoming"/"anticipated" lists: the year after `today`.
    pub fn next_year(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Months::new(12),
        }
    }

    /// Serializes to the upstream `dates` parameter (`YYYY-MM-DD,YYYY-MM-DD`).
    pub fn to_param(&self) -> String {
        format!(
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
