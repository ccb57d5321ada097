//! Period windows, totals, and grouping that feed list/calendar presenters.
//!
//! Pure queries over the in-memory collection; rendering lives with the host.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bill::{Bill, BillType};
use super::date_math;
use crate::errors::{BillError, Result};

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(BillError::InvalidDate(format!(
                "window end {} precedes start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The summary scopes the host can ask for. `All` places no date bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SummaryPeriod {
    All,
    Today,
    /// Sunday-through-Saturday week containing the reference date.
    Week,
    #[default]
    Month,
    Year,
}

impl SummaryPeriod {
    /// Resolves the period to a concrete window around the reference date.
    pub fn window(&self, reference: NaiveDate) -> Option<DateWindow> {
        match self {
            SummaryPeriod::All => None,
            SummaryPeriod::Today => Some(DateWindow::single_day(reference)),
            SummaryPeriod::Week => {
                let delta = reference.weekday().num_days_from_sunday() as i64;
                let start = reference - Duration::days(delta);
                DateWindow::new(start, start + Duration::days(6)).ok()
            }
            SummaryPeriod::Month => {
                let start = reference.with_day(1).unwrap();
                let end = start
                    + Duration::days(
                        date_math::days_in_month(reference.year(), reference.month()) as i64 - 1,
                    );
                DateWindow::new(start, end).ok()
            }
            SummaryPeriod::Year => DateWindow::new(
                NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap(),
            )
            .ok(),
        }
    }
}

/// Unpaid counts and totals for one bill type within a period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodSummary {
    pub unpaid_count: usize,
    pub unpaid_total: f64,
}

/// Summarizes the unpaid bills of `kind` whose due date falls inside the
/// window (every matching bill when the window is `None`).
pub fn summarize(bills: &[Bill], kind: BillType, window: Option<DateWindow>) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    for bill in bills {
        if bill.kind != kind || bill.is_paid {
            continue;
        }
        if let Some(window) = window {
            if !window.contains(bill.due_date) {
                continue;
            }
        }
        summary.unpaid_count += 1;
        summary.unpaid_total += bill.amount;
    }
    summary
}

/// Groups bills by due date for list and calendar views, ordered by date.
pub fn group_by_due_date<'a, I>(bills: I) -> BTreeMap<NaiveDate, Vec<&'a Bill>>
where
    I: IntoIterator<Item = &'a Bill>,
{
    let mut grouped: BTreeMap<NaiveDate, Vec<&Bill>> = BTreeMap::new();
    for bill in bills {
        grouped.entry(bill.due_date).or_default().push(bill);
    }
    grouped
}
