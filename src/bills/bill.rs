use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::recurrence::RecurrenceRule;
use crate::errors::BillError;

/// Whether money flows out of or into the user's pocket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillType {
    Payable,
    Receivable,
}

/// One concrete, dated occurrence of a payable or receivable obligation.
///
/// A bill with a recurrence rule other than [`RecurrenceRule::None`] is the
/// root of a series; generated members point back at it through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: Category,
    pub kind: BillType,
    pub is_paid: bool,
    pub reminder_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl Bill {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
        category: Category,
        kind: BillType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            due_date,
            category,
            kind,
            is_paid: false,
            reminder_days: 1,
            notes: None,
            recurrence: RecurrenceRule::None,
            recurrence_end: None,
            parent_id: None,
        }
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule, end: Option<NaiveDate>) -> Self {
        self.recurrence = rule;
        self.recurrence_end = end;
        self
    }

    pub fn with_reminder_days(mut self, days: u32) -> Self {
        self.reminder_days = days;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The date a reminder would fire, `reminder_days` before the due date.
    /// Derived only; nothing in this crate schedules or delivers it.
    pub fn notification_date(&self) -> NaiveDate {
        self.due_date - Duration::days(self.reminder_days as i64)
    }

    /// True when this bill belongs to a recurring series, either as a
    /// generated member or as the series root.
    pub fn is_series_member(&self) -> bool {
        self.parent_id.is_some() || self.recurrence != RecurrenceRule::None
    }

    /// The id of this bill's series root: its parent when generated,
    /// otherwise itself.
    pub fn series_root(&self) -> Uuid {
        self.parent_id.unwrap_or(self.id)
    }
}

/// Parses an ISO-8601 calendar date at the input boundary, failing fast on
/// anything unparseable. Downstream code works with valid [`NaiveDate`]s only.
pub fn parse_date(raw: &str) -> Result<NaiveDate, BillError> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|_| BillError::InvalidDate(raw.to_string()))
}
