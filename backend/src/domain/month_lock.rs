//! Start-month assignment for the project form.
//!
//! A project's fiscal month is either chosen freely (no meeting date) or
//! derived from its meeting start date. The two are never independently
//! editable: while locked, choosing a month is rejected, and clearing the
//! meeting date unlocks the month at its last derived value.

use chrono::NaiveDate;
use shared::MonthMode;

use super::dates::{format_calendar_date, parse_calendar_date};
use super::error::FiscalError;
use super::fiscal_calendar::{calendar_date_to_fiscal_month, FISCAL_MONTHS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthAssignment {
    Free { month: u32 },
    LockedToDate { date: NaiveDate, month: u32 },
}

impl MonthAssignment {
    /// A user-chosen month with no meeting date.
    pub fn free(month: u32) -> Result<Self, FiscalError> {
        if month >= FISCAL_MONTHS {
            return Err(FiscalError::InvalidFiscalMonth { index: month });
        }
        Ok(MonthAssignment::Free { month })
    }

    /// A month derived from the meeting start date.
    pub fn locked_to(date: NaiveDate) -> Self {
        MonthAssignment::LockedToDate {
            date,
            month: calendar_date_to_fiscal_month(date),
        }
    }

    /// Starting state for a form opened on existing (or default) fields.
    pub fn from_fields(start_month: u32, meeting_start_date: Option<&str>) -> Result<Self, FiscalError> {
        match meeting_start_date.filter(|d| !d.trim().is_empty()) {
            Some(date) => Ok(Self::locked_to(parse_calendar_date(date)?)),
            None => Self::free(start_month),
        }
    }

    pub fn month(&self) -> u32 {
        match self {
            MonthAssignment::Free { month } | MonthAssignment::LockedToDate { month, .. } => *month,
        }
    }

    pub fn mode(&self) -> MonthMode {
        match self {
            MonthAssignment::Free { .. } => MonthMode::Free,
            MonthAssignment::LockedToDate { .. } => MonthMode::LockedToDate,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, MonthAssignment::LockedToDate { .. })
    }

    /// Set or clear the meeting start date.
    pub fn set_meeting_start(self, date: Option<&str>) -> Result<Self, FiscalError> {
        match date.filter(|d| !d.trim().is_empty()) {
            Some(date) => Ok(Self::locked_to(parse_calendar_date(date)?)),
            None => Ok(MonthAssignment::Free { month: self.month() }),
        }
    }

    /// Pick a month by hand.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::MonthLocked`] while a meeting date drives the
    /// month, or [`FiscalError::InvalidFiscalMonth`] for an index outside
    /// 0..=11.
    pub fn choose_month(self, month: u32) -> Result<Self, FiscalError> {
        match self {
            MonthAssignment::LockedToDate { date, .. } => Err(FiscalError::MonthLocked {
                date: format_calendar_date(date),
            }),
            MonthAssignment::Free { .. } => Self::free(month),
        }
    }
}
