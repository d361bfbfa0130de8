//! Moves a project's meeting window into a new fiscal month.
//!
//! The day of month the user picked is kept for both ends of the window,
//! clamped to the last day of the target month. Each end is clamped on its
//! own, so a 30th..31st window moved into February becomes 28th..28th.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{FiscalYear, MeetingDates, Project};
use tracing::{debug, warn};

use super::dates::{format_calendar_date, parse_calendar_date};
use super::day_grid::days_in_month;
use super::error::FiscalError;
use super::fiscal_calendar::{fiscal_month_to_calendar, FISCAL_MONTHS};

/// Field changes to apply to a project moved to another month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMonthUpdate {
    pub start_month: u32,
    pub meeting: MeetingDates,
}

impl ProjectMonthUpdate {
    pub fn apply_to(self, project: &mut Project) {
        project.start_month = self.start_month;
        project.meeting_start_date = self.meeting.meeting_start_date;
        project.meeting_end_date = self.meeting.meeting_end_date;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Recompute a meeting window for `new_fiscal_month`.
///
/// A window missing either end comes back empty. Any failure while building
/// the new dates returns the original window unchanged.
pub fn reschedule(
    old_start: Option<&str>,
    old_end: Option<&str>,
    new_fiscal_month: u32,
    fiscal_year: FiscalYear,
) -> MeetingDates {
    let (start, end) = match (non_empty(old_start), non_empty(old_end)) {
        (Some(start), Some(end)) => (start, end),
        _ => return MeetingDates::none(),
    };

    match try_reschedule(start, end, new_fiscal_month, fiscal_year) {
        Ok(dates) => {
            debug!(
                "Rescheduled {}..{} to {:?}..{:?}",
                start, end, dates.meeting_start_date, dates.meeting_end_date
            );
            dates
        }
        Err(e) => {
            warn!("Keeping meeting dates {}..{} unchanged: {}", start, end, e);
            MeetingDates::new(start, end)
        }
    }
}

fn try_reschedule(
    start: &str,
    end: &str,
    new_fiscal_month: u32,
    fiscal_year: FiscalYear,
) -> Result<MeetingDates, FiscalError> {
    let target = fiscal_month_to_calendar(new_fiscal_month, fiscal_year)?;
    let start_day = parse_calendar_date(start)?.day();
    let end_day = parse_calendar_date(end)?.day();
    let max_day = days_in_month(target.month, target.year)?;

    let build = |day: u32| {
        let day = day.min(max_day);
        NaiveDate::from_ymd_opt(target.year, target.month + 1, day).ok_or_else(|| FiscalError::InvalidDate {
            value: format!("{:04}-{:02}-{:02}", target.year, target.month + 1, day),
        })
    };

    Ok(MeetingDates::new(
        format_calendar_date(build(start_day)?),
        format_calendar_date(build(end_day)?),
    ))
}

/// Month index and meeting window for `project` dropped on `target_month`.
///
/// # Errors
///
/// Returns [`FiscalError::InvalidFiscalMonth`] if `target_month` is not in
/// 0..=11. Date problems never error; see [`reschedule`].
pub fn reschedule_project(
    project: &Project,
    target_month: u32,
    fiscal_year: FiscalYear,
) -> Result<ProjectMonthUpdate, FiscalError> {
    if target_month >= FISCAL_MONTHS {
        return Err(FiscalError::InvalidFiscalMonth { index: target_month });
    }
    Ok(ProjectMonthUpdate {
        start_month: target_month,
        meeting: reschedule(
            project.meeting_start_date.as_deref(),
            project.meeting_end_date.as_deref(),
            target_month,
            fiscal_year,
        ),
    })
}
