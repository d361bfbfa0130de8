use shared::{CreateProjectRequest, MonthMode, Project, COLOR_OPTIONS, DEFAULT_COLOR};

use crate::domain::dates::{format_calendar_date, parse_calendar_date, parse_date_range};
use crate::domain::error::FiscalError;
use crate::domain::fiscal_calendar::FISCAL_MONTHS;
use crate::domain::month_lock::MonthAssignment;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("Project name cannot be empty")]
    EmptyName,
    #[error("Budget must be a non-negative number, got {0}")]
    InvalidBudget(f64),
    #[error("Start month {0} is outside the fiscal year (0-11)")]
    StartMonthOutOfRange(u32),
    #[error("Meeting start and end dates must be given together")]
    IncompleteMeetingRange,
    #[error("Invalid meeting date: {0}")]
    InvalidMeetingDate(String),
    #[error("Meeting end date {end} is before start date {start}")]
    MeetingEndsBeforeStart { start: String, end: String },
    #[error("Unknown project color: {0}")]
    UnknownColor(String),
}

impl From<FiscalError> for ProjectValidationError {
    fn from(error: FiscalError) -> Self {
        match error {
            FiscalError::InvalidDateRange { start, end } => {
                ProjectValidationError::MeetingEndsBeforeStart { start, end }
            }
            FiscalError::InvalidDate { value } => ProjectValidationError::InvalidMeetingDate(value),
            other => ProjectValidationError::InvalidMeetingDate(other.to_string()),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Rewrite an accepted date as plain `YYYY-MM-DD`, dropping any time of day.
fn canonical_date(value: String) -> Result<String, ProjectValidationError> {
    parse_calendar_date(&value)
        .map(format_calendar_date)
        .map_err(|_| ProjectValidationError::InvalidMeetingDate(value))
}

fn is_known_color(color: &str) -> bool {
    COLOR_OPTIONS.iter().any(|option| option.background == color)
}

/// Check the invariants every stored project must hold.
pub fn validate_project(project: &Project) -> Result<(), ProjectValidationError> {
    if project.name.trim().is_empty() {
        return Err(ProjectValidationError::EmptyName);
    }
    if !project.budget.is_finite() || project.budget < 0.0 {
        return Err(ProjectValidationError::InvalidBudget(project.budget));
    }
    if project.start_month >= FISCAL_MONTHS {
        return Err(ProjectValidationError::StartMonthOutOfRange(project.start_month));
    }

    if !is_known_color(&project.color) {
        return Err(ProjectValidationError::UnknownColor(project.color.clone()));
    }

    match (project.meeting_start_date.as_deref(), project.meeting_end_date.as_deref()) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) => {
            parse_date_range(start, end)?;
            Ok(())
        }
        _ => Err(ProjectValidationError::IncompleteMeetingRange),
    }
}

/// Build a project from form input.
///
/// When a meeting start date is present the start month is derived from
/// it and the requested month is ignored. Meeting dates are stored as
/// `YYYY-MM-DD` whatever time suffix the form sent.
pub fn project_from_request(
    id: String,
    request: CreateProjectRequest,
) -> Result<(Project, MonthMode), ProjectValidationError> {
    let meeting_start_date = blank_to_none(request.meeting_start_date)
        .map(canonical_date)
        .transpose()?;
    let meeting_end_date = blank_to_none(request.meeting_end_date)
        .map(canonical_date)
        .transpose()?;

    let assignment = MonthAssignment::from_fields(request.start_month, meeting_start_date.as_deref())
        .map_err(|_| match meeting_start_date.as_deref() {
            Some(date) => ProjectValidationError::InvalidMeetingDate(date.to_string()),
            None => ProjectValidationError::StartMonthOutOfRange(request.start_month),
        })?;

    let project = Project {
        id,
        name: request.name.trim().to_string(),
        group: request.group,
        budget: request.budget,
        start_month: assignment.month(),
        color: blank_to_none(request.color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        status: request.status,
        meeting_start_date,
        meeting_end_date,
        vehicle: blank_to_none(request.vehicle),
        chairman: blank_to_none(request.chairman),
    };

    validate_project(&project)?;
    Ok((project, assignment.mode()))
}
