//! Calendar-date strings at the engine boundary.
//!
//! Dates are exchanged as `YYYY-MM-DD`. Anything after a `T` (time of day,
//! offset) is dropped before parsing so comparisons happen at day
//! granularity.

use chrono::NaiveDate;

use super::error::FiscalError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date, truncating any time-of-day component.
///
/// The date part must be zero-padded `YYYY-MM-DD`; `2024-3-5` is rejected.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, FiscalError> {
    let invalid = || FiscalError::InvalidDate {
        value: value.to_string(),
    };
    let date_part = value.trim().split('T').next().unwrap_or_default();
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| invalid())?;
    if format_calendar_date(date) != date_part {
        return Err(invalid());
    }
    Ok(date)
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an inclusive date range, rejecting one that ends before it starts.
pub fn parse_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), FiscalError> {
    let start_date = parse_calendar_date(start)?;
    let end_date = parse_calendar_date(end)?;
    if end_date < start_date {
        return Err(FiscalError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start_date, end_date))
}
