//! Day-level month grid.
//!
//! Builds the calendar popup for one month: day count, leading blank cells,
//! and which projects hold a meeting on each day.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use shared::{DayCell, MonthGrid, Project};
use tracing::debug;

use super::dates::parse_calendar_date;
use super::error::FiscalError;

fn first_of_month(calendar_month: u32, calendar_year: i32) -> Result<NaiveDate, FiscalError> {
    if calendar_month > 11 {
        return Err(FiscalError::InvalidCalendarMonth { month: calendar_month });
    }
    NaiveDate::from_ymd_opt(calendar_year, calendar_month + 1, 1).ok_or_else(|| FiscalError::InvalidDate {
        value: format!("{:04}-{:02}-01", calendar_year, calendar_month + 1),
    })
}

/// Number of days in a 0-based calendar month.
///
/// Computed as "day 0 of the next month", i.e. the day before the 1st of
/// the following month, so leap Februaries come out as 29.
pub fn days_in_month(calendar_month: u32, calendar_year: i32) -> Result<u32, FiscalError> {
    let first = first_of_month(calendar_month, calendar_year)?;
    let (next_year, next_month) = if calendar_month == 11 {
        (calendar_year + 1, 1)
    } else {
        (calendar_year, calendar_month + 2)
    };
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|next_first| next_first.pred_opt())
        .ok_or_else(|| FiscalError::InvalidDate {
            value: first.to_string(),
        })?;
    Ok(last_day.day())
}

/// Weekday of the 1st of the month (0 = Sunday .. 6 = Saturday).
pub fn first_weekday_of_month(calendar_month: u32, calendar_year: i32) -> Result<u32, FiscalError> {
    Ok(first_of_month(calendar_month, calendar_year)?.weekday().num_days_from_sunday())
}

/// Whether `date` lies in the inclusive range `start..=end`.
///
/// Both bounds are truncated to calendar dates first, so a meeting that
/// ends at midnight of a day still covers that whole day.
pub fn is_date_in_range(date: NaiveDate, start: &str, end: &str) -> Result<bool, FiscalError> {
    let start_date = parse_calendar_date(start)?;
    let end_date = parse_calendar_date(end)?;
    Ok(date >= start_date && date <= end_date)
}

/// Same as [`is_date_in_range`] for a timestamp; the time of day is ignored.
pub fn is_datetime_in_range(at: NaiveDateTime, start: &str, end: &str) -> Result<bool, FiscalError> {
    is_date_in_range(at.date(), start, end)
}

/// Build every day of the month with the projects meeting on it.
///
/// Projects without a complete meeting window never appear.
///
/// # Errors
///
/// Returns [`FiscalError`] for an out-of-range month or a project carrying
/// a malformed meeting date.
pub fn build_month_grid(
    calendar_month: u32,
    calendar_year: i32,
    projects: &[Project],
) -> Result<MonthGrid, FiscalError> {
    let days_in_month = days_in_month(calendar_month, calendar_year)?;
    let first_weekday = first_weekday_of_month(calendar_month, calendar_year)?;

    // Parse each meeting window once, not once per day.
    let mut windows: Vec<(NaiveDate, NaiveDate, &Project)> = Vec::new();
    for project in projects {
        if let Some((start, end)) = project.meeting_dates() {
            windows.push((parse_calendar_date(start)?, parse_calendar_date(end)?, project));
        }
    }

    let mut days = Vec::with_capacity(days_in_month as usize);
    for day in 1..=days_in_month {
        let date = NaiveDate::from_ymd_opt(calendar_year, calendar_month + 1, day).ok_or_else(|| {
            FiscalError::InvalidDate {
                value: format!("{:04}-{:02}-{:02}", calendar_year, calendar_month + 1, day),
            }
        })?;
        let covering: Vec<Project> = windows
            .iter()
            .filter(|(start, end, _)| date >= *start && date <= *end)
            .map(|(_, _, project)| (*project).clone())
            .collect();

        days.push(DayCell {
            day,
            date,
            has_event: !covering.is_empty(),
            projects: covering,
        });
    }

    debug!(
        "Built grid for {:04}-{:02}: {} days, first weekday {}, {} meeting windows",
        calendar_year,
        calendar_month + 1,
        days_in_month,
        first_weekday,
        windows.len()
    );

    Ok(MonthGrid {
        calendar_month,
        calendar_year,
        days_in_month,
        first_weekday,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ProjectGroup, ProjectStatus};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_test_project(id: &str, start: Option<&str>, end: Option<&str>) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            group: ProjectGroup::Administration,
            budget: 1000.0,
            start_month: 5,
            color: "bg-blue-600".to_string(),
            status: ProjectStatus::NotStarted,
            meeting_start_date: start.map(str::to_string),
            meeting_end_date: end.map(str::to_string),
            vehicle: None,
            chairman: None,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(0, 2025).unwrap(), 31); // January
        assert_eq!(days_in_month(3, 2025).unwrap(), 30); // April
        assert_eq!(days_in_month(1, 2023).unwrap(), 28); // February (non-leap)
        assert_eq!(days_in_month(1, 2024).unwrap(), 29); // February (leap)
        assert_eq!(days_in_month(1, 1900).unwrap(), 28);
        assert_eq!(days_in_month(1, 2000).unwrap(), 29);
        assert_eq!(days_in_month(11, 2024).unwrap(), 31); // December rolls into next year
    }

    #[test]
    fn test_days_in_month_rejects_bad_month() {
        assert_eq!(
            days_in_month(12, 2024).unwrap_err(),
            FiscalError::InvalidCalendarMonth { month: 12 }
        );
    }

    #[test]
    fn test_first_weekday_of_month() {
        // March 1st 2024 was a Friday
        assert_eq!(first_weekday_of_month(2, 2024).unwrap(), 5);
        // September 1st 2024 was a Sunday
        assert_eq!(first_weekday_of_month(8, 2024).unwrap(), 0);
        assert!(first_weekday_of_month(12, 2024).is_err());
    }

    #[test]
    fn test_is_date_in_range_inclusive() {
        let (start, end) = ("2024-03-10", "2024-03-20");
        assert!(is_date_in_range(date(2024, 3, 15), start, end).unwrap());
        assert!(is_date_in_range(date(2024, 3, 10), start, end).unwrap());
        assert!(is_date_in_range(date(2024, 3, 20), start, end).unwrap());
        assert!(!is_date_in_range(date(2024, 3, 21), start, end).unwrap());
        assert!(!is_date_in_range(date(2024, 3, 9), start, end).unwrap());
    }

    #[test]
    fn test_range_ending_at_midnight_covers_whole_day() {
        let afternoon = date(2024, 3, 20).and_hms_opt(15, 30, 0).unwrap();
        assert!(is_datetime_in_range(afternoon, "2024-03-10", "2024-03-20T00:00:00").unwrap());

        let late_night = date(2024, 3, 20).and_hms_opt(23, 59, 59).unwrap();
        assert!(is_datetime_in_range(late_night, "2024-03-20", "2024-03-20").unwrap());
    }

    #[test]
    fn test_is_date_in_range_malformed() {
        assert!(matches!(
            is_date_in_range(date(2024, 3, 15), "garbage", "2024-03-20"),
            Err(FiscalError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_build_month_grid() {
        let projects = vec![
            create_test_project("a", Some("2024-03-05"), Some("2024-03-07")),
            create_test_project("b", Some("2024-03-07"), Some("2024-03-07")),
            create_test_project("c", None, None),
        ];

        let grid = build_month_grid(2, 2024, &projects).unwrap();
        assert_eq!(grid.days_in_month, 31);
        assert_eq!(grid.days.len(), 31);
        assert_eq!(grid.first_weekday, 5);
        assert_eq!(grid.days[0].day, 1);
        assert_eq!(grid.days[0].date, date(2024, 3, 1));

        assert!(!grid.days[3].has_event);
        assert!(grid.days[4].has_event);
        assert_eq!(grid.days[4].projects.len(), 1);

        let day_7 = &grid.days[6];
        assert!(day_7.has_event);
        let ids: Vec<&str> = day_7.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(!grid.days[7].has_event);
        assert!(grid.days[7].projects.is_empty());
    }

    #[test]
    fn test_build_month_grid_spanning_months() {
        let projects = vec![create_test_project("a", Some("2024-02-27"), Some("2024-03-02"))];
        let grid = build_month_grid(1, 2024, &projects).unwrap();
        assert_eq!(grid.days.len(), 29);
        let covered: Vec<u32> = grid.days.iter().filter(|d| d.has_event).map(|d| d.day).collect();
        assert_eq!(covered, vec![27, 28, 29]);
    }

    #[test]
    fn test_build_month_grid_ignores_dangling_range() {
        let projects = vec![create_test_project("a", Some("2024-03-05"), None)];
        let grid = build_month_grid(2, 2024, &projects).unwrap();
        assert!(grid.days.iter().all(|d| !d.has_event));
    }

    #[test]
    fn test_build_month_grid_rejects_malformed_dates() {
        let projects = vec![create_test_project("a", Some("2024-03-xx"), Some("2024-03-07"))];
        assert!(build_month_grid(2, 2024, &projects).is_err());
    }
}
