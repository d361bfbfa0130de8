//! Fiscal calendar arithmetic.
//!
//! The fiscal year runs October through September. Fiscal month index 0 is
//! October of the start year, index 11 is September of the end year.
//! Calendar months are 0-based throughout (0 = January), matching
//! [`chrono::Datelike::month0`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{CalendarMonthYear, FiscalMonth, FiscalYear};
use tracing::debug;

use super::error::FiscalError;

/// Number of months in a fiscal year
pub const FISCAL_MONTHS: u32 = 12;

/// Calendar month (0-based) that opens the fiscal year
const OCTOBER: u32 = 9;

/// Offset from the Gregorian to the Buddhist-era year
const BUDDHIST_ERA_OFFSET: i32 = 543;

// Tables below are indexed by fiscal month (October first).
const THAI_MONTHS: [&str; 12] = [
    "ตุลาคม", "พฤศจิกายน", "ธันวาคม", "มกราคม", "กุมภาพันธ์", "มีนาคม",
    "เมษายน", "พฤษภาคม", "มิถุนายน", "กรกฎาคม", "สิงหาคม", "กันยายน",
];

const THAI_MONTHS_SHORT: [&str; 12] = [
    "ต.ค.", "พ.ย.", "ธ.ค.", "ม.ค.", "ก.พ.", "มี.ค.",
    "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "October", "November", "December", "January", "February", "March",
    "April", "May", "June", "July", "August", "September",
];

const ENGLISH_MONTHS_SHORT: [&str; 12] = [
    "Oct", "Nov", "Dec", "Jan", "Feb", "Mar",
    "Apr", "May", "Jun", "Jul", "Aug", "Sep",
];

/// Language and era used for month labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthLabelLocale {
    /// Thai month names, Buddhist-era years
    #[default]
    Thai,
    /// English month names, Gregorian years
    English,
}

impl MonthLabelLocale {
    fn long_name(self, fiscal_index: usize) -> &'static str {
        match self {
            MonthLabelLocale::Thai => THAI_MONTHS[fiscal_index],
            MonthLabelLocale::English => ENGLISH_MONTHS[fiscal_index],
        }
    }

    fn short_name(self, fiscal_index: usize) -> &'static str {
        match self {
            MonthLabelLocale::Thai => THAI_MONTHS_SHORT[fiscal_index],
            MonthLabelLocale::English => ENGLISH_MONTHS_SHORT[fiscal_index],
        }
    }

    /// Year as displayed in this locale's era
    pub fn display_year(self, gregorian_year: i32) -> i32 {
        match self {
            MonthLabelLocale::Thai => gregorian_year + BUDDHIST_ERA_OFFSET,
            MonthLabelLocale::English => gregorian_year,
        }
    }

    fn year_suffix(self, gregorian_year: i32) -> String {
        format!("{:02}", self.display_year(gregorian_year).rem_euclid(100))
    }
}

/// Fiscal year containing `today`.
///
/// October through December open a new fiscal year; January through
/// September belong to the one that started the previous October.
pub fn current_fiscal_year(today: NaiveDate) -> FiscalYear {
    let start_year = if today.month0() >= OCTOBER {
        today.year()
    } else {
        today.year() - 1
    };
    FiscalYear::starting(start_year)
}

/// Resolve a fiscal month index to its calendar month and year.
///
/// # Errors
///
/// Returns [`FiscalError::InvalidFiscalMonth`] if `fiscal_index` is not in
/// 0..=11.
pub fn fiscal_month_to_calendar(
    fiscal_index: u32,
    fiscal_year: FiscalYear,
) -> Result<CalendarMonthYear, FiscalError> {
    if fiscal_index >= FISCAL_MONTHS {
        return Err(FiscalError::InvalidFiscalMonth { index: fiscal_index });
    }
    let resolved = if fiscal_index < 3 {
        CalendarMonthYear {
            month: fiscal_index + OCTOBER,
            year: fiscal_year.start_year,
        }
    } else {
        CalendarMonthYear {
            month: fiscal_index - 3,
            year: fiscal_year.end_year,
        }
    };
    Ok(resolved)
}

/// Fiscal month index for a 0-based calendar month.
///
/// # Errors
///
/// Returns [`FiscalError::InvalidCalendarMonth`] if `calendar_month` is not
/// in 0..=11.
pub fn calendar_month_to_fiscal_month(calendar_month: u32) -> Result<u32, FiscalError> {
    if calendar_month > 11 {
        return Err(FiscalError::InvalidCalendarMonth { month: calendar_month });
    }
    if calendar_month >= OCTOBER {
        Ok(calendar_month - OCTOBER)
    } else {
        Ok(calendar_month + 3)
    }
}

/// Fiscal month index a calendar date falls in.
pub fn calendar_date_to_fiscal_month(date: NaiveDate) -> u32 {
    let month = date.month0();
    if month >= OCTOBER {
        month - OCTOBER
    } else {
        month + 3
    }
}

/// The 12 months of `fiscal_year`, October first, with display labels.
pub fn enumerate_fiscal_months(fiscal_year: FiscalYear, locale: MonthLabelLocale) -> Vec<FiscalMonth> {
    (0..FISCAL_MONTHS as usize)
        .map(|index| {
            let (calendar_month, calendar_year) = if index < 3 {
                (index as u32 + OCTOBER, fiscal_year.start_year)
            } else {
                (index as u32 - 3, fiscal_year.end_year)
            };
            FiscalMonth {
                index: index as u32,
                calendar_month,
                calendar_year,
                label: locale.long_name(index).to_string(),
                short_label: locale.short_name(index).to_string(),
                year_suffix: locale.year_suffix(calendar_year),
            }
        })
        .collect()
}

/// Look up one labelled fiscal month.
///
/// # Errors
///
/// Returns [`FiscalError::InvalidFiscalMonth`] if `fiscal_index` is not in
/// 0..=11.
pub fn fiscal_month(
    fiscal_index: u32,
    fiscal_year: FiscalYear,
    locale: MonthLabelLocale,
) -> Result<FiscalMonth, FiscalError> {
    enumerate_fiscal_months(fiscal_year, locale)
        .into_iter()
        .nth(fiscal_index as usize)
        .ok_or(FiscalError::InvalidFiscalMonth { index: fiscal_index })
}

/// Banner text naming the fiscal year and its first and last months,
/// e.g. `ปีงบประมาณ 2569 (ต.ค. 68 - ก.ย. 69)`.
pub fn fiscal_year_label(fiscal_year: FiscalYear, locale: MonthLabelLocale) -> String {
    let first = locale.short_name(0);
    let last = locale.short_name(FISCAL_MONTHS as usize - 1);
    let start_suffix = locale.year_suffix(fiscal_year.start_year);
    let end_suffix = locale.year_suffix(fiscal_year.end_year);
    let year = locale.display_year(fiscal_year.end_year);

    let label = match locale {
        MonthLabelLocale::Thai => {
            format!("ปีงบประมาณ {year} ({first} {start_suffix} - {last} {end_suffix})")
        }
        MonthLabelLocale::English => {
            format!("Fiscal Year {year} ({first} {start_suffix} - {last} {end_suffix})")
        }
    };
    debug!("Fiscal year {}-{} labelled {:?}", fiscal_year.start_year, fiscal_year.end_year, label);
    label
}
