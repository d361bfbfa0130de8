//! Error types for the fiscal calendar engine.

/// Contract violations raised by the fiscal calendar, date parsing and the
/// day grid. These indicate a caller bug, never a user-facing condition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FiscalError {
    /// Returned when a fiscal month index is outside 0..=11.
    #[error("invalid fiscal month index: {index} (must be 0..=11)")]
    InvalidFiscalMonth { index: u32 },

    /// Returned when a 0-based calendar month is outside 0..=11.
    #[error("invalid calendar month: {month} (must be 0..=11)")]
    InvalidCalendarMonth { month: u32 },

    /// Returned when a string is not a valid YYYY-MM-DD calendar date.
    #[error("invalid calendar date: {value:?}")]
    InvalidDate { value: String },

    /// Returned when a date range ends before it starts.
    #[error("invalid date range: {end} is before {start}")]
    InvalidDateRange { start: String, end: String },

    /// Returned when a month is chosen for a project whose month follows
    /// its meeting start date.
    #[error("fiscal month is locked to meeting date {date}")]
    MonthLocked { date: String },
}
