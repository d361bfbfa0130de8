//! # Domain Module
//!
//! Business logic for the fiscal-year project tracker.
//!
//! ## Module Organization
//!
//! - **fiscal_calendar**: fiscal month index ↔ calendar month/year, month labels
//! - **dates**: `YYYY-MM-DD` parsing and formatting at the boundary
//! - **day_grid**: day counts, weekday offsets, and the per-day meeting grid
//! - **budget_aggregator**: monthly and cumulative budget against the target curve
//! - **rescheduler**: moving a meeting window into a new fiscal month
//! - **month_lock**: whether a project's month is chosen or follows its meeting date
//! - **project_service**: the stateful collection owner that applies all of the above
//!
//! Everything except `project_service` is a pure function of its arguments:
//! no clock reads, no shared state, no I/O. The reference date is always
//! passed in explicitly.

pub mod budget_aggregator;
pub mod dates;
pub mod day_grid;
pub mod error;
pub mod fiscal_calendar;
pub mod models;
pub mod month_lock;
pub mod project_service;
pub mod rescheduler;

pub use budget_aggregator::*;
pub use dates::*;
pub use day_grid::*;
pub use error::FiscalError;
pub use fiscal_calendar::*;
pub use models::project::*;
pub use month_lock::*;
pub use project_service::*;
pub use rescheduler::*;
