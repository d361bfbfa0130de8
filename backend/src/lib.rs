//! # Budget Tracker Backend
//!
//! Fiscal-calendar scheduling and budget aggregation for projects planned
//! across an October–September fiscal year.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (month timeline, calendar popup, drag and drop)
//!     ↓
//! Domain Layer (ProjectService → pure engine functions)
//!     ↓
//! Storage Layer (ProjectStorage implementations)
//! ```
//!
//! The engine functions (`fiscal_calendar`, `day_grid`, `budget_aggregator`,
//! `rescheduler`) are stateless and safe to call from anywhere.
//! [`ProjectService`] is the single writer for the project collection.

pub mod config;
pub mod domain;
pub mod logging;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub use config::{ConfigError, EngineConfig, DEFAULT_CUMULATIVE_TARGETS};
pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub project_service: ProjectService,
}

/// Initialize the backend against `storage` and load the stored projects
pub async fn initialize_backend(storage: Arc<dyn ProjectStorage>, config: EngineConfig) -> Result<AppState> {
    info!("Setting up project service");
    let project_service = ProjectService::initialize(storage, config).await?;

    info!("Setting up application state");
    Ok(AppState { project_service })
}
