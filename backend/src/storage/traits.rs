//! # Storage Traits
//!
//! Abstraction over where the project collection lives, so the domain layer
//! works the same against any backend.

use anyhow::Result;
use async_trait::async_trait;
use shared::Project;

/// Whole-collection load and save, matching the replace-everything
/// semantics of the spreadsheet backend
#[async_trait]
pub trait ProjectStorage: Send + Sync {
    /// Load the full project collection
    async fn load_projects(&self) -> Result<Vec<Project>>;

    /// Replace the stored collection with `projects`
    async fn save_projects(&self, projects: &[Project]) -> Result<()>;
}
