//! # In-Memory Project Repository
//!
//! Keeps the collection in process memory. Used when no external backend is
//! configured, and by the service tests.

use anyhow::Result;
use async_trait::async_trait;
use shared::Project;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::ProjectStorage;

#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with `projects`
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(RwLock::new(projects)),
        }
    }
}

#[async_trait]
impl ProjectStorage for InMemoryProjectRepository {
    async fn load_projects(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().await.clone();
        debug!("Loaded {} projects from memory", projects.len());
        Ok(projects)
    }

    async fn save_projects(&self, projects: &[Project]) -> Result<()> {
        *self.projects.write().await = projects.to_vec();
        debug!("Saved {} projects to memory", projects.len());
        Ok(())
    }
}
