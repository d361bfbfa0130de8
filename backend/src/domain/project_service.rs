//! Project collection service.
//!
//! Owns the in-memory project collection and its storage handle. Every
//! mutation takes the collection lock, builds the new collection, saves it,
//! and only then replaces the cached copy, so writes are serialized and a
//! failed save leaves the cache untouched. The read-side views call the pure
//! engine functions on a snapshot of the collection.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use shared::{
    BudgetOverview, CreateProjectRequest, DeleteProjectResponse, FiscalMonth, FiscalYear,
    MonthCalendarView, MonthlyBudgetSummary, MoveProjectResponse, Project, ProjectListRequest,
    ProjectListResponse, ProjectResponse, ProjectSortKey, UpdateProjectRequest,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::domain::budget_aggregator::{budget_overview, summarize};
use crate::domain::day_grid::build_month_grid;
use crate::domain::fiscal_calendar::{
    current_fiscal_year, enumerate_fiscal_months, fiscal_month, fiscal_month_to_calendar, fiscal_year_label,
};
use crate::domain::models::project::project_from_request;
use crate::domain::rescheduler::reschedule_project;
use crate::storage::ProjectStorage;

/// Sort by a text key in Thai dictionary order: case-insensitive at the
/// first level, with leading vowels (เ แ โ ใ ไ) ordered by the consonant
/// they precede.
fn sort_by_thai_collation<F>(projects: &mut [Project], key: F)
where
    F: for<'a> Fn(&'a Project) -> &'a str,
{
    match Collator::try_new(&locale!("th").into(), CollatorOptions::new()) {
        Ok(collator) => projects.sort_by(|a, b| collator.compare(key(a), key(b))),
        Err(error) => {
            warn!("Thai collation data unavailable, sorting by code point: {}", error);
            projects.sort_by(|a, b| key(a).cmp(key(b)));
        }
    }
}

/// Service for managing the project collection and its derived views
#[derive(Clone)]
pub struct ProjectService {
    storage: Arc<dyn ProjectStorage>,
    config: EngineConfig,
    targets: [f64; 12],
    projects: Arc<Mutex<Vec<Project>>>,
}

impl ProjectService {
    /// Create a service with an empty cache. Call [`ProjectService::reload`]
    /// to pull the stored collection.
    pub fn new(storage: Arc<dyn ProjectStorage>, config: EngineConfig) -> Result<Self> {
        let targets = config.target_curve().context("Invalid engine config")?;
        Ok(Self {
            storage,
            config,
            targets,
            projects: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Create a service and load the stored collection
    pub async fn initialize(storage: Arc<dyn ProjectStorage>, config: EngineConfig) -> Result<Self> {
        let service = Self::new(storage, config)?;
        service.reload().await?;
        Ok(service)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the cached collection with what storage holds
    pub async fn reload(&self) -> Result<usize> {
        let mut projects = self.projects.lock().await;
        let loaded = self.storage.load_projects().await.context("Failed to load projects")?;
        info!("Loaded {} projects from storage", loaded.len());
        *projects = loaded;
        Ok(projects.len())
    }

    async fn snapshot(&self) -> Vec<Project> {
        self.projects.lock().await.clone()
    }

    async fn commit(&self, cached: &mut Vec<Project>, updated: Vec<Project>) -> Result<()> {
        self.storage
            .save_projects(&updated)
            .await
            .context("Failed to save projects")?;
        *cached = updated;
        Ok(())
    }

    /// Get a project by ID
    pub async fn get_project(&self, project_id: &str) -> Option<Project> {
        self.projects
            .lock()
            .await
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }

    /// Filtered and sorted project table
    pub async fn list_projects(&self, request: ProjectListRequest) -> ProjectListResponse {
        let search = request
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut projects: Vec<Project> = self
            .snapshot()
            .await
            .into_iter()
            .filter(|p| request.group.map_or(true, |group| p.group == group))
            .filter(|p| search.as_ref().map_or(true, |s| p.name.to_lowercase().contains(s)))
            .collect();

        match request.sort_by {
            ProjectSortKey::Name => sort_by_thai_collation(&mut projects, |p| p.name.as_str()),
            ProjectSortKey::Budget => projects.sort_by(|a, b| b.budget.total_cmp(&a.budget)),
            ProjectSortKey::StartMonth => projects.sort_by_key(|p| p.start_month),
            ProjectSortKey::Status => sort_by_thai_collation(&mut projects, |p| p.status.label()),
        }

        ProjectListResponse { projects }
    }

    /// Create a new project
    pub async fn create_project(&self, request: CreateProjectRequest) -> Result<ProjectResponse> {
        info!("Creating project: name={}, budget={}", request.name, request.budget);

        let (project, month_mode) = project_from_request(Project::generate_id(), request)?;

        let mut cached = self.projects.lock().await;
        let mut updated = cached.clone();
        updated.push(project.clone());
        self.commit(&mut cached, updated).await?;

        info!("Created project {} in fiscal month {} ({:?})", project.id, project.start_month, month_mode);
        Ok(ProjectResponse { project, month_mode })
    }

    /// Replace an existing project's fields
    pub async fn update_project(&self, request: UpdateProjectRequest) -> Result<ProjectResponse> {
        info!("Updating project: {}", request.id);

        let mut cached = self.projects.lock().await;
        let position = cached
            .iter()
            .position(|p| p.id == request.id)
            .ok_or_else(|| anyhow::anyhow!("Project not found: {}", request.id))?;

        let (project, month_mode) = project_from_request(request.id, request.changes)?;

        let mut updated = cached.clone();
        updated[position] = project.clone();
        self.commit(&mut cached, updated).await?;

        info!("Updated project {} ({:?})", project.id, month_mode);
        Ok(ProjectResponse { project, month_mode })
    }

    /// Delete a project; reports whether it existed
    pub async fn delete_project(&self, project_id: &str) -> Result<DeleteProjectResponse> {
        info!("Deleting project: {}", project_id);

        let mut cached = self.projects.lock().await;
        if !cached.iter().any(|p| p.id == project_id) {
            warn!("Project not found: {}", project_id);
            return Ok(DeleteProjectResponse { deleted: false });
        }

        let updated: Vec<Project> = cached.iter().filter(|p| p.id != project_id).cloned().collect();
        self.commit(&mut cached, updated).await?;

        info!("Deleted project: {}", project_id);
        Ok(DeleteProjectResponse { deleted: true })
    }

    /// Move a project to another fiscal month, carrying its meeting window
    /// along. Dropping a project on its own month changes nothing.
    pub async fn move_project_to_month(
        &self,
        project_id: &str,
        target_month: u32,
        today: NaiveDate,
    ) -> Result<MoveProjectResponse> {
        let fiscal_year = current_fiscal_year(today);

        let mut cached = self.projects.lock().await;
        let position = cached
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| anyhow::anyhow!("Project not found: {}", project_id))?;

        let mut project = cached[position].clone();
        if project.start_month == target_month {
            return Ok(MoveProjectResponse { project, moved: false });
        }

        info!("Moving project {} from month {} to {}", project_id, project.start_month, target_month);
        reschedule_project(&project, target_month, fiscal_year)?.apply_to(&mut project);

        let mut updated = cached.clone();
        updated[position] = project.clone();
        self.commit(&mut cached, updated).await?;

        Ok(MoveProjectResponse { project, moved: true })
    }

    /// Labelled fiscal months for the fiscal year containing `today`
    pub fn fiscal_months(&self, today: NaiveDate) -> Vec<FiscalMonth> {
        enumerate_fiscal_months(current_fiscal_year(today), self.config.locale)
    }

    pub fn fiscal_year(&self, today: NaiveDate) -> FiscalYear {
        current_fiscal_year(today)
    }

    /// Footer banner for the fiscal year containing `today`
    pub fn fiscal_year_label(&self, today: NaiveDate) -> String {
        fiscal_year_label(current_fiscal_year(today), self.config.locale)
    }

    /// Budget progress row
    pub async fn budget_summary(&self, today: NaiveDate) -> Vec<MonthlyBudgetSummary> {
        let months = self.fiscal_months(today);
        summarize(&self.snapshot().await, &months, &self.targets)
    }

    pub async fn budget_overview(&self) -> BudgetOverview {
        budget_overview(&self.snapshot().await)
    }

    /// Calendar popup for one fiscal month
    pub async fn month_calendar(&self, fiscal_index: u32, today: NaiveDate) -> Result<MonthCalendarView> {
        let fiscal_year = current_fiscal_year(today);
        let calendar = fiscal_month_to_calendar(fiscal_index, fiscal_year)?;
        let month = fiscal_month(fiscal_index, fiscal_year, self.config.locale)?;

        let projects = self.snapshot().await;
        let grid = build_month_grid(calendar.month, calendar.year, &projects)
            .with_context(|| format!("Failed to build calendar for fiscal month {}", fiscal_index))?;
        let projects_starting = projects.into_iter().filter(|p| p.start_month == fiscal_index).collect();

        Ok(MonthCalendarView {
            fiscal_month: month,
            grid,
            projects_starting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryProjectRepository;
    use async_trait::async_trait;
    use shared::{MonthMode, ProjectGroup, ProjectStatus};

    fn today() -> NaiveDate {
        // Inside fiscal year 2024-2025
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
    }

    fn create_test_request(name: &str, budget: f64, start_month: u32) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.to_string(),
            group: ProjectGroup::Administration,
            budget,
            start_month,
            color: None,
            status: ProjectStatus::NotStarted,
            meeting_start_date: None,
            meeting_end_date: None,
            vehicle: None,
            chairman: None,
        }
    }

    fn create_dated_request(name: &str, start: &str, end: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            meeting_start_date: Some(start.to_string()),
            meeting_end_date: Some(end.to_string()),
            ..create_test_request(name, 1000.0, 0)
        }
    }

    async fn create_test_service() -> (ProjectService, InMemoryProjectRepository) {
        let repo = InMemoryProjectRepository::new();
        let service = ProjectService::initialize(Arc::new(repo.clone()), EngineConfig::default())
            .await
            .unwrap();
        (service, repo)
    }

    struct FailingStorage;

    #[async_trait]
    impl ProjectStorage for FailingStorage {
        async fn load_projects(&self) -> Result<Vec<Project>> {
            Ok(Vec::new())
        }

        async fn save_projects(&self, _projects: &[Project]) -> Result<()> {
            Err(anyhow::anyhow!("spreadsheet unreachable"))
        }
    }

    #[tokio::test]
    async fn test_create_project_persists() {
        let (service, repo) = create_test_service().await;

        let response = service.create_project(create_test_request("Workshop", 500.0, 3)).await.unwrap();
        assert_eq!(response.month_mode, MonthMode::Free);
        assert!(response.project.id.starts_with("project::"));

        let stored = repo.load_projects().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], response.project);
        assert_eq!(service.get_project(&response.project.id).await, Some(response.project));
    }

    #[tokio::test]
    async fn test_create_project_validation() {
        let (service, repo) = create_test_service().await;

        let result = service.create_project(create_test_request("", 500.0, 3)).await;
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));

        let result = service.create_project(create_dated_request("Bad", "2024-11-10", "2024-11-01")).await;
        assert!(result.unwrap_err().to_string().contains("before start date"));
        assert!(repo.load_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_project_locks_month_to_meeting_date() {
        let (service, _repo) = create_test_service().await;
        let response = service
            .create_project(create_dated_request("Seminar", "2025-02-03", "2025-02-04"))
            .await
            .unwrap();
        assert_eq!(response.month_mode, MonthMode::LockedToDate);
        assert_eq!(response.project.start_month, 4);
    }

    #[tokio::test]
    async fn test_update_project() {
        let (service, _repo) = create_test_service().await;
        let created = service.create_project(create_test_request("Workshop", 500.0, 3)).await.unwrap();

        let mut changes = create_test_request("Workshop (revised)", 750.0, 6);
        changes.status = ProjectStatus::InProgress;
        let updated = service
            .update_project(UpdateProjectRequest { id: created.project.id.clone(), changes })
            .await
            .unwrap();

        assert_eq!(updated.project.id, created.project.id);
        assert_eq!(updated.project.name, "Workshop (revised)");
        assert_eq!(updated.project.start_month, 6);
        assert_eq!(service.budget_overview().await.total_budget, 750.0);
    }

    #[tokio::test]
    async fn test_update_missing_project() {
        let (service, _repo) = create_test_service().await;
        let result = service
            .update_project(UpdateProjectRequest {
                id: "project::missing".to_string(),
                changes: create_test_request("X", 1.0, 0),
            })
            .await;
        assert!(result.unwrap_err().to_string().contains("Project not found"));
    }

    #[tokio::test]
    async fn test_delete_project() {
        let (service, repo) = create_test_service().await;
        let created = service.create_project(create_test_request("Workshop", 500.0, 3)).await.unwrap();

        assert!(service.delete_project(&created.project.id).await.unwrap().deleted);
        assert!(!service.delete_project(&created.project.id).await.unwrap().deleted);
        assert!(repo.load_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_move_project_reschedules_meeting() {
        let (service, repo) = create_test_service().await;
        let created = service
            .create_project(create_dated_request("Meeting", "2024-10-05", "2024-10-07"))
            .await
            .unwrap();
        assert_eq!(created.project.start_month, 0);

        let response = service.move_project_to_month(&created.project.id, 5, today()).await.unwrap();
        assert!(response.moved);
        assert_eq!(response.project.start_month, 5);
        assert_eq!(response.project.meeting_start_date.as_deref(), Some("2025-03-05"));
        assert_eq!(response.project.meeting_end_date.as_deref(), Some("2025-03-07"));

        let stored = repo.load_projects().await.unwrap();
        assert_eq!(stored[0], response.project);
    }

    #[tokio::test]
    async fn test_move_project_to_same_month_is_noop() {
        let (service, _repo) = create_test_service().await;
        let created = service.create_project(create_test_request("Workshop", 500.0, 3)).await.unwrap();

        let response = service.move_project_to_month(&created.project.id, 3, today()).await.unwrap();
        assert!(!response.moved);
        assert_eq!(response.project, created.project);
    }

    #[tokio::test]
    async fn test_move_project_errors() {
        let (service, _repo) = create_test_service().await;
        let created = service.create_project(create_test_request("Workshop", 500.0, 3)).await.unwrap();

        assert!(service.move_project_to_month("nope", 1, today()).await.is_err());
        assert!(service.move_project_to_month(&created.project.id, 12, today()).await.is_err());
        assert_eq!(service.get_project(&created.project.id).await.unwrap().start_month, 3);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_cache_untouched() {
        let service = ProjectService::initialize(Arc::new(FailingStorage), EngineConfig::default())
            .await
            .unwrap();
        let result = service.create_project(create_test_request("Workshop", 500.0, 3)).await;
        assert!(result.unwrap_err().to_string().contains("Failed to save projects"));
        assert_eq!(service.budget_overview().await.project_count, 0);
    }

    #[tokio::test]
    async fn test_list_projects_filter_and_sort() {
        let (service, _repo) = create_test_service().await;
        service.create_project(create_test_request("Charlie", 300.0, 1)).await.unwrap();
        service.create_project(create_test_request("alpha", 100.0, 7)).await.unwrap();
        let mut other_group = create_test_request("Bravo", 200.0, 4);
        other_group.group = ProjectGroup::Sanitation;
        service.create_project(other_group).await.unwrap();

        let names = |response: ProjectListResponse| -> Vec<String> {
            response.projects.into_iter().map(|p| p.name).collect()
        };

        let by_month = service.list_projects(ProjectListRequest::default()).await;
        assert_eq!(names(by_month), vec!["Charlie", "Bravo", "alpha"]);

        let by_budget = service
            .list_projects(ProjectListRequest { sort_by: ProjectSortKey::Budget, ..Default::default() })
            .await;
        assert_eq!(names(by_budget), vec!["Charlie", "Bravo", "alpha"]);

        let by_name = service
            .list_projects(ProjectListRequest { sort_by: ProjectSortKey::Name, ..Default::default() })
            .await;
        assert_eq!(names(by_name), vec!["alpha", "Bravo", "Charlie"]);

        let filtered = service
            .list_projects(ProjectListRequest {
                group: Some(ProjectGroup::Administration),
                ..Default::default()
            })
            .await;
        assert_eq!(names(filtered), vec!["Charlie", "alpha"]);

        let searched = service
            .list_projects(ProjectListRequest {
                search: Some("ALP".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(names(searched), vec!["alpha"]);
    }

    #[tokio::test]
    async fn test_list_projects_sorts_thai_names() {
        let (service, _repo) = create_test_service().await;
        for name in ["Bravo", "alpha", "เบิก", "กา", "ยา"] {
            service.create_project(create_test_request(name, 100.0, 0)).await.unwrap();
        }

        let by_name = service
            .list_projects(ProjectListRequest { sort_by: ProjectSortKey::Name, ..Default::default() })
            .await;
        let names: Vec<String> = by_name.projects.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["alpha", "Bravo", "กา", "เบิก", "ยา"]);
    }

    #[tokio::test]
    async fn test_list_projects_sorts_by_status_label() {
        let (service, _repo) = create_test_service().await;
        for (name, status) in [
            ("a", ProjectStatus::NotStarted),
            ("b", ProjectStatus::Disbursed),
            ("c", ProjectStatus::InProgress),
        ] {
            let mut request = create_test_request(name, 100.0, 0);
            request.status = status;
            service.create_project(request).await.unwrap();
        }

        let by_status = service
            .list_projects(ProjectListRequest { sort_by: ProjectSortKey::Status, ..Default::default() })
            .await;
        let statuses: Vec<ProjectStatus> = by_status.projects.into_iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![ProjectStatus::InProgress, ProjectStatus::Disbursed, ProjectStatus::NotStarted]
        );
    }

    #[tokio::test]
    async fn test_budget_summary() {
        let (service, _repo) = create_test_service().await;
        service.create_project(create_test_request("A", 100.0, 0)).await.unwrap();
        service.create_project(create_test_request("B", 200.0, 2)).await.unwrap();

        let summary = service.budget_summary(today()).await;
        assert_eq!(summary.len(), 12);
        assert_eq!(summary[2].cumulative_budget, 300.0);
        assert!((summary[2].cumulative_actual_percent - 100.0).abs() < 1e-9);
        assert_eq!(summary[0].cumulative_target_percent, 11.0);
    }

    #[tokio::test]
    async fn test_month_calendar() {
        let (service, _repo) = create_test_service().await;
        service
            .create_project(create_dated_request("Meeting", "2025-03-05", "2025-03-07"))
            .await
            .unwrap();
        service.create_project(create_test_request("Undated", 100.0, 5)).await.unwrap();

        let view = service.month_calendar(5, today()).await.unwrap();
        assert_eq!(view.fiscal_month.label, "มีนาคม");
        assert_eq!(view.grid.calendar_month, 2);
        assert_eq!(view.grid.calendar_year, 2025);
        assert_eq!(view.grid.days.len(), 31);
        assert!(view.grid.days[4].has_event);
        assert!(!view.grid.days[7].has_event);
        assert_eq!(view.projects_starting.len(), 2);

        assert!(service.month_calendar(12, today()).await.is_err());
    }

    #[tokio::test]
    async fn test_reload_picks_up_external_changes() {
        let (service, repo) = create_test_service().await;
        service.create_project(create_test_request("A", 100.0, 0)).await.unwrap();
        repo.save_projects(&[]).await.unwrap();

        assert_eq!(service.reload().await.unwrap(), 0);
        assert_eq!(service.budget_overview().await.project_count, 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            cumulative_targets: vec![50.0; 12],
            ..EngineConfig::default()
        };
        let result = ProjectService::new(Arc::new(InMemoryProjectRepository::new()), config);
        assert!(result.is_err());
    }

    #[test]
    fn test_fiscal_year_label() {
        let service = ProjectService::new(Arc::new(InMemoryProjectRepository::new()), EngineConfig::default()).unwrap();
        assert_eq!(service.fiscal_year(today()), FiscalYear::starting(2024));
        assert_eq!(service.fiscal_year_label(today()), "ปีงบประมาณ 2568 (ต.ค. 67 - ก.ย. 68)");
        assert_eq!(service.fiscal_months(today())[3].year_suffix, "68");
    }
}
