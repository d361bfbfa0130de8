use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project ID in format: "project::<uuid v4>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Organizational group that owns the activity
    pub group: ProjectGroup,
    /// Budget amount in baht (non-negative)
    pub budget: f64,
    /// Fiscal month index, 0 = October .. 11 = September
    pub start_month: u32,
    /// Display color tag (e.g. "bg-blue-600")
    pub color: String,
    pub status: ProjectStatus,
    /// Inclusive meeting window start (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_start_date: Option<String>,
    /// Inclusive meeting window end (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_end_date: Option<String>,
    /// Official vehicle and driver assigned to the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    /// Person presiding over the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chairman: Option<String>,
}

impl Project {
    /// Generate a fresh, unique project ID
    pub fn generate_id() -> String {
        format!("project::{}", uuid::Uuid::new_v4())
    }

    /// The meeting window, only when both ends are present.
    ///
    /// A half-filled window is treated as no window at all.
    pub fn meeting_dates(&self) -> Option<(&str, &str)> {
        match (self.meeting_start_date.as_deref(), self.meeting_end_date.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Some((start, end)),
            _ => None,
        }
    }
}

/// Fixed set of organizational groups a project can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectGroup {
    #[default]
    #[serde(rename = "ผู้อำนวยการศูนย์")]
    Director,
    #[serde(rename = "รองผู้อำนวยการศูนย์")]
    DeputyDirector,
    #[serde(rename = "ผู้ช่วยผู้อำนวยการศูนย์")]
    AssistantDirector,
    #[serde(rename = "กลุ่มอำนวยการ")]
    Administration,
    #[serde(rename = "กลุ่มขับเคลื่อนยุทธศาสตร์")]
    Strategy,
    #[serde(rename = "กลุ่มอนามัยแม่และเด็ก")]
    MaternalChildHealth,
    #[serde(rename = "กลุ่มอนามัยวัยเรียน")]
    SchoolAgeHealth,
    #[serde(rename = "กลุ่มอนามัยวัยรุ่นและเยาวชน")]
    YouthHealth,
    #[serde(rename = "กลุ่มอนามัยวัยทำงาน")]
    WorkingAgeHealth,
    #[serde(rename = "กลุ่มอนามัยผู้สูงอายุ")]
    ElderlyHealth,
    #[serde(rename = "กลุ่มอนามัยสิ่งแวดล้อม")]
    EnvironmentalHealth,
    #[serde(rename = "กลุ่มสุขาภิบาล")]
    Sanitation,
    #[serde(rename = "กลุ่มประเมินผลกระทบต่อสุขภาพ")]
    HealthImpactAssessment,
    #[serde(rename = "โรงพยาบาลศูนย์")]
    CenterHospital,
    #[serde(rename = "กลุ่มพัฒนาทักษะสมองเด็กปฐมวัย : ศูนย์ EF")]
    EarlyChildhoodEf,
    #[serde(rename = "กลุ่มสื่อสารประชาสัมพันธ์")]
    PublicRelations,
    #[serde(rename = "กลุ่มจัดการความรู้ วิจัย")]
    KnowledgeResearch,
    #[serde(rename = "กลุ่ม Training Center")]
    TrainingCenter,
    #[serde(rename = "สำนักงานเลขานุการ")]
    Secretariat,
    #[serde(rename = "โครงการพระราชดำริฯ")]
    RoyalInitiative,
}

impl ProjectGroup {
    /// All groups in master-list order
    pub const ALL: [ProjectGroup; 20] = [
        ProjectGroup::Director,
        ProjectGroup::DeputyDirector,
        ProjectGroup::AssistantDirector,
        ProjectGroup::Administration,
        ProjectGroup::Strategy,
        ProjectGroup::MaternalChildHealth,
        ProjectGroup::SchoolAgeHealth,
        ProjectGroup::YouthHealth,
        ProjectGroup::WorkingAgeHealth,
        ProjectGroup::ElderlyHealth,
        ProjectGroup::EnvironmentalHealth,
        ProjectGroup::Sanitation,
        ProjectGroup::HealthImpactAssessment,
        ProjectGroup::CenterHospital,
        ProjectGroup::EarlyChildhoodEf,
        ProjectGroup::PublicRelations,
        ProjectGroup::KnowledgeResearch,
        ProjectGroup::TrainingCenter,
        ProjectGroup::Secretariat,
        ProjectGroup::RoyalInitiative,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            ProjectGroup::Director => "ผู้อำนวยการศูนย์",
            ProjectGroup::DeputyDirector => "รองผู้อำนวยการศูนย์",
            ProjectGroup::AssistantDirector => "ผู้ช่วยผู้อำนวยการศูนย์",
            ProjectGroup::Administration => "กลุ่มอำนวยการ",
            ProjectGroup::Strategy => "กลุ่มขับเคลื่อนยุทธศาสตร์",
            ProjectGroup::MaternalChildHealth => "กลุ่มอนามัยแม่และเด็ก",
            ProjectGroup::SchoolAgeHealth => "กลุ่มอนามัยวัยเรียน",
            ProjectGroup::YouthHealth => "กลุ่มอนามัยวัยรุ่นและเยาวชน",
            ProjectGroup::WorkingAgeHealth => "กลุ่มอนามัยวัยทำงาน",
            ProjectGroup::ElderlyHealth => "กลุ่มอนามัยผู้สูงอายุ",
            ProjectGroup::EnvironmentalHealth => "กลุ่มอนามัยสิ่งแวดล้อม",
            ProjectGroup::Sanitation => "กลุ่มสุขาภิบาล",
            ProjectGroup::HealthImpactAssessment => "กลุ่มประเมินผลกระทบต่อสุขภาพ",
            ProjectGroup::CenterHospital => "โรงพยาบาลศูนย์",
            ProjectGroup::EarlyChildhoodEf => "กลุ่มพัฒนาทักษะสมองเด็กปฐมวัย : ศูนย์ EF",
            ProjectGroup::PublicRelations => "กลุ่มสื่อสารประชาสัมพันธ์",
            ProjectGroup::KnowledgeResearch => "กลุ่มจัดการความรู้ วิจัย",
            ProjectGroup::TrainingCenter => "กลุ่ม Training Center",
            ProjectGroup::Secretariat => "สำนักงานเลขานุการ",
            ProjectGroup::RoyalInitiative => "โครงการพระราชดำริฯ",
        }
    }
}

impl fmt::Display for ProjectGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Workflow status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "ยังไม่เริ่ม")]
    NotStarted,
    #[serde(rename = "กำลังดำเนินการ")]
    InProgress,
    #[serde(rename = "เสร็จสิ้น")]
    Completed,
    #[serde(rename = "เสนอโครงการ")]
    Proposed,
    #[serde(rename = "ขออนุมัติดำเนินกิจกรรม")]
    AwaitingApproval,
    #[serde(rename = "ยื่นยืมเงิน")]
    AdvanceRequested,
    #[serde(rename = "ยื่นบันทึกกับพัสดุ")]
    ProcurementFiled,
    #[serde(rename = "เบิกจ่ายแล้ว")]
    Disbursed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 8] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Proposed,
        ProjectStatus::AwaitingApproval,
        ProjectStatus::AdvanceRequested,
        ProjectStatus::ProcurementFiled,
        ProjectStatus::Disbursed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "ยังไม่เริ่ม",
            ProjectStatus::InProgress => "กำลังดำเนินการ",
            ProjectStatus::Completed => "เสร็จสิ้น",
            ProjectStatus::Proposed => "เสนอโครงการ",
            ProjectStatus::AwaitingApproval => "ขออนุมัติดำเนินกิจกรรม",
            ProjectStatus::AdvanceRequested => "ยื่นยืมเงิน",
            ProjectStatus::ProcurementFiled => "ยื่นบันทึกกับพัสดุ",
            ProjectStatus::Disbursed => "เบิกจ่ายแล้ว",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable project color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub name: &'static str,
    /// Background class stored in [`Project::color`]
    pub background: &'static str,
    pub text: &'static str,
}

const fn color(name: &'static str, background: &'static str, text: &'static str) -> ColorOption {
    ColorOption { name, background, text }
}

pub const COLOR_OPTIONS: [ColorOption; 15] = [
    color("น้ำเงิน", "bg-blue-600", "text-white"),
    color("เขียว", "bg-green-600", "text-white"),
    color("ม่วง", "bg-purple-600", "text-white"),
    color("ส้ม", "bg-orange-600", "text-white"),
    color("ชมพู", "bg-pink-600", "text-white"),
    color("แดง", "bg-red-600", "text-white"),
    color("เหลือง", "bg-yellow-500", "text-gray-900"),
    color("ฟ้า", "bg-cyan-600", "text-white"),
    color("เทา", "bg-gray-600", "text-white"),
    color("น้ำเงินเข้ม", "bg-indigo-600", "text-white"),
    color("เขียวมรกต", "bg-emerald-600", "text-white"),
    color("เขียวมะนาว", "bg-lime-600", "text-white"),
    color("ม่วงอ่อน", "bg-violet-600", "text-white"),
    color("ชมพูบานเย็น", "bg-rose-600", "text-white"),
    color("น้ำตาล", "bg-amber-700", "text-white"),
];

pub const DEFAULT_COLOR: &str = "bg-blue-600";

/// The 12-month October–September window currently in view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    pub start_year: i32,
    pub end_year: i32,
}

impl FiscalYear {
    /// Fiscal year that begins in October of `start_year`
    pub fn starting(start_year: i32) -> Self {
        Self {
            start_year,
            end_year: start_year + 1,
        }
    }
}

/// A calendar month/year pair. `month` is 0-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonthYear {
    pub month: u32,
    pub year: i32,
}

/// One of the 12 months of a fiscal year, with display labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalMonth {
    /// 0 = October .. 11 = September
    pub index: u32,
    /// 0-based calendar month (0 = January)
    pub calendar_month: u32,
    pub calendar_year: i32,
    pub label: String,
    pub short_label: String,
    /// Two-digit year suffix in the label's era (e.g. "68")
    pub year_suffix: String,
}

/// Proposed meeting window after a month change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDates {
    pub meeting_start_date: Option<String>,
    pub meeting_end_date: Option<String>,
}

impl MeetingDates {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            meeting_start_date: Some(start.into()),
            meeting_end_date: Some(end.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meeting_start_date.is_none() && self.meeting_end_date.is_none()
    }
}

/// Budget progress for one fiscal month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudgetSummary {
    pub fiscal_month: u32,
    pub monthly_budget: f64,
    pub cumulative_budget: f64,
    pub cumulative_target_percent: f64,
    pub cumulative_actual_percent: f64,
}

/// A single day of a month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub has_event: bool,
    /// Projects whose meeting window covers this day
    pub projects: Vec<Project>,
}

/// Day-level view of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    /// 0-based calendar month (0 = January)
    pub calendar_month: u32,
    pub calendar_year: i32,
    pub days_in_month: u32,
    /// Weekday of day 1 (0 = Sunday), i.e. count of leading blank cells
    pub first_weekday: u32,
    pub days: Vec<DayCell>,
}

/// Calendar popup for a fiscal month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendarView {
    pub fiscal_month: FiscalMonth,
    pub grid: MonthGrid,
    /// Projects whose start month is this fiscal month
    pub projects_starting: Vec<Project>,
}

/// Header totals across the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub project_count: usize,
    pub total_budget: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectSortKey {
    /// Ascending by name
    Name,
    /// Largest budget first
    Budget,
    /// Ascending by fiscal start month
    #[default]
    StartMonth,
    /// Ascending by status label
    Status,
}

/// Request for the filtered, sorted project table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectListRequest {
    /// None lists every group
    pub group: Option<ProjectGroup>,
    pub sort_by: ProjectSortKey,
    /// Case-insensitive substring match on the project name
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// How a project's start month was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthMode {
    /// Month chosen by the user, no meeting date set
    Free,
    /// Month derived from the meeting start date
    LockedToDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub group: ProjectGroup,
    pub budget: f64,
    /// Ignored when a meeting start date is given
    pub start_month: u32,
    pub color: Option<String>,
    pub status: ProjectStatus,
    pub meeting_start_date: Option<String>,
    pub meeting_end_date: Option<String>,
    pub vehicle: Option<String>,
    pub chairman: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: CreateProjectRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project: Project,
    pub month_mode: MonthMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveProjectResponse {
    pub project: Project,
    /// False when the project already sat in the target month
    pub moved: bool,
}
