//! Cumulative budget progress against the target curve.

use shared::{BudgetOverview, FiscalMonth, MonthlyBudgetSummary, Project};
use tracing::debug;

use super::fiscal_calendar::FISCAL_MONTHS;

/// Sum of every project's budget
pub fn total_budget(projects: &[Project]) -> f64 {
    projects.iter().map(|p| p.budget).sum()
}

/// Header totals for the project table
pub fn budget_overview(projects: &[Project]) -> BudgetOverview {
    BudgetOverview {
        project_count: projects.len(),
        total_budget: total_budget(projects),
    }
}

/// Per-month budget, running cumulative budget, and cumulative percentage
/// of the grand total alongside the target curve.
///
/// A single left-to-right scan over `fiscal_months`. With a zero grand total
/// every actual percentage is 0. Projects whose start month lies outside
/// 0..=11 count toward the grand total but toward no month.
pub fn summarize(
    projects: &[Project],
    fiscal_months: &[FiscalMonth],
    cumulative_targets: &[f64; FISCAL_MONTHS as usize],
) -> Vec<MonthlyBudgetSummary> {
    let grand_total = total_budget(projects);

    let mut monthly = [0.0_f64; FISCAL_MONTHS as usize];
    for project in projects {
        match monthly.get_mut(project.start_month as usize) {
            Some(bucket) => *bucket += project.budget,
            None => debug!(
                "Project {} has start month {} outside the fiscal year",
                project.id, project.start_month
            ),
        }
    }

    let mut cumulative_budget = 0.0;
    let summaries: Vec<MonthlyBudgetSummary> = fiscal_months
        .iter()
        .map(|month| {
            let index = month.index as usize;
            let monthly_budget = monthly.get(index).copied().unwrap_or(0.0);
            cumulative_budget += monthly_budget;
            let cumulative_actual_percent = if grand_total > 0.0 {
                cumulative_budget / grand_total * 100.0
            } else {
                0.0
            };
            MonthlyBudgetSummary {
                fiscal_month: month.index,
                monthly_budget,
                cumulative_budget,
                cumulative_target_percent: cumulative_targets.get(index).copied().unwrap_or(0.0),
                cumulative_actual_percent,
            }
        })
        .collect();

    debug!(
        "Summarized {} projects over {} months, total budget {:.2}",
        projects.len(),
        summaries.len(),
        grand_total
    );
    summaries
}
