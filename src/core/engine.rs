use chrono::NaiveDate;
use tracing::debug;

use super::calendar::{first_of_month, generate_monthly_labels, months_until};
use super::overrides::resolve_contribution;
use super::series::{actual_series, simulated_series};
use super::status::{classify, contribution_ratio, projected_months};
use super::types::{
    ChartDataset, DatasetKind, Goal, GoalSummary, ProjectedMonths, ProjectionChart,
    SimulationConfig,
};

pub const SERIES_PALETTE: [&str; 7] = [
    "#2563EB", "#16A34A", "#DC2626", "#9333EA", "#F59E0B", "#0EA5E9", "#DB2777",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Builds the shared timeline and per-goal datasets for the selected goals.
///
/// Returns `None` when nothing is selected. Goals keep their input order and
/// colors follow their position among the selected goals.
pub fn project_goals(
    goals: &[Goal],
    config: &SimulationConfig,
    as_of: NaiveDate,
) -> Option<ProjectionChart> {
    let selected: Vec<&Goal> = goals
        .iter()
        .filter(|goal| config.is_selected(goal.id))
        .collect();
    let furthest_deadline = selected.iter().map(|goal| goal.target_date).max()?;

    let labels = generate_monthly_labels(first_of_month(as_of), furthest_deadline);
    debug!(
        selected = selected.len(),
        months = labels.len(),
        simulation = config.enabled,
        "projecting goals"
    );

    let per_goal = if config.enabled { 2 } else { 1 };
    let mut datasets = Vec::with_capacity(selected.len() * per_goal);
    for (index, goal) in selected.into_iter().enumerate() {
        let color = series_color(index);
        datasets.push(ChartDataset {
            goal_id: goal.id,
            label: format!("{} (actual)", goal.name),
            kind: DatasetKind::Actual,
            color,
            dashed: false,
            data: actual_series(goal, &labels),
        });

        if config.enabled {
            let input = config.overrides.input_for(goal.id);
            let resolved = resolve_contribution(goal, input, config.period, as_of);
            datasets.push(ChartDataset {
                goal_id: goal.id,
                label: format!("{} (sim)", goal.name),
                kind: DatasetKind::Simulated,
                color,
                dashed: true,
                data: simulated_series(goal, &labels, resolved.monthly),
            });
        }
    }

    Some(ProjectionChart { labels, datasets })
}

pub fn summarize_goal(goal: &Goal, config: &SimulationConfig, as_of: NaiveDate) -> GoalSummary {
    let input = config.overrides.input_for(goal.id);
    let resolved = resolve_contribution(goal, input, config.period, as_of);
    let ratio = contribution_ratio(resolved.monthly, resolved.required_monthly);
    let remaining = goal.remaining();
    let months_remaining = months_until(as_of, goal.target_date);
    let projected = projected_months(remaining, resolved.monthly);

    GoalSummary {
        goal_id: goal.id,
        name: goal.name.clone(),
        required_monthly: resolved.required_monthly,
        months_remaining,
        source: resolved.source,
        slider_percent: input.slider_percent(),
        entered_amount: resolved.entered_amount,
        simulated_monthly: resolved.monthly,
        ratio,
        status: classify(ratio),
        projected_months: projected,
        finishes_early: matches!(projected, ProjectedMonths::Within(months) if months < months_remaining),
        goal_met: remaining == 0.0,
    }
}

pub fn summarize_goals(
    goals: &[Goal],
    config: &SimulationConfig,
    as_of: NaiveDate,
) -> Vec<GoalSummary> {
    goals
        .iter()
        .map(|goal| summarize_goal(goal, config, as_of))
        .collect()
}
