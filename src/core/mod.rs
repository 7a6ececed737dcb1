mod calendar;
mod contribution;
mod engine;
mod overrides;
mod series;
mod status;
mod types;

pub use calendar::{
    MonthLabel, add_months, first_of_month, generate_monthly_labels, month_label,
    months_between_inclusive, months_until,
};
pub use contribution::{required_monthly_contribution, to_monthly_equivalent};
pub use engine::{SERIES_PALETTE, project_goals, series_color, summarize_goal, summarize_goals};
pub use overrides::{
    ContributionInput, DEFAULT_SLIDER_PERCENT, GoalOverrides, MAX_SLIDER_PERCENT,
    ResolvedContribution, clamp_slider_percent, resolve_contribution,
};
pub use series::{actual_series, simulated_series};
pub use status::{classify, contribution_ratio, projected_months};
pub use types::{
    ChartDataset, ContributionSource, DatasetKind, Goal, GoalId, GoalSummary, Period,
    ProjectedMonths, ProjectionChart, ProjectionStatus, SimulationConfig,
};
