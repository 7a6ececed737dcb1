use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::calendar::MonthLabel;
use super::overrides::GoalOverrides;
use crate::error::{PlannerError, PlannerResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of a savings goal as supplied by the goal store.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub current_amount: f64,
}

impl Goal {
    /// Builds a goal, rejecting records that must never reach the engine.
    pub fn new(
        id: GoalId,
        name: &str,
        target_amount: f64,
        target_date: NaiveDate,
        current_amount: f64,
    ) -> PlannerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyName { id });
        }
        if !target_amount.is_finite() {
            return Err(PlannerError::NonFiniteAmount {
                id,
                field: "target amount",
            });
        }
        if target_amount <= 0.0 {
            return Err(PlannerError::NonPositiveTarget {
                id,
                amount: target_amount,
            });
        }
        if !current_amount.is_finite() {
            return Err(PlannerError::NonFiniteAmount {
                id,
                field: "current amount",
            });
        }
        if current_amount < 0.0 {
            return Err(PlannerError::NegativeCurrent {
                id,
                amount: current_amount,
            });
        }

        Ok(Self {
            id,
            name: name.to_string(),
            target_amount,
            target_date,
            current_amount,
        })
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
}

impl Period {
    pub fn periods_per_year(self) -> f64 {
        match self {
            Period::Monthly => 12.0,
            Period::Biweekly => 26.0,
            Period::Weekly => 52.0,
        }
    }
}

/// Inputs for one computation cycle. Owned by the caller and passed in whole.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub enabled: bool,
    pub period: Period,
    pub selected_goal_ids: BTreeSet<GoalId>,
    pub overrides: GoalOverrides,
}

impl SimulationConfig {
    pub fn select_all(&mut self, goals: &[Goal]) {
        self.selected_goal_ids = goals.iter().map(|goal| goal.id).collect();
    }

    pub fn is_selected(&self, id: GoalId) -> bool {
        self.selected_goal_ids.contains(&id)
    }

    /// Drops selection and override state for a goal that left the working set.
    pub fn forget_goal(&mut self, id: GoalId) {
        self.selected_goal_ids.remove(&id);
        self.overrides.forget(id);
    }

    /// Prunes every id that no longer names a goal. Returns the dropped ids.
    pub fn retain_goals(&mut self, goals: &[Goal]) -> Vec<GoalId> {
        let live: BTreeSet<GoalId> = goals.iter().map(|goal| goal.id).collect();
        let mut dropped: BTreeSet<GoalId> = self
            .selected_goal_ids
            .difference(&live)
            .copied()
            .collect();
        dropped.extend(self.overrides.ids().filter(|id| !live.contains(id)));

        for id in &dropped {
            self.forget_goal(*id);
        }
        dropped.into_iter().collect()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionSource {
    Typed,
    Slider,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ProjectionStatus {
    Behind,
    Tight,
    #[serde(rename = "On track")]
    OnTrack,
    Ahead,
}

impl ProjectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectionStatus::Behind => "Behind",
            ProjectionStatus::Tight => "Tight",
            ProjectionStatus::OnTrack => "On track",
            ProjectionStatus::Ahead => "Ahead",
        }
    }
}

impl fmt::Display for ProjectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Months needed to close the remaining gap at the simulated pace.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProjectedMonths {
    Within(u32),
    Unreachable,
}

impl ProjectedMonths {
    pub fn months(self) -> Option<u32> {
        match self {
            ProjectedMonths::Within(months) => Some(months),
            ProjectedMonths::Unreachable => None,
        }
    }
}

impl Serialize for ProjectedMonths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProjectedMonths::Within(months) => serializer.serialize_u32(*months),
            ProjectedMonths::Unreachable => serializer.serialize_str("unreachable"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Actual,
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub goal_id: GoalId,
    pub label: String,
    pub kind: DatasetKind,
    pub color: &'static str,
    pub dashed: bool,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionChart {
    pub labels: Vec<MonthLabel>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub goal_id: GoalId,
    pub name: String,
    pub required_monthly: f64,
    pub months_remaining: u32,
    pub source: ContributionSource,
    pub slider_percent: f64,
    /// Typed per-period amount, or the slider-derived monthly figure.
    pub entered_amount: f64,
    pub simulated_monthly: f64,
    pub ratio: f64,
    pub status: ProjectionStatus,
    pub projected_months: ProjectedMonths,
    pub finishes_early: bool,
    pub goal_met: bool,
}
