use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::contribution::{required_monthly_contribution, to_monthly_equivalent};
use super::types::{ContributionSource, Goal, GoalId, Period};

pub const DEFAULT_SLIDER_PERCENT: f64 = 100.0;
pub const MAX_SLIDER_PERCENT: f64 = 200.0;

/// Which input channel drives a goal's simulation.
///
/// `Typed` remembers the slider position it shadows so clearing the typed
/// amount hands control back to the slider where the user left it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContributionInput {
    Slider { percent: f64 },
    Typed { amount: f64, slider_percent: f64 },
}

impl Default for ContributionInput {
    fn default() -> Self {
        ContributionInput::Slider {
            percent: DEFAULT_SLIDER_PERCENT,
        }
    }
}

impl ContributionInput {
    pub fn slider_percent(self) -> f64 {
        match self {
            ContributionInput::Slider { percent } => percent,
            ContributionInput::Typed { slider_percent, .. } => slider_percent,
        }
    }

    pub fn typed_amount(self) -> Option<f64> {
        match self {
            ContributionInput::Slider { .. } => None,
            ContributionInput::Typed { amount, .. } => Some(amount),
        }
    }

    /// Moving the slider discards any typed amount.
    pub fn with_slider(self, percent: f64) -> Self {
        ContributionInput::Slider {
            percent: clamp_slider_percent(percent),
        }
    }

    /// `None` clears the typed field and reverts to the slider.
    pub fn with_typed(self, amount: Option<f64>) -> Self {
        let slider_percent = self.slider_percent();
        match amount {
            Some(amount) => ContributionInput::Typed {
                amount,
                slider_percent,
            },
            None => ContributionInput::Slider {
                percent: slider_percent,
            },
        }
    }
}

pub fn clamp_slider_percent(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, MAX_SLIDER_PERCENT)
    } else {
        DEFAULT_SLIDER_PERCENT
    }
}

/// Per-goal contribution inputs, keyed by goal id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalOverrides {
    inputs: BTreeMap<GoalId, ContributionInput>,
}

impl GoalOverrides {
    pub fn input_for(&self, id: GoalId) -> ContributionInput {
        self.inputs.get(&id).copied().unwrap_or_default()
    }

    pub fn set_slider_percent(&mut self, id: GoalId, percent: f64) {
        let next = self.input_for(id).with_slider(percent);
        self.inputs.insert(id, next);
    }

    pub fn set_typed_amount(&mut self, id: GoalId, amount: Option<f64>) {
        let next = self.input_for(id).with_typed(amount);
        self.inputs.insert(id, next);
    }

    pub fn forget(&mut self, id: GoalId) {
        self.inputs.remove(&id);
    }

    pub fn ids(&self) -> impl Iterator<Item = GoalId> + '_ {
        self.inputs.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContribution {
    pub source: ContributionSource,
    pub required_monthly: f64,
    /// The typed per-period amount, or the slider-derived monthly figure.
    pub entered_amount: f64,
    pub monthly: f64,
}

/// Applies input precedence: a typed amount wins, otherwise the slider scales
/// the required monthly contribution.
///
/// Typed amounts are in the active period's unit and get converted. The
/// slider is always a share of the monthly requirement, whatever the period.
pub fn resolve_contribution(
    goal: &Goal,
    input: ContributionInput,
    period: Period,
    as_of: NaiveDate,
) -> ResolvedContribution {
    let required_monthly = required_monthly_contribution(goal, as_of);
    match input {
        ContributionInput::Typed { amount, .. } => {
            let amount = if amount.is_finite() {
                amount.max(0.0)
            } else {
                0.0
            };
            ResolvedContribution {
                source: ContributionSource::Typed,
                required_monthly,
                entered_amount: amount,
                monthly: to_monthly_equivalent(amount, period),
            }
        }
        ContributionInput::Slider { percent } => {
            let monthly = required_monthly * (clamp_slider_percent(percent) / 100.0);
            ResolvedContribution {
                source: ContributionSource::Slider,
                required_monthly,
                entered_amount: monthly,
                monthly,
            }
        }
    }
}
