use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    Goal, GoalId, GoalSummary, MAX_SLIDER_PERCENT, Period, ProjectionChart, SimulationConfig,
    project_goals, summarize_goals,
};
use crate::error::{PlannerError, PlannerResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliPeriod {
    Monthly,
    Biweekly,
    Weekly,
}

impl From<CliPeriod> for Period {
    fn from(value: CliPeriod) -> Self {
        match value {
            CliPeriod::Monthly => Period::Monthly,
            CliPeriod::Biweekly => Period::Biweekly,
            CliPeriod::Weekly => Period::Weekly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPeriod {
    Monthly,
    #[serde(alias = "bi-weekly", alias = "fortnightly")]
    Biweekly,
    Weekly,
}

impl From<ApiPeriod> for Period {
    fn from(value: ApiPeriod) -> Self {
        match value {
            ApiPeriod::Monthly => Period::Monthly,
            ApiPeriod::Biweekly => Period::Biweekly,
            ApiPeriod::Weekly => Period::Weekly,
        }
    }
}

/// A plan document: the goal records plus this cycle's simulation settings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    #[serde(default, alias = "as_of")]
    as_of: Option<String>,
    #[serde(default)]
    goals: Vec<GoalPayload>,
    #[serde(default)]
    simulation: SimulationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalPayload {
    id: GoalId,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "target_amount")]
    target_amount: f64,
    #[serde(default, alias = "target_date")]
    target_date: Option<String>,
    #[serde(default, alias = "current_amount")]
    current_amount: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationPayload {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    period: Option<ApiPeriod>,
    #[serde(default, alias = "selected_goal_ids")]
    selected_goal_ids: Option<Vec<GoalId>>,
    #[serde(default)]
    overrides: Vec<OverridePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverridePayload {
    #[serde(alias = "goal_id")]
    goal_id: GoalId,
    #[serde(default, alias = "typed_amount")]
    typed_amount: Option<f64>,
    #[serde(default, alias = "slider_percent")]
    slider_percent: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub as_of: NaiveDate,
    pub goals: Vec<Goal>,
    pub config: SimulationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub as_of: String,
    pub period: Period,
    pub simulation_enabled: bool,
    pub chart: Option<ProjectionChart>,
    pub goals: Vec<GoalSummary>,
}

#[derive(Debug, Parser)]
#[command(
    name = "savings-planner",
    version,
    about = "Project savings goals against their deadlines"
)]
pub struct Cli {
    /// JSON plan file. Reads stdin when omitted or "-".
    pub input: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD). Falls back to the plan's asOf, then today.
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Contribution period for typed amounts, overriding the plan.
    #[arg(long, value_enum)]
    pub period: Option<CliPeriod>,

    /// Force simulation on.
    #[arg(long, conflicts_with = "no_simulate")]
    pub simulate: bool,

    /// Force simulation off.
    #[arg(long)]
    pub no_simulate: bool,

    #[arg(long)]
    pub pretty: bool,
}

pub fn run_cli(cli: Cli) -> PlannerResult<String> {
    let raw = read_input(cli.input.as_deref())?;
    let payload = serde_json::from_str::<PlanPayload>(&raw)?;
    let mut request = build_plan(payload, Local::now().date_naive())?;
    apply_cli_overrides(&cli, &mut request);

    let response = build_response(&request);
    info!(
        as_of = %response.as_of,
        goals = response.goals.len(),
        charted = response.chart.is_some(),
        "plan projected"
    );
    render(&response, cli.pretty)
}

fn read_input(path: Option<&Path>) -> PlannerResult<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn apply_cli_overrides(cli: &Cli, request: &mut PlanRequest) {
    if let Some(as_of) = cli.as_of {
        request.as_of = as_of;
    }
    if let Some(period) = cli.period {
        request.config.period = period.into();
    }
    if cli.simulate {
        request.config.enabled = true;
    }
    if cli.no_simulate {
        request.config.enabled = false;
    }
}

/// Validates a plan document into engine inputs.
///
/// `today` is used when the plan carries no `asOf`. Selection and override
/// entries for unknown goals are dropped with a warning.
pub fn build_plan(payload: PlanPayload, today: NaiveDate) -> PlannerResult<PlanRequest> {
    let as_of = match payload.as_of.as_deref() {
        Some(raw) => parse_date("asOf", raw)?,
        None => today,
    };

    let mut seen = BTreeSet::new();
    let mut goals = Vec::with_capacity(payload.goals.len());
    for (index, goal) in payload.goals.into_iter().enumerate() {
        if !seen.insert(goal.id) {
            return Err(PlannerError::DuplicateGoalId(goal.id));
        }
        let target_date = match goal.target_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                parse_date(&format!("goals[{index}].targetDate"), raw)?
            }
            _ => return Err(PlannerError::MissingTargetDate { id: goal.id }),
        };
        goals.push(Goal::new(
            goal.id,
            &goal.name,
            goal.target_amount,
            target_date,
            goal.current_amount,
        )?);
    }

    let simulation = payload.simulation;
    let mut config = SimulationConfig {
        enabled: simulation.enabled,
        period: simulation.period.map(Period::from).unwrap_or_default(),
        ..SimulationConfig::default()
    };
    match simulation.selected_goal_ids {
        Some(ids) => config.selected_goal_ids = ids.into_iter().collect(),
        None => config.select_all(&goals),
    }

    for entry in simulation.overrides {
        if let Some(percent) = entry.slider_percent {
            if !percent.is_finite() || !(0.0..=MAX_SLIDER_PERCENT).contains(&percent) {
                return Err(PlannerError::SliderOutOfRange {
                    id: entry.goal_id,
                    percent,
                });
            }
            config.overrides.set_slider_percent(entry.goal_id, percent);
        }
        if let Some(amount) = entry.typed_amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PlannerError::InvalidTypedAmount {
                    id: entry.goal_id,
                    amount,
                });
            }
            config.overrides.set_typed_amount(entry.goal_id, Some(amount));
        }
    }

    let dropped = config.retain_goals(&goals);
    if !dropped.is_empty() {
        warn!(?dropped, "discarding simulation state for unknown goals");
    }
    debug!(goals = goals.len(), %as_of, "plan validated");

    Ok(PlanRequest {
        as_of,
        goals,
        config,
    })
}

fn parse_date(field: &str, raw: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| PlannerError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

pub fn build_response(request: &PlanRequest) -> PlanResponse {
    PlanResponse {
        as_of: request.as_of.format("%Y-%m-%d").to_string(),
        period: request.config.period,
        simulation_enabled: request.config.enabled,
        chart: project_goals(&request.goals, &request.config, request.as_of),
        goals: summarize_goals(&request.goals, &request.config, request.as_of),
    }
}

pub fn render(response: &PlanResponse, pretty: bool) -> PlannerResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(json)
}

#[cfg(test)]
fn plan_from_json(json: &str, today: NaiveDate) -> PlannerResult<PlanRequest> {
    let payload = serde_json::from_str::<PlanPayload>(json)?;
    build_plan(payload, today)
}
