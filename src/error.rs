use thiserror::Error;

use crate::core::GoalId;

pub type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("goal {id}: name must not be empty")]
    EmptyName { id: GoalId },

    #[error("goal {id}: target amount must be > 0, got {amount}")]
    NonPositiveTarget { id: GoalId, amount: f64 },

    #[error("goal {id}: current amount cannot be negative, got {amount}")]
    NegativeCurrent { id: GoalId, amount: f64 },

    #[error("goal {id}: {field} must be a finite number")]
    NonFiniteAmount { id: GoalId, field: &'static str },

    #[error("goal {id}: target date is required")]
    MissingTargetDate { id: GoalId },

    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    #[error("duplicate goal id {0}")]
    DuplicateGoalId(GoalId),

    #[error("goal {id}: slider percent must be between 0 and 200, got {percent}")]
    SliderOutOfRange { id: GoalId, percent: f64 },

    #[error("goal {id}: typed amount must be a finite number >= 0, got {amount}")]
    InvalidTypedAmount { id: GoalId, amount: f64 },

    #[error("failed to read plan: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}
