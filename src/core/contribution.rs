use chrono::NaiveDate;

use super::calendar::months_until;
use super::types::{Goal, Period};

/// Level monthly saving needed to reach the target by the deadline.
///
/// A deadline in the current month or earlier makes the whole remaining
/// balance due now.
pub fn required_monthly_contribution(goal: &Goal, as_of: NaiveDate) -> f64 {
    let remaining = goal.remaining();
    let months = months_until(as_of, goal.target_date);
    if months > 0 {
        remaining / f64::from(months)
    } else {
        remaining
    }
}

pub fn to_monthly_equivalent(amount: f64, period: Period) -> f64 {
    match period {
        Period::Monthly => amount,
        Period::Biweekly | Period::Weekly => amount * period.periods_per_year() / 12.0,
    }
}
