use super::calendar::MonthLabel;
use super::types::Goal;

/// Straight line from the current balance to the target across the labels.
pub fn actual_series(goal: &Goal, labels: &[MonthLabel]) -> Vec<f64> {
    let n = labels.len();
    if n <= 1 {
        return vec![goal.target_amount];
    }

    let start = goal.current_amount;
    let end = goal.target_amount;
    let last = n - 1;
    (0..n)
        .map(|i| {
            if i == last {
                end
            } else {
                start + (end - start) * (i as f64 / last as f64)
            }
        })
        .collect()
}

/// Additive saving of `monthly_contribution` per label, saturating at the target.
///
/// The series never decreases. A goal that already holds more than its target
/// stays flat at its current balance.
pub fn simulated_series(goal: &Goal, labels: &[MonthLabel], monthly_contribution: f64) -> Vec<f64> {
    let step = if monthly_contribution.is_finite() {
        monthly_contribution.max(0.0)
    } else {
        0.0
    };

    let mut data = Vec::with_capacity(labels.len());
    let mut value = goal.current_amount;
    for i in 0..labels.len() {
        if i > 0 {
            value = (value + step).min(goal.target_amount).max(value);
        }
        data.push(value);
    }
    data
}
