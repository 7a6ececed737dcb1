use super::types::{ProjectedMonths, ProjectionStatus};

const TIGHT_RATIO: f64 = 0.7;
const ON_TRACK_RATIO: f64 = 1.0;
const AHEAD_RATIO: f64 = 1.2;

/// Simulated over required monthly contribution. A zero requirement divides by 1.
pub fn contribution_ratio(simulated_monthly: f64, required_monthly: f64) -> f64 {
    let divisor = if required_monthly == 0.0 || !required_monthly.is_finite() {
        1.0
    } else {
        required_monthly
    };
    simulated_monthly / divisor
}

pub fn classify(ratio: f64) -> ProjectionStatus {
    if !ratio.is_finite() || ratio < TIGHT_RATIO {
        ProjectionStatus::Behind
    } else if ratio < ON_TRACK_RATIO {
        ProjectionStatus::Tight
    } else if ratio <= AHEAD_RATIO {
        ProjectionStatus::OnTrack
    } else {
        ProjectionStatus::Ahead
    }
}

pub fn projected_months(remaining: f64, simulated_monthly: f64) -> ProjectedMonths {
    if simulated_monthly <= 0.0 || !simulated_monthly.is_finite() {
        return ProjectedMonths::Unreachable;
    }

    let months = (remaining.max(0.0) / simulated_monthly).ceil();
    if months.is_finite() && months <= f64::from(u32::MAX) {
        ProjectedMonths::Within(months as u32)
    } else {
        ProjectedMonths::Unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn boundaries_belong_to_documented_bands() {
        assert_eq!(classify(0.69), ProjectionStatus::Behind);
        assert_eq!(classify(0.7), ProjectionStatus::Tight);
        assert_eq!(classify(0.99), ProjectionStatus::Tight);
        assert_eq!(classify(1.0), ProjectionStatus::OnTrack);
        assert_eq!(classify(1.2), ProjectionStatus::OnTrack);
        assert_eq!(classify(1.21), ProjectionStatus::Ahead);
    }

    #[test]
    fn non_finite_ratios_are_behind() {
        assert_eq!(classify(f64::NAN), ProjectionStatus::Behind);
        assert_eq!(classify(f64::INFINITY), ProjectionStatus::Behind);
        assert_eq!(classify(f64::NEG_INFINITY), ProjectionStatus::Behind);
    }

    #[test]
    fn zero_requirement_divides_by_one() {
        assert_eq!(contribution_ratio(50.0, 0.0), 50.0);
        assert_eq!(contribution_ratio(0.0, 0.0), 0.0);
        assert_eq!(contribution_ratio(50.0, 100.0), 0.5);
    }

    #[test]
    fn status_labels_match_display_text() {
        assert_eq!(ProjectionStatus::OnTrack.to_string(), "On track");
        assert_eq!(
            serde_json::to_string(&ProjectionStatus::OnTrack).expect("serializes"),
            "\"On track\""
        );
        assert_eq!(ProjectionStatus::Behind.label(), "Behind");
    }

    #[test]
    fn projected_months_rounds_up() {
        assert_eq!(projected_months(1200.0, 100.0), ProjectedMonths::Within(12));
        assert_eq!(projected_months(1200.0, 50.0), ProjectedMonths::Within(24));
        assert_eq!(projected_months(1000.0, 300.0), ProjectedMonths::Within(4));
        assert_eq!(projected_months(0.0, 10.0), ProjectedMonths::Within(0));
    }

    #[test]
    fn projected_months_without_contribution_is_unreachable() {
        assert_eq!(projected_months(1200.0, 0.0), ProjectedMonths::Unreachable);
        assert_eq!(projected_months(1200.0, -5.0), ProjectedMonths::Unreachable);
        assert_eq!(projected_months(1200.0, f64::NAN), ProjectedMonths::Unreachable);
        assert_eq!(projected_months(1e300, 1e-300), ProjectedMonths::Unreachable);
        assert_eq!(
            serde_json::to_string(&ProjectedMonths::Unreachable).expect("serializes"),
            "\"unreachable\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectedMonths::Within(3)).expect("serializes"),
            "3"
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_status_never_improves_as_ratio_falls(a in 0.0f64..3.0, b in 0.0f64..3.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(classify(low)) <= rank(classify(high)));
        }

        #[test]
        fn prop_positive_pace_always_reaches_the_goal(
            remaining in 0.0f64..1_000_000.0,
            monthly in 1.0f64..50_000.0,
        ) {
            let months = projected_months(remaining, monthly).months();
            prop_assert!(months.is_some());
            let months = months.unwrap_or_default();
            prop_assert!(f64::from(months) * monthly >= remaining - 1e-6);
            prop_assert_eq!(months == 0, remaining == 0.0);
        }
    }

    fn rank(status: ProjectionStatus) -> u8 {
        match status {
            ProjectionStatus::Behind => 0,
            ProjectionStatus::Tight => 1,
            ProjectionStatus::OnTrack => 2,
            ProjectionStatus::Ahead => 3,
        }
    }
}
