//! Goal review.
//!
//! Goals attach min/max thresholds to test scores or named statistics.
//! A goal with no thresholds always passes. A missing or NaN value
//! against an active threshold fails that threshold; it never passes
//! silently.

use serde::{Deserialize, Serialize};

/// One configured goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Goal {
    /// Test id or statistic name the goal applies to.
    pub subject: String,
    /// Minimum acceptable value, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum acceptable value, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// The evaluated state of one goal.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GoalOutcome {
    /// The goal's subject.
    pub subject: String,
    /// The observed value, when one was available and finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Whether every active threshold held.
    pub passed: bool,
    /// Human-readable evaluation detail.
    pub detail: String,
}

/// All goal outcomes for one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GoalReview {
    /// Per-goal outcomes, in configuration order.
    pub outcomes: Vec<GoalOutcome>,
}

impl GoalReview {
    /// Whether every goal passed.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }
}

/// Evaluate goals against a score lookup.
///
/// The lookup returns the current value for a subject, or `None` when
/// the test produced no score.
#[tracing::instrument(skip_all, fields(goals = goals.len()))]
pub fn review(goals: &[Goal], lookup: impl Fn(&str) -> Option<f64>) -> GoalReview {
    let outcomes = goals
        .iter()
        .map(|goal| {
            let value = lookup(&goal.subject).filter(|v| v.is_finite());
            evaluate(goal, value)
        })
        .collect();
    GoalReview { outcomes }
}

fn evaluate(goal: &Goal, value: Option<f64>) -> GoalOutcome {
    let has_thresholds = goal.min.is_some() || goal.max.is_some();

    let (passed, detail) = match value {
        None if has_thresholds => (
            false,
            format!("{}: no score available to check against thresholds", goal.subject),
        ),
        None => (true, format!("{}: no thresholds configured", goal.subject)),
        Some(v) => {
            let mut failures = Vec::new();
            if let Some(min) = goal.min
                && v < min
            {
                failures.push(format!("{v} is below the minimum of {min}"));
            }
            if let Some(max) = goal.max
                && v > max
            {
                failures.push(format!("{v} is above the maximum of {max}"));
            }
            if failures.is_empty() {
                (true, format!("{}: {v} within thresholds", goal.subject))
            } else {
                (false, format!("{}: {}", goal.subject, failures.join("; ")))
            }
        }
    };

    GoalOutcome {
        subject: goal.subject.clone(),
        value,
        passed,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(subject: &str, min: Option<f64>, max: Option<f64>) -> Goal {
        Goal {
            subject: subject.to_string(),
            min,
            max,
        }
    }

    #[test]
    fn no_thresholds_always_passes() {
        let review = review(&[goal("flesch-kincaid", None, None)], |_| None);
        assert!(review.all_passed());
    }

    #[test]
    fn value_within_thresholds_passes() {
        let review = review(&[goal("flesch-kincaid", Some(5.0), Some(9.0))], |_| Some(7.0));
        assert!(review.all_passed());
    }

    #[test]
    fn value_outside_thresholds_fails() {
        let review = review(&[goal("flesch-kincaid", None, Some(9.0))], |_| Some(12.0));
        assert!(!review.all_passed());
        assert!(review.outcomes[0].detail.contains("above the maximum"));
    }

    #[test]
    fn missing_score_fails_active_thresholds() {
        let review = review(&[goal("fry", Some(3.0), None)], |_| None);
        assert!(!review.all_passed());
    }

    #[test]
    fn nan_fails_active_thresholds() {
        let review = review(&[goal("flesch-kincaid", Some(3.0), None)], |_| Some(f64::NAN));
        assert!(!review.all_passed());
        assert!(review.outcomes[0].value.is_none());
    }

    #[test]
    fn goals_evaluate_independently() {
        let goals = [
            goal("a", Some(1.0), None),
            goal("b", None, Some(5.0)),
        ];
        let review = review(&goals, |subject| match subject {
            "a" => Some(2.0),
            _ => Some(9.0),
        });
        assert!(review.outcomes[0].passed);
        assert!(!review.outcomes[1].passed);
    }
}
