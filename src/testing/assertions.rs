//! Assertion checking for scenario expectations

use crate::simulation::{TrialOutcome, TrialResult};
use crate::testing::parser::ScenarioExpectations;

/// Error when an expectation fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n    Expected: {}\n    Actual: {}",
            self.message, self.expected, self.actual
        )
    }
}

fn outcome_label(outcome: &TrialOutcome) -> &'static str {
    match outcome {
        TrialOutcome::Made { .. } => "make",
        TrialOutcome::Missed => "miss",
        TrialOutcome::Rejected => "reject",
        TrialOutcome::Timeout => "timeout",
    }
}

/// Check a trial result against the scenario's expectations
pub fn check_expectations(
    expect: &ScenarioExpectations,
    result: &TrialResult,
) -> Result<(), AssertionError> {
    let actual = outcome_label(&result.outcome);

    match expect.outcome.as_str() {
        "any" => {
            if matches!(result.outcome, TrialOutcome::Timeout) {
                return Err(AssertionError {
                    message: "Shot never resolved".to_string(),
                    expected: "make or miss".to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        expected => {
            if actual != expected {
                return Err(AssertionError {
                    message: "Wrong outcome".to_string(),
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
    }

    // A resolved shot must have recorded exactly one outcome
    if !matches!(result.outcome, TrialOutcome::Rejected | TrialOutcome::Timeout)
        && result.outcome_count() != 1
    {
        return Err(AssertionError {
            message: "Outcome recorded more than once".to_string(),
            expected: "1".to_string(),
            actual: result.outcome_count().to_string(),
        });
    }

    if let Some(expect_three) = expect.three {
        let actual_three = match result.outcome {
            TrialOutcome::Made { three, .. } => three,
            _ => {
                return Err(AssertionError {
                    message: "Three-pointer expectation on a non-make".to_string(),
                    expected: "make".to_string(),
                    actual: actual.to_string(),
                });
            }
        };
        if actual_three != expect_three {
            return Err(AssertionError {
                message: "Wrong three-pointer classification".to_string(),
                expected: expect_three.to_string(),
                actual: actual_three.to_string(),
            });
        }
    }

    if let Some(expect_points) = expect.points {
        let actual_points = match result.outcome {
            TrialOutcome::Made { points, .. } => points,
            _ => 0,
        };
        if actual_points != expect_points {
            return Err(AssertionError {
                message: "Wrong point value".to_string(),
                expected: expect_points.to_string(),
                actual: actual_points.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miss_result() -> TrialResult {
        TrialResult {
            outcome: TrialOutcome::Missed,
            ticks: 120,
            events: vec![(
                2000,
                crate::events::GameEvent::ShotMissed { shot_id: 1 },
            )],
        }
    }

    #[test]
    fn test_expected_miss_passes() {
        let expect = ScenarioExpectations {
            outcome: "miss".to_string(),
            three: None,
            points: None,
            max_secs: None,
        };
        assert!(check_expectations(&expect, &miss_result()).is_ok());
    }

    #[test]
    fn test_wrong_outcome_fails() {
        let expect = ScenarioExpectations {
            outcome: "make".to_string(),
            three: None,
            points: None,
            max_secs: None,
        };
        let err = check_expectations(&expect, &miss_result()).unwrap_err();
        assert_eq!(err.expected, "make");
        assert_eq!(err.actual, "miss");
    }

    #[test]
    fn test_any_rejects_timeout() {
        let expect = ScenarioExpectations {
            outcome: "any".to_string(),
            three: None,
            points: None,
            max_secs: None,
        };
        let result = TrialResult {
            outcome: TrialOutcome::Timeout,
            ticks: 900,
            events: vec![],
        };
        assert!(check_expectations(&expect, &result).is_err());
    }

    #[test]
    fn test_three_flag_checked_on_makes() {
        let expect = ScenarioExpectations {
            outcome: "make".to_string(),
            three: Some(true),
            points: Some(3),
            max_secs: None,
        };
        let result = TrialResult {
            outcome: TrialOutcome::Made {
                points: 3,
                three: true,
            },
            ticks: 150,
            events: vec![(
                2500,
                crate::events::GameEvent::ShotMade {
                    shot_id: 1,
                    rim: crate::court::RimSide::Right,
                    points: 3,
                    three: true,
                },
            )],
        };
        assert!(check_expectations(&expect, &result).is_ok());
    }
}
