//! Scenario runner - drives TOML scenarios through the headless sim

use bevy::prelude::*;
use std::path::Path;

use crate::constants::POWER_DEFAULT;
use crate::modes::FREE_SHOOT;
use crate::simulation::{ShotTrial, run_shot_trial};
use crate::testing::assertions::{AssertionError, check_expectations};
use crate::testing::parser::{ScenarioDefinition, load_scenarios_dir, mode_index_by_name};

/// Outcome of one scenario file
pub struct ScenarioReport {
    pub name: String,
    pub result: Result<(), AssertionError>,
}

/// Build the trial a scenario describes
pub fn trial_from_scenario(scenario: &ScenarioDefinition) -> Result<ShotTrial, String> {
    let mode_index = match &scenario.setup.mode {
        Some(name) => {
            mode_index_by_name(name).ok_or_else(|| format!("Unknown mode '{}'", name))?
        }
        None => FREE_SHOOT,
    };

    let ball = scenario.setup.ball;
    Ok(ShotTrial {
        origin: Vec3::new(ball.x, ball.y, ball.z),
        power: scenario.setup.power.unwrap_or(POWER_DEFAULT).min(100),
        mode_index,
        max_secs: scenario.expect.max_secs.unwrap_or(15.0),
        tuning: None,
    })
}

/// Run one parsed scenario
pub fn run_scenario(scenario: &ScenarioDefinition) -> ScenarioReport {
    let result = match trial_from_scenario(scenario) {
        Ok(trial) => {
            let trial_result = run_shot_trial(&trial);
            check_expectations(&scenario.expect, &trial_result)
        }
        Err(message) => Err(AssertionError {
            message,
            expected: "valid scenario".to_string(),
            actual: "parse-level problem".to_string(),
        }),
    };

    ScenarioReport {
        name: scenario.name.clone(),
        result,
    }
}

/// Run every scenario in a directory, returning (passed, failed)
pub fn run_scenario_dir(dir: &Path) -> Result<(u32, u32), String> {
    let scenarios = load_scenarios_dir(dir)?;
    if scenarios.is_empty() {
        return Err(format!("No scenarios found in {}", dir.display()));
    }

    let mut passed = 0;
    let mut failed = 0;
    for (path, scenario) in scenarios {
        let report = run_scenario(&scenario);
        match report.result {
            Ok(()) => {
                passed += 1;
                println!("PASS {} ({})", report.name, path.display());
            }
            Err(err) => {
                failed += 1;
                println!("FAIL {} ({})\n  {}", report.name, path.display(), err);
            }
        }
    }
    Ok((passed, failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::{BallPosition, ScenarioExpectations, ScenarioSetup};

    fn scenario(mode: Option<&str>, x: f32, power: u8, outcome: &str) -> ScenarioDefinition {
        ScenarioDefinition {
            name: "inline".to_string(),
            description: None,
            setup: ScenarioSetup {
                mode: mode.map(str::to_string),
                power: Some(power),
                ball: BallPosition {
                    x,
                    y: crate::constants::BALL_REST_HEIGHT,
                    z: 0.0,
                },
            },
            expect: ScenarioExpectations {
                outcome: outcome.to_string(),
                three: None,
                points: None,
                max_secs: None,
            },
        }
    }

    #[test]
    fn test_center_court_scenario_misses() {
        let report = run_scenario(&scenario(None, 0.0, 50, "miss"));
        assert!(report.result.is_ok(), "{:?}", report.result.err().map(|e| e.to_string()));
    }

    #[test]
    fn test_mode_name_validation() {
        let bad = scenario(Some("dunk-contest"), 0.0, 50, "miss");
        assert!(trial_from_scenario(&bad).is_err());
    }
}
