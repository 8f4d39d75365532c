//! Scenario testing - TOML-defined shots run through the headless sim

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, check_expectations};
pub use parser::{
    BallPosition, ScenarioDefinition, ScenarioExpectations, ScenarioSetup, load_scenario,
    load_scenarios_dir, mode_index_by_name,
};
pub use runner::{ScenarioReport, run_scenario, run_scenario_dir, trial_from_scenario};
