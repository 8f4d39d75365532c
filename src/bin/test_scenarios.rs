//! Scenario test runner
//!
//! Runs every TOML scenario through the headless sim and reports pass/fail.
//!
//! Usage:
//!   cargo run --bin test-scenarios
//!   cargo run --bin test-scenarios -- scenarios/center_court_brick.toml

use std::path::Path;
use std::process::ExitCode;

use hoopshot::testing::{load_scenario, run_scenario, run_scenario_dir};

const SCENARIOS_DIR: &str = "scenarios";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        match run_scenario_dir(Path::new(SCENARIOS_DIR)) {
            Ok((passed, failed)) => {
                println!("\n{} passed, {} failed", passed, failed);
                if failed == 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        }
    } else {
        let mut failed = 0;
        for arg in &args {
            match load_scenario(Path::new(arg)) {
                Ok(scenario) => {
                    let report = run_scenario(&scenario);
                    match report.result {
                        Ok(()) => println!("PASS {}", report.name),
                        Err(err) => {
                            failed += 1;
                            println!("FAIL {}\n  {}", report.name, err);
                        }
                    }
                }
                Err(err) => {
                    failed += 1;
                    eprintln!("{}", err);
                }
            }
        }
        if failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
