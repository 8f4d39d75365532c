//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::BALL_REST_HEIGHT;
use crate::modes::MODES;

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: ScenarioSetup,
    pub expect: ScenarioExpectations,
}

/// Scenario setup configuration
#[derive(Debug, Deserialize)]
pub struct ScenarioSetup {
    /// Mode name as shown in MODES (defaults to free-shoot)
    pub mode: Option<String>,
    /// Shot power percentage (defaults to 50)
    pub power: Option<u8>,
    pub ball: BallPosition,
}

/// Where the ball starts
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BallPosition {
    pub x: f32,
    #[serde(default = "default_ball_y")]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

fn default_ball_y() -> f32 {
    BALL_REST_HEIGHT
}

/// Expected shot result
#[derive(Debug, Deserialize)]
pub struct ScenarioExpectations {
    /// "make", "miss", "reject", or "any" (any = must resolve, either way)
    pub outcome: String,
    /// Require the make to be (or not be) a three-pointer
    pub three: Option<bool>,
    /// Require an exact point value on the make
    pub points: Option<u32>,
    /// Tick budget in seconds (defaults to 15)
    pub max_secs: Option<f32>,
}

/// Resolve a mode name from a scenario file to its index
pub fn mode_index_by_name(name: &str) -> Option<usize> {
    MODES.iter().position(|mode| mode.name == name)
}

/// Load a single scenario file
pub fn load_scenario(path: &Path) -> Result<ScenarioDefinition, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Load every `.toml` scenario in a directory, sorted by filename
pub fn load_scenarios_dir(dir: &Path) -> Result<Vec<(PathBuf, ScenarioDefinition)>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut scenarios = Vec::new();
    for path in paths {
        let scenario = load_scenario(&path)?;
        scenarios.push((path, scenario));
    }
    Ok(scenarios)
}
