//! Global gameplay tuning (decoupled from any UI)
//!
//! The constants in `constants.rs` are the defaults; `PhysicsTweaks` is the
//! runtime copy every physics system reads, optionally overridden from
//! `config/gameplay_tuning.json`. The original game shipped two forked copies
//! of its physics with slightly different constants; everything that differed
//! between them is a field here.

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

fn default_wall_restitution() -> f32 {
    WALL_RESTITUTION
}
fn default_backspin_factor() -> f32 {
    FLIGHT_BACKSPIN_FACTOR
}
fn default_sidespin_factor() -> f32 {
    FLIGHT_SIDESPIN_FACTOR
}
fn default_net_height_band() -> f32 {
    NET_HEIGHT_BAND
}

/// Serializable tuning values stored in config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplayTuning {
    pub gravity: f32,
    pub air_resistance: f32,
    pub bounce_factor: f32,
    pub bounce_friction: f32,
    #[serde(default = "default_wall_restitution")]
    pub wall_restitution: f32,
    pub move_accel: f32,
    pub move_decel: f32,
    pub move_max_speed: f32,
    pub dribble_height: f32,
    pub dribble_phase_rate: f32,
    pub shot_base_speed: f32,
    pub power_factor_min: f32,
    pub power_factor_max: f32,
    pub height_comp_factor: f32,
    pub height_comp_falloff: f32,
    #[serde(default = "default_backspin_factor")]
    pub backspin_factor: f32,
    #[serde(default = "default_sidespin_factor")]
    pub sidespin_factor: f32,
    #[serde(default = "default_net_height_band")]
    pub net_height_band: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            air_resistance: AIR_RESISTANCE,
            bounce_factor: BOUNCE_FACTOR,
            bounce_friction: BOUNCE_FRICTION,
            wall_restitution: WALL_RESTITUTION,
            move_accel: MOVE_ACCEL,
            move_decel: MOVE_DECEL,
            move_max_speed: MOVE_MAX_SPEED,
            dribble_height: DRIBBLE_HEIGHT,
            dribble_phase_rate: DRIBBLE_PHASE_RATE,
            shot_base_speed: SHOT_BASE_SPEED,
            power_factor_min: POWER_FACTOR_MIN,
            power_factor_max: POWER_FACTOR_MAX,
            height_comp_factor: HEIGHT_COMP_FACTOR,
            height_comp_falloff: HEIGHT_COMP_FALLOFF,
            backspin_factor: default_backspin_factor(),
            sidespin_factor: default_sidespin_factor(),
            net_height_band: default_net_height_band(),
        }
    }
}

impl GameplayTuning {
    pub fn apply_to(&self, tweaks: &mut PhysicsTweaks) {
        tweaks.gravity = self.gravity;
        tweaks.air_resistance = self.air_resistance;
        tweaks.bounce_factor = self.bounce_factor;
        tweaks.bounce_friction = self.bounce_friction;
        tweaks.wall_restitution = self.wall_restitution;
        tweaks.move_accel = self.move_accel;
        tweaks.move_decel = self.move_decel;
        tweaks.move_max_speed = self.move_max_speed;
        tweaks.dribble_height = self.dribble_height;
        tweaks.dribble_phase_rate = self.dribble_phase_rate;
        tweaks.shot_base_speed = self.shot_base_speed;
        tweaks.power_factor_min = self.power_factor_min;
        tweaks.power_factor_max = self.power_factor_max;
        tweaks.height_comp_factor = self.height_comp_factor;
        tweaks.height_comp_falloff = self.height_comp_falloff;
        tweaks.backspin_factor = self.backspin_factor;
        tweaks.sidespin_factor = self.sidespin_factor;
        tweaks.net_height_band = self.net_height_band;
    }
}

/// Runtime-adjustable physics values read by every physics system
#[derive(Resource, Debug, Clone)]
pub struct PhysicsTweaks {
    pub gravity: f32,
    pub air_resistance: f32,
    pub bounce_factor: f32,
    pub bounce_friction: f32,
    pub wall_restitution: f32,
    pub move_accel: f32,
    pub move_decel: f32,
    pub move_max_speed: f32,
    pub dribble_height: f32,
    pub dribble_phase_rate: f32,
    pub shot_base_speed: f32,
    pub power_factor_min: f32,
    pub power_factor_max: f32,
    pub height_comp_factor: f32,
    pub height_comp_falloff: f32,
    pub backspin_factor: f32,
    pub sidespin_factor: f32,
    pub net_height_band: f32,
}

impl Default for PhysicsTweaks {
    fn default() -> Self {
        let mut tweaks = Self {
            gravity: 0.0,
            air_resistance: 0.0,
            bounce_factor: 0.0,
            bounce_friction: 0.0,
            wall_restitution: 0.0,
            move_accel: 0.0,
            move_decel: 0.0,
            move_max_speed: 0.0,
            dribble_height: 0.0,
            dribble_phase_rate: 0.0,
            shot_base_speed: 0.0,
            power_factor_min: 0.0,
            power_factor_max: 0.0,
            height_comp_factor: 0.0,
            height_comp_falloff: 0.0,
            backspin_factor: 0.0,
            sidespin_factor: 0.0,
            net_height_band: 0.0,
        };
        GameplayTuning::default().apply_to(&mut tweaks);
        tweaks
    }
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<GameplayTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
}

pub fn apply_global_tuning(tweaks: &mut PhysicsTweaks) -> Result<(), String> {
    match load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(tuning) => {
            tuning.apply_to(tweaks);
            Ok(())
        }
        Err(err) => {
            GameplayTuning::default().apply_to(tweaks);
            Err(err)
        }
    }
}

pub fn load_global_tuning_system(mut tweaks: bevy::prelude::ResMut<PhysicsTweaks>) {
    if let Err(err) = apply_global_tuning(&mut tweaks) {
        warn!("{}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tweaks = PhysicsTweaks::default();
        assert_eq!(tweaks.gravity, GRAVITY);
        assert_eq!(tweaks.bounce_factor, BOUNCE_FACTOR);
        assert_eq!(tweaks.move_max_speed, MOVE_MAX_SPEED);
    }

    #[test]
    fn test_partial_config_uses_serde_defaults() {
        // Older configs predate the spin/net fields
        let json = r#"{
            "gravity": -9.8,
            "air_resistance": 0.05,
            "bounce_factor": 0.55,
            "bounce_friction": 0.85,
            "move_accel": 0.01,
            "move_decel": 0.008,
            "move_max_speed": 0.2,
            "dribble_height": 0.4,
            "dribble_phase_rate": 0.3,
            "shot_base_speed": 15.0,
            "power_factor_min": 0.4,
            "power_factor_max": 0.9,
            "height_comp_factor": 0.3,
            "height_comp_falloff": 0.2
        }"#;
        let tuning: GameplayTuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.gravity, -9.8);
        assert_eq!(tuning.wall_restitution, WALL_RESTITUTION);
        assert_eq!(tuning.backspin_factor, FLIGHT_BACKSPIN_FACTOR);
    }
}
