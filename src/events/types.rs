//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::court::RimSide;

/// Game configuration snapshot logged at session start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    // Flight physics
    pub gravity: f32,
    pub air_resistance: f32,
    pub bounce_factor: f32,
    pub bounce_friction: f32,
    pub wall_restitution: f32,
    // Ground movement
    pub move_accel: f32,
    pub move_decel: f32,
    pub move_max_speed: f32,
    // Shooting
    pub shot_base_speed: f32,
    pub power_factor_min: f32,
    pub power_factor_max: f32,
    pub height_comp_factor: f32,
}

impl GameConfig {
    pub fn from_tweaks(tweaks: &crate::tuning::PhysicsTweaks) -> Self {
        Self {
            gravity: tweaks.gravity,
            air_resistance: tweaks.air_resistance,
            bounce_factor: tweaks.bounce_factor,
            bounce_friction: tweaks.bounce_friction,
            wall_restitution: tweaks.wall_restitution,
            move_accel: tweaks.move_accel,
            move_decel: tweaks.move_decel,
            move_max_speed: tweaks.move_max_speed,
            shot_base_speed: tweaks.shot_base_speed,
            power_factor_min: tweaks.power_factor_min,
            power_factor_max: tweaks.power_factor_max,
            height_comp_factor: tweaks.height_comp_factor,
        }
    }
}

/// All game events that can be logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Configuration snapshot (logged after session start)
    Config(GameConfig),

    // === Mode Events ===
    /// Game mode selected
    ModeSelect { mode: String },
    /// Timed challenge began
    ChallengeStart { mode: String, time_limit: u32 },
    /// Countdown ticked (1 Hz)
    CountdownTick { remaining: u32 },
    /// Timed challenge finished
    ChallengeEnd {
        mode: String,
        points: u32,
        attempts: u32,
        made: u32,
        accuracy: f32,
        new_best: bool,
    },

    // === Shot Events ===
    /// Shot launched
    ShotAttempt {
        shot_id: u32,
        origin: (f32, f32, f32),
        power: u8,
        beyond_arc: bool,
    },
    /// Shot dropped through a rim
    ShotMade {
        shot_id: u32,
        rim: RimSide,
        points: u32,
        three: bool,
    },
    /// Shot missed
    ShotMissed { shot_id: u32 },
    /// Shoot action rejected by the active mode
    InvalidShot { message: String },
    /// Shot power adjusted
    PowerChange { power: u8 },

    // === Ball Events ===
    /// Cosmetic net wave triggered on a rim
    NetWave { rim: RimSide },
    /// Ball repositioned to its spawn pose
    BallReset,

    // === Debug/Tick Events ===
    /// Sampled ball state for offline analysis
    Tick {
        frame: u64,
        ball_pos: (f32, f32, f32),
        ball_vel: (f32, f32, f32),
        airborne: bool,
    },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::ModeSelect { .. } => "MD",
            GameEvent::ChallengeStart { .. } => "CS",
            GameEvent::CountdownTick { .. } => "CT",
            GameEvent::ChallengeEnd { .. } => "CE",
            GameEvent::ShotAttempt { .. } => "SA",
            GameEvent::ShotMade { .. } => "SM",
            GameEvent::ShotMissed { .. } => "SX",
            GameEvent::InvalidShot { .. } => "IV",
            GameEvent::PowerChange { .. } => "PW",
            GameEvent::NetWave { .. } => "NW",
            GameEvent::BallReset => "BR",
            GameEvent::Tick { .. } => "T",
        }
    }
}
