//! Hoopshot - a 3D basketball shooting game built with Bevy
//!
//! This crate provides all game components, resources, and systems organized
//! into modules. The physics core runs on FixedUpdate; rendering and HUD
//! live in the binaries.

// Core modules
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod court;
pub mod input;
pub mod modes;
pub mod scoring;
pub mod shooting;

// Re-export commonly used types for convenience
pub use ball::{
    Ball, BallMode, BouncePhase, DESCENT_WINDOW, FloorContact, FlightVelocity, GroundVelocity,
    TRAJECTORY_CAPACITY, TrajectoryHistory, TrajectorySample, ground_movement, update_flight,
};
pub use constants::*;
pub use court::{
    NetWave, RimSide, Team, animate_net_wave, beyond_arc, clamp_to_court, nearest_rim,
    rim_distance,
};
pub use events::{
    BusEvent, EventBuffer, EventBus, EventLogConfig, EventLogger, GameConfig, GameEvent,
    log_bus_events, serialize_event, update_event_bus_time,
};
pub use helpers::*;
pub use input::{PlayerInput, capture_input};
pub use modes::{
    ActiveMode, BallReset, ChallengeResult, FREE_SHOOT, GameMode, MODES, ball_unfrozen,
    reset_ball_pose, select_mode, tick_countdown, update_results_display,
};
pub use scoring::{
    DueAction, Score, ShotPhase, ShotTracker, check_scoring, resolve_shot_timers,
};
pub use shooting::{
    LaunchPlan, ShotPower, adjust_shot_power, launch_angle_deg, launch_shot, plan_launch,
    power_factor,
};
pub use tuning::{GameplayTuning, PhysicsTweaks, apply_global_tuning, load_global_tuning_system};
