//! Shooting module - shot power and the launcher

pub mod launch;
pub mod power;

pub use launch::{LaunchPlan, launch_angle_deg, launch_shot, plan_launch, power_factor};
pub use power::{ShotPower, adjust_shot_power};
