//! Headless simulation - app building and scripted shot trials

pub mod app_builder;
pub mod runner;

pub use app_builder::{HeadlessAppBuilder, add_core_systems, spawn_core_entities};
pub use runner::{ShotTrial, TrialOutcome, TrialResult, TrialStats, run_shot_trial};
