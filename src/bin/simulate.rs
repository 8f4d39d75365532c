//! Batch shot simulation tool
//!
//! Runs headless shot trials across power levels and court positions and
//! prints make-rate tables. Each trial is an independent single-threaded
//! app, so the batch parallelizes cleanly with rayon.
//!
//! Usage:
//!   cargo run --bin simulate                          # Default sweep
//!   cargo run --bin simulate -- --trials 20           # Trials per cell
//!   cargo run --bin simulate -- --power 75            # Single power level
//!   cargo run --bin simulate -- --mode three-pointers-only

use bevy::prelude::Vec3;
use rayon::prelude::*;

use hoopshot::modes::FREE_SHOOT;
use hoopshot::simulation::{ShotTrial, TrialStats, run_shot_trial};
use hoopshot::testing::mode_index_by_name;
use hoopshot::{BALL_REST_HEIGHT, PHYSICS_TICK_HZ, RIGHT_RIM_CENTER};

/// Distances from the right rim to sample, in court units
const DISTANCES: [f32; 6] = [1.0, 2.5, 4.5, 6.5, 8.5, 12.0];
const DEFAULT_POWERS: [u8; 5] = [20, 40, 60, 80, 100];
const DEFAULT_TRIALS: u32 = 10;

struct SimConfig {
    trials: u32,
    powers: Vec<u8>,
    mode_index: usize,
}

fn parse_args() -> SimConfig {
    let mut trials = DEFAULT_TRIALS;
    let mut powers: Vec<u8> = DEFAULT_POWERS.to_vec();
    let mut mode_index = FREE_SHOOT;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trials" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    trials = value;
                }
            }
            "--power" => {
                if let Some(value) = args.next().and_then(|v| v.parse::<u8>().ok()) {
                    powers = vec![value.min(100)];
                }
            }
            "--mode" => {
                if let Some(value) = args.next() {
                    match mode_index_by_name(&value) {
                        Some(index) => mode_index = index,
                        None => eprintln!("Unknown mode '{}', using free-shoot", value),
                    }
                }
            }
            _ => {}
        }
    }

    SimConfig {
        trials,
        powers,
        mode_index,
    }
}

fn main() {
    let config = parse_args();
    let total = config.powers.len() * DISTANCES.len() * config.trials as usize;
    println!(
        "Running {} trials ({} powers x {} distances x {})",
        total,
        config.powers.len(),
        DISTANCES.len(),
        config.trials
    );

    // One (power, distance) cell per task; trials within a cell run serially
    let cells: Vec<(u8, f32)> = config
        .powers
        .iter()
        .flat_map(|&power| DISTANCES.iter().map(move |&distance| (power, distance)))
        .collect();

    let results: Vec<(u8, f32, TrialStats, f32)> = cells
        .par_iter()
        .map(|&(power, distance)| {
            let origin = Vec3::new(
                RIGHT_RIM_CENTER.x - distance,
                BALL_REST_HEIGHT,
                0.0,
            );
            let mut stats = TrialStats::default();
            let mut total_ticks = 0u32;
            for _ in 0..config.trials {
                let result = run_shot_trial(&ShotTrial {
                    origin,
                    power,
                    mode_index: config.mode_index,
                    ..Default::default()
                });
                stats.record(result.outcome);
                total_ticks += result.ticks;
            }
            let avg_secs =
                total_ticks as f32 / config.trials.max(1) as f32 / PHYSICS_TICK_HZ as f32;
            (power, distance, stats, avg_secs)
        })
        .collect();

    println!();
    println!("power  dist   makes  misses  reject  t/out  make%   avg secs");
    for (power, distance, stats, avg_secs) in &results {
        println!(
            "{:>5}  {:>4.1}  {:>6}  {:>6}  {:>6}  {:>5}  {:>5.1}  {:>8.2}",
            power,
            distance,
            stats.makes,
            stats.misses,
            stats.rejected,
            stats.timeouts,
            stats.make_rate() * 100.0,
            avg_secs
        );
    }

    let mut overall = TrialStats::default();
    for (_, _, stats, _) in &results {
        overall.attempts += stats.attempts;
        overall.makes += stats.makes;
        overall.misses += stats.misses;
        overall.rejected += stats.rejected;
        overall.timeouts += stats.timeouts;
    }
    println!();
    println!(
        "Overall: {} attempts, {:.1}% made, {} rejected, {} timeouts",
        overall.attempts,
        overall.make_rate() * 100.0,
        overall.rejected,
        overall.timeouts
    );
}
