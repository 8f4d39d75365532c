//! Heatmap generator for shot analysis
//!
//! Renders a make-percentage heatmap of the court: every grid cell runs a
//! handful of headless shot trials toward the nearer rim and the cell is
//! colored by make rate (red 0% to green 100%).
//!
//! Usage:
//!   cargo run --bin heatmap                    # Default: power 60
//!   cargo run --bin heatmap -- --power 80
//!   cargo run --bin heatmap -- --trials 5 --cell 2.0
//!
//! Outputs land in showcase/ as:
//!   heatmap_make_p<power>.png
//!   heatmap_make_p<power>.txt (x,z,make_rate)

use ab_glyph::{FontVec, PxScale};
use bevy::prelude::Vec3;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rayon::prelude::*;
use std::fmt::Write as FmtWrite;
use std::fs;

use hoopshot::simulation::{ShotTrial, TrialOutcome, run_shot_trial};
use hoopshot::{
    BALL_REST_HEIGHT, COURT_MAX_X, COURT_MAX_Z, COURT_MIN_X, COURT_MIN_Z, LEFT_RIM_CENTER,
    RIGHT_RIM_CENTER,
};

const OUTPUT_DIR: &str = "showcase";
const PIXELS_PER_CELL: u32 = 20;
const DEFAULT_POWER: u8 = 60;
const DEFAULT_TRIALS: u32 = 3;
const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Candidate label fonts; the heatmap renders without labels if none exist
const FONT_PATHS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

struct HeatmapConfig {
    power: u8,
    trials: u32,
    cell_size: f32,
}

fn parse_args() -> HeatmapConfig {
    let mut power = DEFAULT_POWER;
    let mut trials = DEFAULT_TRIALS;
    let mut cell_size = DEFAULT_CELL_SIZE;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--power" => {
                if let Some(value) = args.next().and_then(|v| v.parse::<u8>().ok()) {
                    power = value.min(100);
                }
            }
            "--trials" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    trials = value;
                }
            }
            "--cell" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    cell_size = value;
                }
            }
            _ => {}
        }
    }

    HeatmapConfig {
        power,
        trials,
        cell_size,
    }
}

/// Map make rate 0.0-1.0 onto a red-yellow-green gradient
fn score_to_color(value: f32) -> Rgb<u8> {
    let value = value.clamp(0.0, 1.0);
    if value < 0.5 {
        let t = value * 2.0;
        Rgb([220, (40.0 + t * 180.0) as u8, 40])
    } else {
        let t = (value - 0.5) * 2.0;
        Rgb([(220.0 - t * 180.0) as u8, 220, 40])
    }
}

fn fill_cell(img: &mut RgbImage, cx: u32, cz: u32, color: Rgb<u8>) {
    for py in 0..PIXELS_PER_CELL {
        for px in 0..PIXELS_PER_CELL {
            img.put_pixel(cx * PIXELS_PER_CELL + px, cz * PIXELS_PER_CELL + py, color);
        }
    }
}

fn load_label_font() -> Option<FontVec> {
    for path in FONT_PATHS {
        if let Ok(data) = fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}

fn main() {
    let config = parse_args();
    fs::create_dir_all(OUTPUT_DIR).expect("Failed to create heatmap output directory");

    let grid_w = ((COURT_MAX_X - COURT_MIN_X) / config.cell_size).round() as u32;
    let grid_z = ((COURT_MAX_Z - COURT_MIN_Z) / config.cell_size).round() as u32;
    println!(
        "Generating make heatmap: {}x{} cells, power {}, {} trials per cell",
        grid_w, grid_z, config.power, config.trials
    );

    let cells: Vec<(u32, u32)> = (0..grid_z)
        .flat_map(|cz| (0..grid_w).map(move |cx| (cx, cz)))
        .collect();

    let rates: Vec<((u32, u32), f32)> = cells
        .par_iter()
        .map(|&(cx, cz)| {
            let x = COURT_MIN_X + (cx as f32 + 0.5) * config.cell_size;
            let z = COURT_MIN_Z + (cz as f32 + 0.5) * config.cell_size;
            let mut makes = 0;
            for _ in 0..config.trials {
                let result = run_shot_trial(&ShotTrial {
                    origin: Vec3::new(x, BALL_REST_HEIGHT, z),
                    power: config.power,
                    ..Default::default()
                });
                if matches!(result.outcome, TrialOutcome::Made { .. }) {
                    makes += 1;
                }
            }
            ((cx, cz), makes as f32 / config.trials.max(1) as f32)
        })
        .collect();

    let mut img = RgbImage::new(grid_w * PIXELS_PER_CELL, grid_z * PIXELS_PER_CELL);
    let mut data = String::from("x,z,make_rate\n");

    for ((cx, cz), rate) in &rates {
        fill_cell(&mut img, *cx, *cz, score_to_color(*rate));
        let x = COURT_MIN_X + (*cx as f32 + 0.5) * config.cell_size;
        let z = COURT_MIN_Z + (*cz as f32 + 0.5) * config.cell_size;
        let _ = writeln!(&mut data, "{:.2},{:.2},{:.3}", x, z, rate);
    }

    // Rim markers
    for rim in [LEFT_RIM_CENTER, RIGHT_RIM_CENTER] {
        let cx = ((rim.x - COURT_MIN_X) / config.cell_size) as u32;
        let cz = ((rim.z - COURT_MIN_Z) / config.cell_size) as u32;
        if cx < grid_w && cz < grid_z {
            fill_cell(&mut img, cx, cz, Rgb([30, 30, 30]));
        }
    }

    if let Some(font) = load_label_font() {
        let label = format!("make rate, power {}", config.power);
        draw_text_mut(
            &mut img,
            Rgb([20, 20, 20]),
            6,
            4,
            PxScale::from(18.0),
            &font,
            &label,
        );
    } else {
        println!("No label font found, rendering unlabeled heatmap");
    }

    let image_path = format!("{}/heatmap_make_p{}.png", OUTPUT_DIR, config.power);
    let data_path = format!("{}/heatmap_make_p{}.txt", OUTPUT_DIR, config.power);
    img.save(&image_path).expect("Failed to save image");
    fs::write(&data_path, data).expect("Failed to write heatmap data");

    let best = rates
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    if let Some(((cx, cz), rate)) = best {
        let x = COURT_MIN_X + (*cx as f32 + 0.5) * config.cell_size;
        let z = COURT_MIN_Z + (*cz as f32 + 0.5) * config.cell_size;
        println!("Best cell: ({:.1}, {:.1}) at {:.0}%", x, z, rate * 100.0);
    }
    println!("Saved {} and {}", image_path, data_path);
}
