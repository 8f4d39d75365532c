//! Court geometry: rims, bounds, and the cosmetic net wave

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::helpers::horizontal_distance;

/// Which basket, keyed by court side
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RimSide {
    Left,
    Right,
}

impl RimSide {
    pub const BOTH: [RimSide; 2] = [RimSide::Left, RimSide::Right];

    /// World-space rim center
    pub fn center(&self) -> Vec3 {
        match self {
            RimSide::Left => LEFT_RIM_CENTER,
            RimSide::Right => RIGHT_RIM_CENTER,
        }
    }

    /// Team credited when a ball drops through this rim
    pub fn team(&self) -> Team {
        match self {
            RimSide::Left => Team::Away,
            RimSide::Right => Team::Home,
        }
    }
}

impl std::fmt::Display for RimSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RimSide::Left => write!(f, "L"),
            RimSide::Right => write!(f, "R"),
        }
    }
}

/// Scoring team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

/// Pick the rim nearest to a position (full 3D distance, matching how the
/// shooter would judge it)
pub fn nearest_rim(pos: Vec3) -> RimSide {
    let left = pos.distance_squared(LEFT_RIM_CENTER);
    let right = pos.distance_squared(RIGHT_RIM_CENTER);
    if left <= right { RimSide::Left } else { RimSide::Right }
}

/// Horizontal distance from a position to a rim's vertical axis
pub fn rim_distance(pos: Vec3, rim: RimSide) -> f32 {
    horizontal_distance(pos, rim.center())
}

/// True when a shot origin sits beyond the three-point arc of the given rim
pub fn beyond_arc(origin: Vec3, rim: RimSide) -> bool {
    rim_distance(origin, rim) > THREE_POINT_RADIUS
}

/// Clamp a position to the court rectangle. Returns which axes were clamped
/// so callers can zero or reflect the matching velocity component.
pub fn clamp_to_court(pos: &mut Vec3) -> (bool, bool) {
    let mut hit_x = false;
    let mut hit_z = false;
    if pos.x < COURT_MIN_X {
        pos.x = COURT_MIN_X;
        hit_x = true;
    } else if pos.x > COURT_MAX_X {
        pos.x = COURT_MAX_X;
        hit_x = true;
    }
    if pos.z < COURT_MIN_Z {
        pos.z = COURT_MIN_Z;
        hit_z = true;
    } else if pos.z > COURT_MAX_Z {
        pos.z = COURT_MAX_Z;
        hit_z = true;
    }
    (hit_x, hit_z)
}

/// Net wave animation state, one per rim entity
#[derive(Component, Default)]
pub struct NetWave {
    pub timer: f32,
}

impl NetWave {
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn trigger(&mut self) {
        self.timer = NET_WAVE_SECS;
    }
}

/// Advance net wave timers and squash/stretch the net mesh while active
pub fn animate_net_wave(time: Res<Time>, mut nets: Query<(&mut NetWave, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut wave, mut transform) in &mut nets {
        if !wave.is_active() {
            continue;
        }
        wave.timer = (wave.timer - dt).max(0.0);
        let progress = 1.0 - wave.timer / NET_WAVE_SECS;
        // Single damped ripple down the net
        let ripple = (progress * std::f32::consts::TAU).sin() * (1.0 - progress);
        transform.scale = Vec3::new(1.0, 1.0 + ripple * 0.25, 1.0);
        if wave.timer == 0.0 {
            transform.scale = Vec3::ONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_rim_by_side() {
        assert_eq!(nearest_rim(Vec3::new(-5.0, 0.35, 0.0)), RimSide::Left);
        assert_eq!(nearest_rim(Vec3::new(8.0, 0.35, 2.0)), RimSide::Right);
    }

    #[test]
    fn test_beyond_arc_boundary() {
        // 7.0 out is a three, 5.0 is not, 6.75 is exactly on the line (not beyond)
        let rim = RimSide::Right;
        let cx = RIGHT_RIM_CENTER.x;
        assert!(beyond_arc(Vec3::new(cx - 7.0, 0.35, 0.0), rim));
        assert!(!beyond_arc(Vec3::new(cx - 5.0, 0.35, 0.0), rim));
        assert!(!beyond_arc(Vec3::new(cx - 6.75, 0.35, 0.0), rim));
    }

    #[test]
    fn test_clamp_to_court_reports_axes() {
        let mut pos = Vec3::new(COURT_MAX_X + 1.0, 1.0, 0.0);
        let (hit_x, hit_z) = clamp_to_court(&mut pos);
        assert!(hit_x);
        assert!(!hit_z);
        assert_eq!(pos.x, COURT_MAX_X);

        let mut pos = Vec3::new(0.0, 1.0, COURT_MIN_Z - 0.5);
        let (hit_x, hit_z) = clamp_to_court(&mut pos);
        assert!(!hit_x);
        assert!(hit_z);
        assert_eq!(pos.z, COURT_MIN_Z);
    }

    #[test]
    fn test_rim_team_mapping() {
        assert_eq!(RimSide::Right.team(), Team::Home);
        assert_eq!(RimSide::Left.team(), Team::Away);
    }
}
