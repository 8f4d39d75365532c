//! Utility functions for hoopshot

use bevy::prelude::*;

use crate::constants::MAX_FRAME_DT;

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Horizontal (XZ-plane) distance between two points
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Clamp a frame delta so a tab stall or debugger pause cannot produce a
/// catastrophic physics step.
pub fn bounded_dt(dt: f32) -> f32 {
    dt.min(MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward_reaches_target() {
        assert_eq!(move_toward(0.0, 1.0, 2.0), 1.0);
        assert_eq!(move_toward(1.0, 0.0, 2.0), 0.0);
    }

    #[test]
    fn test_move_toward_never_overshoots() {
        assert_eq!(move_toward(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_toward(1.0, -1.0, 0.5), 0.5);
        // Decaying toward zero must not flip sign in one step
        let v = move_toward(0.1, 0.0, 0.3);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 100.0, 0.0);
        let b = Vec3::new(3.0, -50.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounded_dt_clamps_hitches() {
        assert_eq!(bounded_dt(0.016), 0.016);
        assert_eq!(bounded_dt(0.5), MAX_FRAME_DT);
    }
}
