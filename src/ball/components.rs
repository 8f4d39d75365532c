//! Ball-related components

use bevy::prelude::*;
use std::collections::VecDeque;

/// Marker for the ball entity
#[derive(Component)]
pub struct Ball;

/// Mode discriminator: exactly one of the ground/flight integrators runs per
/// tick depending on this.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallMode {
    #[default]
    Grounded,
    Airborne,
}

/// Horizontal velocity while dribbling, units per tick
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct GroundVelocity {
    pub x: f32,
    pub z: f32,
}

impl GroundVelocity {
    pub fn speed(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

/// Velocity while airborne, units per second
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct FlightVelocity(pub Vec3);

/// Phase accumulator for the idle dribble-bounce sine wave
#[derive(Component, Default)]
pub struct BouncePhase(pub f32);

/// Tracks whether the current flight has touched the floor yet
#[derive(Component, Default)]
pub struct FloorContact(pub bool);

/// Number of trajectory samples kept
pub const TRAJECTORY_CAPACITY: usize = 10;

/// How many recent samples must be strictly descending to credit a score
pub const DESCENT_WINDOW: usize = 3;

/// One recorded airborne position
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySample {
    pub position: Vec3,
    pub elapsed_secs: f32,
}

/// Bounded recent-position log, appended every airborne tick.
/// Only ever consulted to confirm downward motion before crediting a score.
#[derive(Component, Default)]
pub struct TrajectoryHistory {
    samples: VecDeque<TrajectorySample>,
}

impl TrajectoryHistory {
    pub fn push(&mut self, position: Vec3, elapsed_secs: f32) {
        if self.samples.len() == TRAJECTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(TrajectorySample {
            position,
            elapsed_secs,
        });
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when the last `DESCENT_WINDOW` samples have strictly decreasing
    /// height. Fewer samples than the window is never descending.
    pub fn is_descending(&self) -> bool {
        if self.samples.len() < DESCENT_WINDOW {
            return false;
        }
        let recent: Vec<_> = self
            .samples
            .iter()
            .rev()
            .take(DESCENT_WINDOW)
            .collect();
        // recent[0] is the newest sample
        recent
            .windows(2)
            .all(|pair| pair[0].position.y < pair[1].position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_from_heights(heights: &[f32]) -> TrajectoryHistory {
        let mut history = TrajectoryHistory::default();
        for (i, &y) in heights.iter().enumerate() {
            history.push(Vec3::new(0.0, y, 0.0), i as f32 * 0.016);
        }
        history
    }

    #[test]
    fn test_descending_requires_three_samples() {
        let history = history_from_heights(&[5.2, 5.1]);
        assert!(!history.is_descending());
    }

    #[test]
    fn test_strictly_decreasing_heights_descend() {
        let history = history_from_heights(&[6.3, 6.1, 6.0]);
        assert!(history.is_descending());
    }

    #[test]
    fn test_non_monotonic_heights_do_not_descend() {
        // Rising between the last two samples must block scoring
        let history = history_from_heights(&[5.0, 5.2, 5.1]);
        assert!(!history.is_descending());
    }

    #[test]
    fn test_equal_heights_do_not_descend() {
        let history = history_from_heights(&[5.2, 5.1, 5.1]);
        assert!(!history.is_descending());
    }

    #[test]
    fn test_only_recent_window_matters() {
        // Old climb followed by a clean descent still counts
        let history = history_from_heights(&[1.0, 3.0, 5.0, 4.8, 4.5, 4.1]);
        assert!(history.is_descending());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let heights: Vec<f32> = (0..15).map(|i| i as f32).collect();
        let history = history_from_heights(&heights);
        assert_eq!(history.len(), TRAJECTORY_CAPACITY);
    }
}
