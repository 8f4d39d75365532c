//! Shot power resource and adjustment system

use bevy::prelude::*;

use crate::constants::{POWER_DEFAULT, POWER_STEP};
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;

/// Shot power percentage in [0, 100], adjusted in steps of 5
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotPower(pub u8);

impl Default for ShotPower {
    fn default() -> Self {
        Self(POWER_DEFAULT)
    }
}

impl ShotPower {
    pub fn increase(&mut self) {
        self.0 = (self.0 + POWER_STEP).min(100);
    }

    pub fn decrease(&mut self) {
        self.0 = self.0.saturating_sub(POWER_STEP);
    }

    pub fn reset(&mut self) {
        self.0 = POWER_DEFAULT;
    }

    /// Power as a 0.0-1.0 fraction
    pub fn fraction(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

/// Apply power-adjust presses from the input layer
pub fn adjust_shot_power(
    mut input: ResMut<PlayerInput>,
    mut power: ResMut<ShotPower>,
    mut bus: ResMut<EventBus>,
) {
    let mut changed = false;
    if input.power_up_pressed {
        input.power_up_pressed = false;
        let before = power.0;
        power.increase();
        changed = power.0 != before;
    }
    if input.power_down_pressed {
        input.power_down_pressed = false;
        let before = power.0;
        power.decrease();
        changed |= power.0 != before;
    }
    if changed {
        bus.emit(GameEvent::PowerChange { power: power.0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_saturates_at_hundred() {
        let mut power = ShotPower(95);
        power.increase();
        assert_eq!(power.0, 100);
        for _ in 0..10 {
            power.increase();
        }
        assert_eq!(power.0, 100);
    }

    #[test]
    fn test_decrease_saturates_at_zero() {
        let mut power = ShotPower(5);
        power.decrease();
        assert_eq!(power.0, 0);
        for _ in 0..10 {
            power.decrease();
        }
        assert_eq!(power.0, 0);
    }

    #[test]
    fn test_default_and_reset() {
        let mut power = ShotPower(85);
        power.reset();
        assert_eq!(power, ShotPower::default());
        assert_eq!(power.0, POWER_DEFAULT);
    }

    #[test]
    fn test_step_size() {
        let mut power = ShotPower::default();
        power.increase();
        assert_eq!(power.0, POWER_DEFAULT + POWER_STEP);
    }
}
