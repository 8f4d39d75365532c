//! Ground movement integrator
//!
//! Runs on FixedUpdate while the ball is grounded. Constants are per-tick:
//! the original game advanced velocity by fixed amounts each animation frame,
//! and the fixed 60 Hz schedule keeps that behavior well-defined.

use bevy::prelude::*;
use rand::Rng;

use crate::ball::components::*;
use crate::constants::*;
use crate::court::clamp_to_court;
use crate::helpers::move_toward;
use crate::input::PlayerInput;
use crate::tuning::PhysicsTweaks;

/// Advance one horizontal axis of ground velocity for one tick.
/// Held input accelerates toward the cap; no input decays toward zero without
/// overshooting or flipping sign.
pub fn advance_axis(velocity: f32, positive_held: bool, negative_held: bool, tweaks: &PhysicsTweaks) -> f32 {
    let target = match (positive_held, negative_held) {
        (true, false) => tweaks.move_max_speed,
        (false, true) => -tweaks.move_max_speed,
        _ => 0.0,
    };
    let rate = if positive_held != negative_held {
        tweaks.move_accel
    } else {
        tweaks.move_decel
    };
    move_toward(velocity, target, rate).clamp(-tweaks.move_max_speed, tweaks.move_max_speed)
}

/// Dribble-bounce height above the rest position for the current phase
pub fn dribble_offset(phase: f32, tweaks: &PhysicsTweaks) -> f32 {
    phase.sin().abs() * tweaks.dribble_height
}

/// Move the ball across the court from held-direction input
pub fn ground_movement(
    input: Res<PlayerInput>,
    tweaks: Res<PhysicsTweaks>,
    mut query: Query<
        (&mut Transform, &mut GroundVelocity, &mut BouncePhase, &BallMode),
        With<Ball>,
    >,
) {
    let mut rng = rand::thread_rng();

    for (mut transform, mut velocity, mut phase, mode) in &mut query {
        if *mode != BallMode::Grounded {
            continue;
        }

        velocity.x = advance_axis(velocity.x, input.move_right, input.move_left, &tweaks);
        velocity.z = advance_axis(velocity.z, input.move_back, input.move_forward, &tweaks);

        transform.translation.x += velocity.x;
        transform.translation.z += velocity.z;

        // Inelastic wall stop: crossing a bound kills that axis, no bounce
        let (hit_x, hit_z) = clamp_to_court(&mut transform.translation);
        if hit_x {
            velocity.x = 0.0;
        }
        if hit_z {
            velocity.z = 0.0;
        }

        let speed = velocity.speed();
        if speed > MOVE_EPSILON {
            phase.0 += tweaks.dribble_phase_rate * (speed / tweaks.move_max_speed);
            transform.translation.y = BALL_REST_HEIGHT + dribble_offset(phase.0, &tweaks);

            // Roll: rotation about the axis perpendicular to each movement
            // axis, sign flipped on Z travel to match real rolling direction,
            // floored so slow motion still visibly turns the ball.
            let spin_z = roll_spin(-velocity.x);
            let spin_x = roll_spin(velocity.z);
            transform.rotate_z(spin_z);
            transform.rotate_x(spin_x);
            transform.rotate_y(rng.gen_range(-YAW_JITTER..YAW_JITTER));
        } else {
            transform.translation.y = BALL_REST_HEIGHT;
            phase.0 = 0.0;
        }
    }
}

fn roll_spin(axis_velocity: f32) -> f32 {
    if axis_velocity == 0.0 {
        return 0.0;
    }
    axis_velocity.signum() * (axis_velocity.abs() * ROLL_SPIN_FACTOR).max(ROLL_SPIN_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_accelerates_toward_cap() {
        let tweaks = PhysicsTweaks::default();
        let mut v = 0.0;
        for _ in 0..2000 {
            v = advance_axis(v, true, false, &tweaks);
            assert!(v <= tweaks.move_max_speed + 1e-6);
        }
        assert!((v - tweaks.move_max_speed).abs() < 1e-6);
    }

    #[test]
    fn test_axis_never_exceeds_cap_under_any_input() {
        let tweaks = PhysicsTweaks::default();
        let inputs = [(true, false), (false, true), (true, true), (false, false)];
        let mut v = 0.0;
        for i in 0..5000 {
            let (pos, neg) = inputs[i % inputs.len()];
            v = advance_axis(v, pos, neg, &tweaks);
            assert!(v.abs() <= tweaks.move_max_speed + 1e-6);
        }
    }

    #[test]
    fn test_decay_never_flips_sign() {
        let tweaks = PhysicsTweaks::default();
        let mut v = tweaks.move_decel * 0.5; // less than one tick of decel
        v = advance_axis(v, false, false, &tweaks);
        assert_eq!(v, 0.0);

        let mut v = -tweaks.move_decel * 0.5;
        v = advance_axis(v, false, false, &tweaks);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_opposed_input_decays() {
        let tweaks = PhysicsTweaks::default();
        let v = advance_axis(0.1, true, true, &tweaks);
        assert!(v < 0.1);
        assert!(v >= 0.0);
    }

    #[test]
    fn test_dribble_offset_bounded() {
        let tweaks = PhysicsTweaks::default();
        for i in 0..100 {
            let phase = i as f32 * 0.37;
            let offset = dribble_offset(phase, &tweaks);
            assert!(offset >= 0.0);
            assert!(offset <= tweaks.dribble_height);
        }
    }

    #[test]
    fn test_roll_spin_floor() {
        // Crawling speed still rotates at the visible minimum
        let spin = roll_spin(0.001);
        assert!((spin - ROLL_SPIN_MIN).abs() < 1e-6);
        let spin = roll_spin(-0.001);
        assert!((spin + ROLL_SPIN_MIN).abs() < 1e-6);
        // Fast motion scales past the floor
        assert!(roll_spin(0.15) > ROLL_SPIN_MIN);
    }
}
