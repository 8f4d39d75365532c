//! Flight integrator
//!
//! Advances the airborne ball under gravity, drag, and collision response.
//! Scoring itself lives in `scoring::detector`, chained after this system;
//! this module only records floor contacts and keeps the trajectory history
//! the detector reads.

use bevy::prelude::*;
use rand::Rng;

use crate::ball::components::*;
use crate::constants::*;
use crate::court::{RimSide, clamp_to_court, rim_distance};
use crate::helpers::bounded_dt;
use crate::scoring::outcome::{ShotPhase, ShotTracker};
use crate::tuning::PhysicsTweaks;

/// One explicit-Euler step: gravity on y, multiplicative drag on all axes,
/// then position.
pub fn integrate(position: &mut Vec3, velocity: &mut Vec3, dt: f32, tweaks: &PhysicsTweaks) {
    velocity.y += tweaks.gravity * dt;
    *velocity *= 1.0 - tweaks.air_resistance * dt;
    *position += *velocity * dt;
}

/// Floor collision response. Returns true when the ball touched down this
/// step.
pub fn floor_response(position: &mut Vec3, velocity: &mut Vec3, tweaks: &PhysicsTweaks) -> bool {
    if position.y >= BALL_REST_HEIGHT {
        return false;
    }
    position.y = BALL_REST_HEIGHT;
    velocity.y = -velocity.y * tweaks.bounce_factor;
    velocity.x *= tweaks.bounce_friction;
    velocity.z *= tweaks.bounce_friction;
    true
}

/// Wall collision response at the court bounds (elastic-ish, unlike the
/// ground integrator's hard stop).
pub fn wall_response(position: &mut Vec3, velocity: &mut Vec3, tweaks: &PhysicsTweaks) {
    let (hit_x, hit_z) = clamp_to_court(position);
    if hit_x {
        velocity.x = -velocity.x * tweaks.wall_restitution;
    }
    if hit_z {
        velocity.z = -velocity.z * tweaks.wall_restitution;
    }
}

/// A post-bounce ball this slow has come to rest
pub fn at_rest(velocity: Vec3) -> bool {
    velocity.y.abs() < REST_VERTICAL_SPEED && velocity.length() < REST_TOTAL_SPEED
}

/// Advance the airborne ball one tick
pub fn update_flight(
    time: Res<Time>,
    tweaks: Res<PhysicsTweaks>,
    mut tracker: ResMut<ShotTracker>,
    mut query: Query<
        (
            &mut Transform,
            &mut FlightVelocity,
            &mut BallMode,
            &mut GroundVelocity,
            &mut TrajectoryHistory,
            &mut FloorContact,
        ),
        With<Ball>,
    >,
) {
    let dt = bounded_dt(time.delta_secs());
    let elapsed = time.elapsed_secs();
    let mut rng = rand::thread_rng();

    for (mut transform, mut velocity, mut mode, mut ground_velocity, mut history, mut contact) in
        &mut query
    {
        if *mode != BallMode::Airborne {
            continue;
        }

        integrate(&mut transform.translation, &mut velocity.0, dt, &tweaks);

        // Cosmetic spin: backspin from horizontal speed, side spin from the
        // lateral component, plus wobble scaled by total speed. Never feeds
        // back into the trajectory.
        let horizontal_speed = Vec2::new(velocity.0.x, velocity.0.z).length();
        transform.rotate_z(-velocity.0.x * tweaks.backspin_factor * dt);
        transform.rotate_x(velocity.0.z * tweaks.backspin_factor * dt);
        transform.rotate_y(horizontal_speed * tweaks.sidespin_factor * dt);
        let jitter = velocity.0.length() * FLIGHT_SPIN_JITTER * dt;
        if jitter > 0.0 {
            transform.rotate_y(rng.gen_range(-jitter..jitter));
        }

        if floor_response(&mut transform.translation, &mut velocity.0, &tweaks) {
            let first_contact = !contact.0;
            contact.0 = true;

            // First touchdown away from both rims with no outcome yet: queue
            // the debounced miss check (the scoring pass gets priority inside
            // the debounce window).
            if first_contact
                && tracker.phase == ShotPhase::Attempted
                && history.len() >= DESCENT_WINDOW
            {
                let clear_of_rims = RimSide::BOTH.iter().all(|&rim| {
                    rim_distance(transform.translation, rim) > MISS_RIM_CLEARANCE
                });
                if clear_of_rims {
                    tracker.schedule_miss_check();
                }
            }

            if at_rest(velocity.0) {
                *mode = BallMode::Grounded;
                velocity.0 = Vec3::ZERO;
                *ground_velocity = GroundVelocity::default();
                transform.translation.y = BALL_REST_HEIGHT;
                contact.0 = false;
                // A ball that dies on the rim without ever bouncing clear
                // still owes an outcome
                if tracker.phase == ShotPhase::Attempted {
                    tracker.schedule_miss_check();
                }
                continue;
            }
        }

        wall_response(&mut transform.translation, &mut velocity.0, &tweaks);

        history.push(transform.translation, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_energy_loss_exact() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(2.0, BALL_REST_HEIGHT - 0.05, 1.0);
        let mut velocity = Vec3::new(3.0, -8.0, -1.5);
        let hit = floor_response(&mut position, &mut velocity, &tweaks);
        assert!(hit);
        assert_eq!(position.y, BALL_REST_HEIGHT);
        assert!((velocity.y - 8.0 * BOUNCE_FACTOR).abs() < 1e-6);
        assert!((velocity.x - 3.0 * BOUNCE_FRICTION).abs() < 1e-6);
        assert!((velocity.z + 1.5 * BOUNCE_FRICTION).abs() < 1e-6);
    }

    #[test]
    fn test_no_floor_response_above_floor() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(0.0, 3.0, 0.0);
        let mut velocity = Vec3::new(1.0, -5.0, 0.0);
        assert!(!floor_response(&mut position, &mut velocity, &tweaks));
        assert_eq!(velocity.y, -5.0);
    }

    #[test]
    fn test_wall_reflection_coefficient() {
        let tweaks = PhysicsTweaks::default();
        let mut position = Vec3::new(COURT_MAX_X + 0.2, 3.0, 0.0);
        let mut velocity = Vec3::new(4.0, 1.0, 0.5);
        wall_response(&mut position, &mut velocity, &tweaks);
        assert_eq!(position.x, COURT_MAX_X);
        assert!((velocity.x + 4.0 * WALL_RESTITUTION).abs() < 1e-6);
        // Untouched axes keep their velocity
        assert_eq!(velocity.y, 1.0);
        assert_eq!(velocity.z, 0.5);
    }

    #[test]
    fn test_gravity_and_drag_integration() {
        let tweaks = PhysicsTweaks::default();
        let dt = 1.0 / 60.0;
        let mut position = Vec3::new(0.0, 5.0, 0.0);
        let mut velocity = Vec3::new(6.0, 2.0, 0.0);
        integrate(&mut position, &mut velocity, dt, &tweaks);

        let expected_vy = (2.0 + GRAVITY * dt) * (1.0 - AIR_RESISTANCE * dt);
        let expected_vx = 6.0 * (1.0 - AIR_RESISTANCE * dt);
        assert!((velocity.y - expected_vy).abs() < 1e-5);
        assert!((velocity.x - expected_vx).abs() < 1e-5);
        assert!(position.y > 5.0); // still rising this step
    }

    #[test]
    fn test_rest_detection() {
        assert!(at_rest(Vec3::new(0.1, 0.2, 0.1)));
        assert!(!at_rest(Vec3::new(0.0, 0.8, 0.0)));
        assert!(!at_rest(Vec3::new(0.6, 0.1, 0.0)));
    }

    #[test]
    fn test_projectile_comes_down() {
        // A lobbed ball must return to the floor within a few seconds
        let tweaks = PhysicsTweaks::default();
        let dt = 1.0 / 60.0;
        let mut position = Vec3::new(0.0, BALL_REST_HEIGHT, 0.0);
        let mut velocity = Vec3::new(4.0, 10.0, 0.0);
        let mut landed = false;
        for _ in 0..(10 * 60) {
            integrate(&mut position, &mut velocity, dt, &tweaks);
            if floor_response(&mut position, &mut velocity, &tweaks) {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }
}
