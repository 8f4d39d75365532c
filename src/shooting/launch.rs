//! Shot launcher
//!
//! Converts shot power plus ball/rim geometry into an initial flight
//! velocity. The angle bands are a deliberate piecewise approximation
//! tuned for gameplay feel, not the exact optimal-angle formula.

use bevy::prelude::*;

use crate::ball::{Ball, BallMode, FloorContact, FlightVelocity, TrajectoryHistory};
use crate::constants::*;
use crate::court::{RimSide, beyond_arc, nearest_rim, rim_distance};
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;
use crate::modes::ActiveMode;
use crate::scoring::ShotTracker;
use crate::shooting::ShotPower;
use crate::tuning::PhysicsTweaks;

/// Everything decided at the moment of launch
#[derive(Debug, Clone, Copy)]
pub struct LaunchPlan {
    pub target: RimSide,
    pub velocity: Vec3,
    pub beyond_arc: bool,
    pub distance: f32,
    pub angle_deg: f32,
    pub speed: f32,
}

/// Map power [0,100] linearly onto the factor range, with a raised floor at
/// close range so point-blank shots always have the arc to reach rim height.
pub fn power_factor(power: u8, distance: f32, tweaks: &PhysicsTweaks) -> f32 {
    let t = power.min(100) as f32 / 100.0;
    let factor = tweaks.power_factor_min + (tweaks.power_factor_max - tweaks.power_factor_min) * t;
    let floor = if distance < POINT_BLANK_DIST {
        POINT_BLANK_FLOOR
    } else if distance < CLOSE_RANGE_DIST {
        CLOSE_RANGE_FLOOR
    } else {
        tweaks.power_factor_min
    };
    factor.max(floor)
}

/// Vertical launch angle by distance band: steeper close in, flattening with
/// range, capped near vertical.
pub fn launch_angle_deg(distance: f32) -> f32 {
    let banded = if distance < 1.5 {
        82.0
    } else if distance < 3.0 {
        74.0
    } else if distance < 5.0 {
        66.0
    } else if distance < 8.0 {
        58.0
    } else if distance < 12.0 {
        52.0
    } else {
        48.0
    };
    banded.min(MAX_LAUNCH_ANGLE_DEG)
}

/// Compute the launch velocity for a shot from `origin` at the nearer rim
pub fn plan_launch(origin: Vec3, power: u8, tweaks: &PhysicsTweaks) -> LaunchPlan {
    let target = nearest_rim(origin);
    let rim_center = target.center();
    let distance = rim_distance(origin, target);

    let flat = Vec3::new(rim_center.x - origin.x, 0.0, rim_center.z - origin.z);
    let dir = if flat.length_squared() > 1e-6 {
        flat.normalize()
    } else {
        Vec3::ZERO // directly under the rim: straight up
    };

    let factor = power_factor(power, distance, tweaks);
    let speed = tweaks.shot_base_speed * factor;
    let angle_deg = launch_angle_deg(distance);
    let angle = angle_deg.to_radians();

    // Height compensation so awkward release heights still reach the rim;
    // the coefficient shrinks with distance.
    let gap = (rim_center.y - origin.y).max(0.0);
    let boost = gap * tweaks.height_comp_factor / (1.0 + distance * tweaks.height_comp_falloff);

    let velocity = Vec3::new(
        dir.x * speed * angle.cos(),
        speed * angle.sin() + boost,
        dir.z * speed * angle.cos(),
    );

    LaunchPlan {
        target,
        velocity,
        beyond_arc: beyond_arc(origin, target),
        distance,
        angle_deg,
        speed,
    }
}

/// Execute a shoot action: validate against the active mode, then put the
/// ball in flight and open a new shot on the tracker.
pub fn launch_shot(
    mut input: ResMut<PlayerInput>,
    power: Res<ShotPower>,
    tweaks: Res<PhysicsTweaks>,
    active: Res<ActiveMode>,
    mut tracker: ResMut<ShotTracker>,
    mut bus: ResMut<EventBus>,
    mut ball: Query<
        (
            &Transform,
            &mut FlightVelocity,
            &mut BallMode,
            &mut TrajectoryHistory,
            &mut FloorContact,
        ),
        With<Ball>,
    >,
) {
    if !input.shoot_pressed {
        return;
    }
    input.shoot_pressed = false;

    let Ok((transform, mut velocity, mut mode, mut history, mut contact)) = ball.single_mut()
    else {
        return;
    };
    // Can't shoot a ball that is already in the air
    if *mode != BallMode::Grounded {
        return;
    }

    let origin = transform.translation;
    let plan = plan_launch(origin, power.0, &tweaks);

    if active.mode().three_point_only && !plan.beyond_arc {
        bus.emit(GameEvent::InvalidShot {
            message: "Three-pointers only! Step behind the arc.".to_string(),
        });
        return;
    }

    velocity.0 = plan.velocity;
    *mode = BallMode::Airborne;
    history.clear();
    contact.0 = false;

    let shot_id = tracker.begin_shot(origin, plan.target, plan.beyond_arc);
    bus.emit(GameEvent::ShotAttempt {
        shot_id,
        origin: (origin.x, origin.y, origin.z),
        power: power.0,
        beyond_arc: plan.beyond_arc,
    });
    info!(
        "Shot {}: power {} at {} rim, {:.1} out{}",
        shot_id,
        power.0,
        plan.target,
        plan.distance,
        if plan.beyond_arc { " (three)" } else { "" }
    );
}
