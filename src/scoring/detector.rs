//! Scoring detector
//!
//! Inspects the airborne ball against each rim every tick: a tight
//! near-center pass at rim height on a descending trajectory is a make.
//! The looser net-wave band is purely cosmetic and fires independently.

use bevy::prelude::*;

use crate::ball::{Ball, BallMode, TrajectoryHistory};
use crate::constants::*;
use crate::court::{NetWave, RimSide, rim_distance};
use crate::events::{EventBus, GameEvent};
use crate::modes::ActiveMode;
use crate::scoring::outcome::{ShotPhase, ShotTracker};
use crate::scoring::Score;
use crate::tuning::PhysicsTweaks;

/// Pure scoring-band test for one rim, exposed for the offline tools
pub fn scoring_pass(position: Vec3, rim: RimSide) -> bool {
    (position.y - RIM_HEIGHT).abs() < SCORE_HEIGHT_BAND
        && rim_distance(position, rim) < SCORE_RADIUS
}

/// Check the ball against both rims and record a make when one connects
pub fn check_scoring(
    tweaks: Res<PhysicsTweaks>,
    active: Res<ActiveMode>,
    mut tracker: ResMut<ShotTracker>,
    mut score: ResMut<Score>,
    mut bus: ResMut<EventBus>,
    ball: Query<(&Transform, &TrajectoryHistory, &BallMode), With<Ball>>,
    mut nets: Query<(&RimSide, &mut NetWave)>,
) {
    let Ok((transform, history, mode)) = ball.single() else {
        return;
    };
    if *mode != BallMode::Airborne {
        return;
    }
    let position = transform.translation;

    for (&rim, mut wave) in &mut nets {
        let distance = rim_distance(position, rim);

        // Cosmetic net brush, independent of scoring
        if (position.y - RIM_HEIGHT).abs() < tweaks.net_height_band
            && distance < NET_TRIGGER_RADIUS
            && !wave.is_active()
        {
            wave.trigger();
            bus.emit(GameEvent::NetWave { rim });
        }

        if tracker.phase != ShotPhase::Attempted {
            continue;
        }
        if !scoring_pass(position, rim) || !history.is_descending() {
            continue;
        }

        // Three-pointer iff the shot origin was beyond the arc of the
        // target rim, never the landing point
        let three = tracker.beyond_arc;
        let points = if three { 3 } else { 2 };
        let shot_id = tracker.shot_id;
        if !tracker.record_make(points) {
            continue;
        }
        score.add(rim.team(), points);
        if !wave.is_active() {
            wave.trigger();
            bus.emit(GameEvent::NetWave { rim });
        }
        bus.emit(GameEvent::ShotMade {
            shot_id,
            rim,
            points,
            three,
        });
        info!(
            "Shot {} made for {} points ({} rim). Home {} - Away {}",
            shot_id, points, rim, score.home, score.away
        );

        if active.is_free_shoot() {
            // Keep shooting from wherever the ball lands
            tracker.schedule_outcome_clear();
        } else {
            tracker.schedule_made_reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::FlightVelocity;
    use crate::simulation::HeadlessAppBuilder;

    /// Put the headless ball in a descending line just above a rim with an
    /// open shot on the tracker, then step until the pass registers.
    fn run_rim_drop(origin: Vec3, beyond: bool) -> bevy::app::App {
        let mut app = HeadlessAppBuilder::new().build();
        app.world_mut()
            .resource_mut::<ShotTracker>()
            .begin_shot(origin, RimSide::Right, beyond);

        let rim = RimSide::Right.center();
        let mut query = app
            .world_mut()
            .query_filtered::<(&mut Transform, &mut BallMode, &mut FlightVelocity), With<Ball>>();
        let (mut transform, mut mode, mut velocity) =
            query.single_mut(app.world_mut()).unwrap();
        transform.translation = Vec3::new(rim.x, RIM_HEIGHT + 0.3, rim.z);
        *mode = BallMode::Airborne;
        velocity.0 = Vec3::new(0.0, -3.0, 0.0);

        for _ in 0..30 {
            app.update();
            if app.world().resource::<ShotTracker>().phase == ShotPhase::Made {
                break;
            }
        }
        app
    }

    #[test]
    fn test_descending_rim_pass_scores_two_for_home() {
        let app = run_rim_drop(Vec3::new(10.0, BALL_REST_HEIGHT, 0.0), false);
        let tracker = app.world().resource::<ShotTracker>();
        assert_eq!(tracker.phase, ShotPhase::Made);
        assert_eq!(tracker.made, 1);
        assert_eq!(tracker.points, 2);
        let score = app.world().resource::<Score>();
        assert_eq!(score.home, 2);
        assert_eq!(score.away, 0);
    }

    #[test]
    fn test_beyond_arc_origin_scores_three() {
        let app = run_rim_drop(Vec3::new(7.0, BALL_REST_HEIGHT, 0.0), true);
        let tracker = app.world().resource::<ShotTracker>();
        assert_eq!(tracker.points, 3);
        assert_eq!(app.world().resource::<Score>().home, 3);
    }

    #[test]
    fn test_made_shot_never_also_misses() {
        let mut app = run_rim_drop(Vec3::new(10.0, BALL_REST_HEIGHT, 0.0), false);
        // Let the ball fall to the floor and come to rest
        for _ in 0..600 {
            app.update();
        }
        let tracker = app.world().resource::<ShotTracker>();
        assert_eq!(tracker.attempts, 1);
        assert_eq!(tracker.made, 1);
        let bus = app.world().resource::<EventBus>();
        let missed = bus
            .processed()
            .iter()
            .chain(bus.peek())
            .filter(|e| matches!(e.event, GameEvent::ShotMissed { .. }))
            .count();
        assert_eq!(missed, 0);
    }

    #[test]
    fn test_scoring_pass_at_rim_center() {
        let rim = RimSide::Right;
        let center = rim.center();
        assert!(scoring_pass(Vec3::new(center.x, RIM_HEIGHT, center.z), rim));
        assert!(scoring_pass(
            Vec3::new(center.x + 0.3, RIM_HEIGHT - 0.2, center.z),
            rim
        ));
    }

    #[test]
    fn test_scoring_pass_rejects_wide_or_high() {
        let rim = RimSide::Right;
        let center = rim.center();
        // Inside the rim radius but outside the tighter scoring radius
        assert!(!scoring_pass(
            Vec3::new(center.x + 0.6, RIM_HEIGHT, center.z),
            rim
        ));
        assert!(!scoring_pass(
            Vec3::new(center.x, RIM_HEIGHT + 0.5, center.z),
            rim
        ));
    }
}
