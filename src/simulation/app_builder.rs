//! Headless App Builder
//!
//! Provides a reusable builder for creating headless Bevy apps for
//! simulation. Used by the trial runner, the scenario tests, and the batch
//! tools. Time advances by a fixed manual step per `App::update`, so trials
//! are deterministic and run as fast as the host allows.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::ball::{
    Ball, BallMode, BouncePhase, FloorContact, FlightVelocity, GroundVelocity, TrajectoryHistory,
    ground_movement, update_flight,
};
use crate::constants::*;
use crate::court::{NetWave, RimSide, animate_net_wave};
use crate::events::{EventBus, update_event_bus_time};
use crate::input::PlayerInput;
use crate::modes::{
    ActiveMode, ball_unfrozen, select_mode, tick_countdown, update_results_display,
};
use crate::scoring::{Score, ShotTracker, check_scoring, resolve_shot_timers};
use crate::shooting::{ShotPower, adjust_shot_power, launch_shot};
use crate::tuning::{GameplayTuning, PhysicsTweaks};

/// Register the physics core on FixedUpdate plus its Update-side support.
/// Shared between the playable binary and headless simulation so the two
/// never drift apart.
pub fn add_core_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            select_mode,
            adjust_shot_power.run_if(ball_unfrozen),
            launch_shot.run_if(ball_unfrozen),
            ground_movement.run_if(ball_unfrozen),
            update_flight,
            check_scoring,
            resolve_shot_timers,
            tick_countdown,
            update_results_display,
        )
            .chain(),
    );
    app.add_systems(Update, (update_event_bus_time, animate_net_wave));
}

/// Spawn the ball and the two rim entities the core expects
pub fn spawn_core_entities(world: &mut World, ball_at: Vec3) {
    world.spawn((
        Ball,
        Transform::from_translation(ball_at),
        BallMode::default(),
        GroundVelocity::default(),
        FlightVelocity::default(),
        BouncePhase::default(),
        TrajectoryHistory::default(),
        FloorContact::default(),
    ));
    for rim in RimSide::BOTH {
        world.spawn((rim, NetWave::default(), Transform::from_translation(rim.center())));
    }
}

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    ball_at: Vec3,
    mode_index: usize,
    tuning: Option<GameplayTuning>,
    minimal_threads: bool,
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            ball_at: BALL_SPAWN,
            mode_index: crate::modes::FREE_SHOOT,
            tuning: None,
            minimal_threads: false,
        }
    }

    /// Place the ball somewhere other than the spawn point
    pub fn with_ball_at(mut self, position: Vec3) -> Self {
        self.ball_at = position;
        self
    }

    /// Start in a specific game mode
    pub fn with_mode(mut self, index: usize) -> Self {
        self.mode_index = index;
        self
    }

    /// Override gameplay tuning (defaults come from constants, not the
    /// config file, so trials are reproducible)
    pub fn with_tuning(mut self, tuning: GameplayTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS
    /// thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Build the app with minimal plugins, core resources, core systems,
    /// and the ball/rim entities spawned.
    pub fn build(self) -> App {
        let mut app = App::new();

        if self.minimal_threads {
            app.add_plugins(
                MinimalPlugins
                    .set(ScheduleRunnerPlugin::run_once())
                    .set(TaskPoolPlugin {
                        task_pool_options: TaskPoolOptions::with_num_threads(1),
                    }),
            );
        } else {
            app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()));
        }

        // One fixed physics tick per App::update, deterministic
        let step = Duration::from_secs_f64(1.0 / PHYSICS_TICK_HZ);
        app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_TICK_HZ));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

        let mut tweaks = PhysicsTweaks::default();
        if let Some(tuning) = &self.tuning {
            tuning.apply_to(&mut tweaks);
        }
        app.insert_resource(tweaks);

        app.init_resource::<PlayerInput>();
        app.init_resource::<Score>();
        app.init_resource::<ShotTracker>();
        app.init_resource::<ShotPower>();
        app.insert_resource(EventBus::new());

        let mut active = ActiveMode::default();
        active.select(self.mode_index);
        app.insert_resource(active);

        add_core_systems(&mut app);
        spawn_core_entities(app.world_mut(), self.ball_at);

        app
    }
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<Score>());
        assert!(app.world().contains_resource::<ShotTracker>());
        assert!(app.world().contains_resource::<PhysicsTweaks>());
    }

    #[test]
    fn test_minimal_threads_creates_app() {
        let app = HeadlessAppBuilder::new().with_minimal_threads().build();
        assert!(app.world().contains_resource::<Score>());
    }

    #[test]
    fn test_mode_preselected() {
        let app = HeadlessAppBuilder::new().with_mode(1).build();
        let active = app.world().resource::<ActiveMode>();
        assert!(active.mode().three_point_only);
    }

    #[test]
    fn test_dribble_idle_ball_stays_put() {
        let mut app = HeadlessAppBuilder::new().build();
        for _ in 0..120 {
            app.update();
        }
        let mut query = app.world_mut().query_filtered::<&Transform, With<Ball>>();
        let transform = query.single(app.world()).unwrap();
        assert_eq!(transform.translation, BALL_SPAWN);
    }

    #[test]
    fn test_timed_challenge_expires_and_reverts() {
        use crate::events::GameEvent;
        use crate::modes::FREE_SHOOT;

        let mut app = HeadlessAppBuilder::new().with_mode(2).build();

        // A whole challenge worth of ticks, plus slack for the last second
        let challenge_ticks = (TIMED_CHALLENGE_SECS as f64 * PHYSICS_TICK_HZ) as u32 + 10;
        for _ in 0..challenge_ticks {
            app.update();
        }
        {
            let active = app.world().resource::<ActiveMode>();
            assert!(active.frozen, "challenge should freeze at zero");
            assert!(active.last_result.is_some());
        }
        {
            let bus = app.world().resource::<EventBus>();
            let ticks = bus
                .peek()
                .iter()
                .filter(|e| matches!(e.event, GameEvent::CountdownTick { .. }))
                .count();
            assert_eq!(ticks, TIMED_CHALLENGE_SECS as usize);
            assert!(
                bus.peek()
                    .iter()
                    .any(|e| matches!(e.event, GameEvent::ChallengeEnd { .. }))
            );
        }

        // Ball frozen at the reset pose while results display
        let mut query = app.world_mut().query_filtered::<&Transform, With<Ball>>();
        let transform = query.single(app.world()).unwrap();
        assert_eq!(transform.translation, BALL_SPAWN);

        // After the results delay the mode reverts to free shoot
        let results_ticks = (RESULTS_DISPLAY_SECS as f64 * PHYSICS_TICK_HZ) as u32 + 10;
        for _ in 0..results_ticks {
            app.update();
        }
        let active = app.world().resource::<ActiveMode>();
        assert_eq!(active.index, FREE_SHOOT);
        assert!(!active.frozen);
    }
}
