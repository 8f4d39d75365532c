//! Game modes and the timed-challenge lifecycle
//!
//! Modes are immutable descriptors; `ActiveMode` is the process-wide
//! selection plus the 1 Hz countdown state. Mode switching resets all
//! counters and timers unconditionally.

use bevy::prelude::*;

use crate::ball::{
    Ball, BallMode, BouncePhase, FloorContact, FlightVelocity, GroundVelocity, TrajectoryHistory,
};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::input::PlayerInput;
use crate::scoring::Score;
use crate::scoring::outcome::{ShotPhase, ShotTracker};
use crate::shooting::ShotPower;

/// Immutable mode descriptor
#[derive(Debug, Clone, Copy)]
pub struct GameMode {
    pub name: &'static str,
    pub time_limit: Option<u32>,
    pub three_point_only: bool,
}

pub const MODES: [GameMode; 4] = [
    GameMode {
        name: "free-shoot",
        time_limit: None,
        three_point_only: false,
    },
    GameMode {
        name: "three-pointers-only",
        time_limit: None,
        three_point_only: true,
    },
    GameMode {
        name: "timed-challenge",
        time_limit: Some(TIMED_CHALLENGE_SECS),
        three_point_only: false,
    },
    GameMode {
        name: "three-point-challenge",
        time_limit: Some(THREE_POINT_CHALLENGE_SECS),
        three_point_only: true,
    },
];

pub const FREE_SHOOT: usize = 0;

/// Running 1 Hz countdown for a timed mode
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    pub remaining: u32,
    tick_accum: f32,
}

/// Whole-second ticks produced by one countdown advance
#[derive(Debug, Default, PartialEq)]
pub struct CountdownStep {
    /// `remaining` values crossed this advance, newest last
    pub ticks: Vec<u32>,
    pub finished: bool,
}

/// Final numbers shown after a timed challenge
#[derive(Debug, Clone, Copy)]
pub struct ChallengeResult {
    pub mode_index: usize,
    pub points: u32,
    pub attempts: u32,
    pub made: u32,
    pub accuracy: f32,
    pub new_best: bool,
}

/// Process-wide mode selection state
#[derive(Resource)]
pub struct ActiveMode {
    pub index: usize,
    pub countdown: Option<Countdown>,
    /// Ball and input are ignored while frozen (challenge results on screen)
    pub frozen: bool,
    pub results_timer: Option<f32>,
    pub bests: [u32; MODES.len()],
    pub last_result: Option<ChallengeResult>,
}

impl Default for ActiveMode {
    fn default() -> Self {
        Self {
            index: FREE_SHOOT,
            countdown: None,
            frozen: false,
            results_timer: None,
            bests: [0; MODES.len()],
            last_result: None,
        }
    }
}

impl ActiveMode {
    pub fn mode(&self) -> &'static GameMode {
        &MODES[self.index]
    }

    pub fn is_free_shoot(&self) -> bool {
        self.index == FREE_SHOOT
    }

    /// Switch to a mode, restarting its countdown if timed. Counter resets
    /// happen in `select_mode`, which owns the other resources.
    pub fn select(&mut self, index: usize) {
        self.index = index.min(MODES.len() - 1);
        self.frozen = false;
        self.results_timer = None;
        self.last_result = None;
        self.countdown = self.mode().time_limit.map(|limit| Countdown {
            remaining: limit,
            tick_accum: 0.0,
        });
    }

    /// Advance the countdown, collecting every whole-second tick crossed
    pub fn advance_countdown(&mut self, dt: f32) -> CountdownStep {
        let mut step = CountdownStep::default();
        let Some(countdown) = &mut self.countdown else {
            return step;
        };
        if self.frozen {
            return step;
        }

        countdown.tick_accum += dt;
        while countdown.tick_accum >= 1.0 && countdown.remaining > 0 {
            countdown.tick_accum -= 1.0;
            countdown.remaining -= 1;
            step.ticks.push(countdown.remaining);
            if countdown.remaining == 0 {
                step.finished = true;
                break;
            }
        }
        step
    }

    /// Record a finished challenge, updating the stored best
    pub fn finish_challenge(&mut self, tracker: &ShotTracker) -> ChallengeResult {
        let new_best = tracker.points > self.bests[self.index];
        if new_best {
            self.bests[self.index] = tracker.points;
        }
        let result = ChallengeResult {
            mode_index: self.index,
            points: tracker.points,
            attempts: tracker.attempts,
            made: tracker.made,
            accuracy: tracker.accuracy(),
            new_best,
        };
        self.countdown = None;
        self.frozen = true;
        self.results_timer = Some(RESULTS_DISPLAY_SECS);
        self.last_result = Some(result);
        result
    }
}

/// Run condition: ball responds to input (no challenge-results freeze)
pub fn ball_unfrozen(active: Res<ActiveMode>) -> bool {
    !active.frozen
}

/// Query shape shared by every system that re-poses the ball
pub type BallReset = (
    &'static mut Transform,
    &'static mut BallMode,
    &'static mut GroundVelocity,
    &'static mut FlightVelocity,
    &'static mut BouncePhase,
    &'static mut TrajectoryHistory,
    &'static mut FloorContact,
);

/// Put the ball back at its spawn pose and drop all motion state
pub fn reset_ball_pose(
    (transform, mode, ground, flight, phase, history, contact): &mut (
        Mut<Transform>,
        Mut<BallMode>,
        Mut<GroundVelocity>,
        Mut<FlightVelocity>,
        Mut<BouncePhase>,
        Mut<TrajectoryHistory>,
        Mut<FloorContact>,
    ),
) {
    transform.translation = BALL_SPAWN;
    transform.rotation = Quat::IDENTITY;
    **mode = BallMode::Grounded;
    **ground = GroundVelocity::default();
    flight.0 = Vec3::ZERO;
    phase.0 = 0.0;
    history.clear();
    contact.0 = false;
}

/// Handle mode selection and the explicit reset action
pub fn select_mode(
    mut input: ResMut<PlayerInput>,
    mut active: ResMut<ActiveMode>,
    mut tracker: ResMut<ShotTracker>,
    mut score: ResMut<Score>,
    mut power: ResMut<ShotPower>,
    mut bus: ResMut<EventBus>,
    mut ball: Query<BallReset, With<Ball>>,
) {
    let reset_pressed = input.reset_pressed;
    input.reset_pressed = false;

    if let Some(index) = input.mode_select.take() {
        active.select(index);
        tracker.reset_counters();
        score.reset();
        power.reset();
        if let Ok(mut components) = ball.single_mut() {
            reset_ball_pose(&mut components);
        }
        bus.emit(GameEvent::ModeSelect {
            mode: active.mode().name.to_string(),
        });
        if let Some(limit) = active.mode().time_limit {
            bus.emit(GameEvent::ChallengeStart {
                mode: active.mode().name.to_string(),
                time_limit: limit,
            });
        }
        info!("Mode selected: {}", active.mode().name);
        return;
    }

    if reset_pressed && !active.frozen {
        // A shot still in the air with no outcome counts as a miss
        if tracker.phase == ShotPhase::Attempted {
            let shot_id = tracker.shot_id;
            if tracker.record_miss() {
                bus.emit(GameEvent::ShotMissed { shot_id });
            }
        }
        tracker.clear_outcome();
        tracker.cancel_pending();
        power.reset();
        if let Ok(mut components) = ball.single_mut() {
            reset_ball_pose(&mut components);
        }
        bus.emit(GameEvent::BallReset);
    }
}

/// Advance the 1 Hz countdown of a timed mode
pub fn tick_countdown(
    time: Res<Time>,
    mut active: ResMut<ActiveMode>,
    mut tracker: ResMut<ShotTracker>,
    mut power: ResMut<ShotPower>,
    mut input: ResMut<PlayerInput>,
    mut bus: ResMut<EventBus>,
    mut ball: Query<BallReset, With<Ball>>,
) {
    let step = active.advance_countdown(time.delta_secs());
    for remaining in &step.ticks {
        bus.emit(GameEvent::CountdownTick {
            remaining: *remaining,
        });
    }

    if step.finished {
        // Time expired: an undecided shot is a miss before totals are read
        if tracker.phase == ShotPhase::Attempted {
            let shot_id = tracker.shot_id;
            if tracker.record_miss() {
                bus.emit(GameEvent::ShotMissed { shot_id });
            }
        }
        tracker.cancel_pending();

        let result = active.finish_challenge(&tracker);
        bus.emit(GameEvent::ChallengeEnd {
            mode: MODES[result.mode_index].name.to_string(),
            points: result.points,
            attempts: result.attempts,
            made: result.made,
            accuracy: result.accuracy,
            new_best: result.new_best,
        });
        info!(
            "Challenge over: {} pts, {}/{} made{}",
            result.points,
            result.made,
            result.attempts,
            if result.new_best { " (new best!)" } else { "" }
        );

        // Freeze the ball at the reset pose while results are on screen
        if let Ok(mut components) = ball.single_mut() {
            reset_ball_pose(&mut components);
        }
        power.reset();
        input.clear_presses();
    }
}

/// Count down the results display, then revert to free shoot
pub fn update_results_display(
    time: Res<Time>,
    mut active: ResMut<ActiveMode>,
    mut tracker: ResMut<ShotTracker>,
    mut score: ResMut<Score>,
    mut input: ResMut<PlayerInput>,
    mut bus: ResMut<EventBus>,
) {
    let Some(timer) = &mut active.results_timer else {
        return;
    };
    *timer -= time.delta_secs();
    if *timer > 0.0 {
        return;
    }

    // Presses buffered while frozen must not fire into the fresh mode
    input.clear_presses();
    active.select(FREE_SHOOT);
    tracker.reset_counters();
    score.reset();
    bus.emit(GameEvent::ModeSelect {
        mode: MODES[FREE_SHOOT].name.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_ticks_finish_timed_challenge() {
        let mut active = ActiveMode::default();
        active.select(2); // timed-challenge
        assert_eq!(active.countdown.unwrap().remaining, TIMED_CHALLENGE_SECS);

        let dt = 1.0 / 60.0;
        let mut finished = false;
        let mut tick_count = 0;
        // 61 simulated seconds of frames
        for _ in 0..(61 * 60) {
            let step = active.advance_countdown(dt);
            tick_count += step.ticks.len();
            if step.finished {
                finished = true;
                break;
            }
        }
        assert!(finished);
        assert_eq!(tick_count, TIMED_CHALLENGE_SECS as usize);
    }

    #[test]
    fn test_untimed_modes_never_tick() {
        let mut active = ActiveMode::default();
        active.select(FREE_SHOOT);
        let step = active.advance_countdown(10.0);
        assert!(step.ticks.is_empty());
        assert!(!step.finished);
    }

    #[test]
    fn test_select_restarts_countdown_and_unfreezes() {
        let mut active = ActiveMode::default();
        active.select(3);
        active.frozen = true;
        active.results_timer = Some(2.0);
        active.select(3);
        assert!(!active.frozen);
        assert!(active.results_timer.is_none());
        assert_eq!(
            active.countdown.unwrap().remaining,
            THREE_POINT_CHALLENGE_SECS
        );
    }

    #[test]
    fn test_frozen_countdown_holds() {
        let mut active = ActiveMode::default();
        active.select(2);
        active.frozen = true;
        let step = active.advance_countdown(5.0);
        assert!(step.ticks.is_empty());
        assert_eq!(active.countdown.unwrap().remaining, TIMED_CHALLENGE_SECS);
    }

    #[test]
    fn test_finish_challenge_records_best() {
        let mut active = ActiveMode::default();
        active.select(2);

        let mut tracker = ShotTracker::default();
        tracker.attempts = 10;
        tracker.made = 6;
        tracker.points = 13;

        let result = active.finish_challenge(&tracker);
        assert!(result.new_best);
        assert_eq!(active.bests[2], 13);
        assert!(active.frozen);
        assert_eq!(active.results_timer, Some(RESULTS_DISPLAY_SECS));

        // A worse run later is not a new best
        active.select(2);
        let mut worse = ShotTracker::default();
        worse.points = 9;
        let result = active.finish_challenge(&worse);
        assert!(!result.new_best);
        assert_eq!(active.bests[2], 13);
    }

    #[test]
    fn test_three_point_flags() {
        assert!(!MODES[FREE_SHOOT].three_point_only);
        assert!(MODES[1].three_point_only);
        assert!(!MODES[2].three_point_only);
        assert!(MODES[3].three_point_only);
    }
}
