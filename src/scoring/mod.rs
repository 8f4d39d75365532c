//! Scoring module - team score, rim-pass detection, and shot outcomes

pub mod detector;
pub mod outcome;

pub use detector::check_scoring;
pub use outcome::{DueAction, ShotPhase, ShotTracker};

use bevy::prelude::*;

use crate::court::Team;
use crate::events::{EventBus, GameEvent};
use crate::modes::{ActiveMode, BallReset, reset_ball_pose};
use crate::shooting::ShotPower;
use crate::ball::Ball;

/// Score resource tracking home/away totals
#[derive(Resource, Default)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn add(&mut self, team: Team, points: u32) {
        match team {
            Team::Home => self.home += points,
            Team::Away => self.away += points,
        }
    }

    pub fn reset(&mut self) {
        self.home = 0;
        self.away = 0;
    }
}

/// Resolve pending shot actions whose timers came due this tick.
/// Every application re-checks the tracker phase, so an action scheduled
/// under conditions that no longer hold is a silent no-op.
pub fn resolve_shot_timers(
    time: Res<Time>,
    mut tracker: ResMut<ShotTracker>,
    mut power: ResMut<ShotPower>,
    active: Res<ActiveMode>,
    mut bus: ResMut<EventBus>,
    mut ball: Query<BallReset, With<Ball>>,
) {
    for action in tracker.tick_pending(time.delta_secs()) {
        match action {
            DueAction::MissCheck => {
                let shot_id = tracker.shot_id;
                if tracker.record_miss() {
                    bus.emit(GameEvent::ShotMissed { shot_id });
                    tracker.schedule_outcome_clear();
                    info!("Shot {} missed", shot_id);
                }
            }
            DueAction::OutcomeClear => {
                if matches!(tracker.phase, ShotPhase::Made | ShotPhase::Missed) {
                    tracker.clear_outcome();
                }
            }
            DueAction::MadeReset => {
                if tracker.phase == ShotPhase::Made {
                    tracker.clear_outcome();
                    if let Ok(mut components) = ball.single_mut() {
                        reset_ball_pose(&mut components);
                    }
                    // ShotPower resets on ball reset; the free-shoot
                    // keep-shooting path never schedules a MadeReset
                    if !active.is_free_shoot() {
                        power.reset();
                    }
                    bus.emit(GameEvent::BallReset);
                }
            }
        }
    }
}
