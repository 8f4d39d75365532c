//! Per-shot outcome state machine
//!
//! One `ShotTracker` resource owns everything about the shot in progress:
//! its id, phase, origin, and any deferred work. The original game spread
//! this across global flags and ad hoc timers; here every deferred mutation
//! is a `PendingAction` stamped with the shot id it was scheduled for, and
//! resolution re-checks that stamp so a stale action can never touch a newer
//! shot.

use bevy::prelude::*;

use crate::constants::*;
use crate::court::RimSide;

/// Lifecycle of a single shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShotPhase {
    #[default]
    Idle,
    Attempted,
    Made,
    Missed,
}

/// A deferred mutation keyed by the shot it belongs to
#[derive(Debug, Clone, Copy)]
pub struct PendingAction {
    pub shot_id: u32,
    pub timer: f32,
}

/// Deferred work that has come due and passed its id guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueAction {
    /// Debounced first-bounce miss check
    MissCheck,
    /// Outcome display auto-clear back to Idle
    OutcomeClear,
    /// Full ball reset after a make (non-free modes)
    MadeReset,
}

/// Shot bookkeeping and pending-action state
#[derive(Resource, Debug, Default)]
pub struct ShotTracker {
    pub shot_id: u32,
    pub phase: ShotPhase,
    pub origin: Vec3,
    pub target: Option<RimSide>,
    pub beyond_arc: bool,
    pub attempts: u32,
    pub made: u32,
    pub points: u32,
    miss_check: Option<PendingAction>,
    outcome_clear: Option<PendingAction>,
    made_reset: Option<PendingAction>,
}

impl ShotTracker {
    /// Accept a shoot action: new shot id, attempt counted, outcome reset,
    /// every stale pending action cancelled.
    pub fn begin_shot(&mut self, origin: Vec3, target: RimSide, beyond_arc: bool) -> u32 {
        self.shot_id = self.shot_id.wrapping_add(1);
        self.phase = ShotPhase::Attempted;
        self.origin = origin;
        self.target = Some(target);
        self.beyond_arc = beyond_arc;
        self.attempts += 1;
        self.cancel_pending();
        self.shot_id
    }

    /// Record a make. No-op unless the shot is still undecided.
    pub fn record_make(&mut self, points: u32) -> bool {
        if self.phase != ShotPhase::Attempted {
            return false;
        }
        self.phase = ShotPhase::Made;
        self.made += 1;
        self.points += points;
        // A landed make invalidates any in-flight miss check
        self.miss_check = None;
        true
    }

    /// Record a miss. No-op unless the shot is still undecided.
    pub fn record_miss(&mut self) -> bool {
        if self.phase != ShotPhase::Attempted {
            return false;
        }
        self.phase = ShotPhase::Missed;
        true
    }

    /// Schedule the debounced miss check for the current shot.
    /// Does nothing if one is already in flight or the shot is decided.
    pub fn schedule_miss_check(&mut self) {
        if self.phase == ShotPhase::Attempted && self.miss_check.is_none() {
            self.miss_check = Some(PendingAction {
                shot_id: self.shot_id,
                timer: MISS_DEBOUNCE_SECS,
            });
        }
    }

    pub fn schedule_outcome_clear(&mut self) {
        self.outcome_clear = Some(PendingAction {
            shot_id: self.shot_id,
            timer: OUTCOME_CLEAR_SECS,
        });
    }

    pub fn schedule_made_reset(&mut self) {
        self.made_reset = Some(PendingAction {
            shot_id: self.shot_id,
            timer: MADE_RESET_SECS,
        });
    }

    /// Drop every pending action (new shot, mode switch, explicit reset)
    pub fn cancel_pending(&mut self) {
        self.miss_check = None;
        self.outcome_clear = None;
        self.made_reset = None;
    }

    /// Clear the displayed outcome back to Idle
    pub fn clear_outcome(&mut self) {
        self.phase = ShotPhase::Idle;
    }

    /// Wipe counters and shot state (mode switch, challenge start)
    pub fn reset_counters(&mut self) {
        self.phase = ShotPhase::Idle;
        self.origin = Vec3::ZERO;
        self.target = None;
        self.beyond_arc = false;
        self.attempts = 0;
        self.made = 0;
        self.points = 0;
        self.cancel_pending();
    }

    pub fn accuracy(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32
        }
    }

    /// Advance pending timers by `dt` and collect the actions that came due
    /// for the *current* shot. Actions stamped with an older shot id are
    /// silently dropped.
    pub fn tick_pending(&mut self, dt: f32) -> Vec<DueAction> {
        let mut due = Vec::new();
        let current = self.shot_id;

        for (slot, action) in [
            (&mut self.miss_check, DueAction::MissCheck),
            (&mut self.outcome_clear, DueAction::OutcomeClear),
            (&mut self.made_reset, DueAction::MadeReset),
        ] {
            if let Some(pending) = slot {
                pending.timer -= dt;
                if pending.timer <= 0.0 {
                    let stamped = pending.shot_id;
                    *slot = None;
                    if stamped == current {
                        due.push(action);
                    }
                }
            }
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempted_tracker() -> ShotTracker {
        let mut tracker = ShotTracker::default();
        tracker.begin_shot(Vec3::new(0.0, BALL_REST_HEIGHT, 0.0), RimSide::Right, false);
        tracker
    }

    #[test]
    fn test_exactly_one_outcome_make_first() {
        let mut tracker = attempted_tracker();
        assert!(tracker.record_make(2));
        assert!(!tracker.record_miss());
        assert!(!tracker.record_make(2));
        assert_eq!(tracker.made, 1);
        assert_eq!(tracker.points, 2);
        assert_eq!(tracker.attempts, 1);
    }

    #[test]
    fn test_exactly_one_outcome_miss_first() {
        let mut tracker = attempted_tracker();
        assert!(tracker.record_miss());
        assert!(!tracker.record_make(3));
        assert_eq!(tracker.made, 0);
        assert_eq!(tracker.points, 0);
    }

    #[test]
    fn test_make_cancels_pending_miss_check() {
        let mut tracker = attempted_tracker();
        tracker.schedule_miss_check();
        tracker.record_make(2);
        // The debounce window elapses, but the make already landed
        let due = tracker.tick_pending(MISS_DEBOUNCE_SECS + 0.01);
        assert!(!due.contains(&DueAction::MissCheck));
        assert_eq!(tracker.phase, ShotPhase::Made);
    }

    #[test]
    fn test_stale_action_dropped_after_new_shot() {
        let mut tracker = attempted_tracker();
        tracker.schedule_miss_check();
        // A new shot starts before the debounce expires
        tracker.begin_shot(Vec3::ZERO, RimSide::Left, true);
        let due = tracker.tick_pending(1.0);
        assert!(due.is_empty());
        assert_eq!(tracker.phase, ShotPhase::Attempted);
    }

    #[test]
    fn test_miss_check_fires_when_undisturbed() {
        let mut tracker = attempted_tracker();
        tracker.schedule_miss_check();
        assert!(tracker.tick_pending(0.05).is_empty());
        let due = tracker.tick_pending(0.06);
        assert_eq!(due, vec![DueAction::MissCheck]);
    }

    #[test]
    fn test_duplicate_schedule_does_not_restart_debounce() {
        let mut tracker = attempted_tracker();
        tracker.schedule_miss_check();
        tracker.tick_pending(0.08);
        tracker.schedule_miss_check(); // second bounce in the window
        let due = tracker.tick_pending(0.03);
        assert_eq!(due, vec![DueAction::MissCheck]);
    }

    #[test]
    fn test_outcome_clear_returns_to_idle() {
        let mut tracker = attempted_tracker();
        tracker.record_miss();
        tracker.schedule_outcome_clear();
        let due = tracker.tick_pending(OUTCOME_CLEAR_SECS + 0.01);
        assert_eq!(due, vec![DueAction::OutcomeClear]);
        tracker.clear_outcome();
        assert_eq!(tracker.phase, ShotPhase::Idle);
    }

    #[test]
    fn test_accuracy() {
        let mut tracker = ShotTracker::default();
        assert_eq!(tracker.accuracy(), 0.0);
        tracker.begin_shot(Vec3::ZERO, RimSide::Right, false);
        tracker.record_make(2);
        tracker.begin_shot(Vec3::ZERO, RimSide::Right, false);
        tracker.record_miss();
        assert!((tracker.accuracy() - 0.5).abs() < 1e-6);
    }
}
