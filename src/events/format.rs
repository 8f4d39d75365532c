//! Compact text format for game event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|SE|2f1c9a3b-...|2025-11-02T18:04:11Z
//! T:01200|SA|1|0.0,0.5,0.0|50|0
//! T:02950|SM|1|R|2|0
//! T:04100|SX|2
//! T:05000|CT|57
//! ```

use super::types::GameEvent;

/// Format a 3D position/velocity tuple
fn fmt_vec(v: (f32, f32, f32)) -> String {
    format!("{:.1},{:.1},{:.1}", v.0, v.1, v.2)
}

fn fmt_bool(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(config) => {
            // Serialize config as compact JSON for easy parsing
            serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::ModeSelect { mode } => mode.clone(),
        GameEvent::ChallengeStart { mode, time_limit } => format!("{}|{}", mode, time_limit),
        GameEvent::CountdownTick { remaining } => remaining.to_string(),
        GameEvent::ChallengeEnd {
            mode,
            points,
            attempts,
            made,
            accuracy,
            new_best,
        } => format!(
            "{}|{}|{}|{}|{:.3}|{}",
            mode,
            points,
            attempts,
            made,
            accuracy,
            fmt_bool(*new_best)
        ),
        GameEvent::ShotAttempt {
            shot_id,
            origin,
            power,
            beyond_arc,
        } => format!(
            "{}|{}|{}|{}",
            shot_id,
            fmt_vec(*origin),
            power,
            fmt_bool(*beyond_arc)
        ),
        GameEvent::ShotMade {
            shot_id,
            rim,
            points,
            three,
        } => format!("{}|{}|{}|{}", shot_id, rim, points, fmt_bool(*three)),
        GameEvent::ShotMissed { shot_id } => shot_id.to_string(),
        GameEvent::InvalidShot { message } => message.clone(),
        GameEvent::PowerChange { power } => power.to_string(),
        GameEvent::NetWave { rim } => rim.to_string(),
        GameEvent::BallReset => String::new(),
        GameEvent::Tick {
            frame,
            ball_pos,
            ball_vel,
            airborne,
        } => format!(
            "{}|{}|{}|{}",
            frame,
            fmt_vec(*ball_pos),
            fmt_vec(*ball_vel),
            fmt_bool(*airborne)
        ),
    };

    if data.is_empty() {
        format!("{}|{}", ts, code)
    } else {
        format!("{}|{}|{}", ts, code, data)
    }
}
