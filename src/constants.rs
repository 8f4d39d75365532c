//! Tunable constants for hoopshot
//!
//! All gameplay values are defined here for easy tweaking.

use bevy::prelude::*;

// =============================================================================
// COURT DIMENSIONS
// =============================================================================

pub const COURT_MIN_X: f32 = -16.0;
pub const COURT_MAX_X: f32 = 16.0;
pub const COURT_MIN_Z: f32 = -9.0;
pub const COURT_MAX_Z: f32 = 9.0;
pub const FLOOR_Y: f32 = 0.0;

pub const BALL_RADIUS: f32 = 0.35;
pub const BALL_REST_HEIGHT: f32 = FLOOR_Y + BALL_RADIUS; // Ball center when sitting on the floor

// =============================================================================
// RIMS
// =============================================================================

pub const RIM_HEIGHT: f32 = 6.0;
pub const LEFT_RIM_CENTER: Vec3 = Vec3::new(-14.5, RIM_HEIGHT, 0.0);
pub const RIGHT_RIM_CENTER: Vec3 = Vec3::new(14.5, RIM_HEIGHT, 0.0);
pub const RIM_RADIUS: f32 = 0.75; // Tolerance radius of the rim opening
pub const SCORE_RADIUS: f32 = 0.5; // Tighter than RIM_RADIUS: requires near-center passage
pub const SCORE_HEIGHT_BAND: f32 = 0.35; // |y - rim height| band for a scoring pass
pub const NET_HEIGHT_BAND: f32 = 0.6; // Looser band for the cosmetic net wave
pub const NET_TRIGGER_RADIUS: f32 = RIM_RADIUS * 1.2;
pub const NET_WAVE_SECS: f32 = 0.8;

pub const THREE_POINT_RADIUS: f32 = 6.75; // Horizontal arc distance from the rim
pub const MISS_RIM_CLEARANCE: f32 = 3.0; // First bounce farther than this from both rims = miss

// =============================================================================
// GROUND MOVEMENT (per FixedUpdate tick, 60 Hz)
// =============================================================================

pub const MOVE_ACCEL: f32 = 0.012; // Velocity gained per tick toward max while a key is held
pub const MOVE_DECEL: f32 = 0.009; // Velocity lost per tick toward zero when released
pub const MOVE_MAX_SPEED: f32 = 0.15; // Per-axis cap, units per tick
pub const MOVE_EPSILON: f32 = 0.005; // Below this net speed the dribble bounce stops

pub const DRIBBLE_HEIGHT: f32 = 0.45; // Peak of the |sin| dribble bounce
pub const DRIBBLE_PHASE_RATE: f32 = 0.38; // Phase advance per tick at full speed

pub const ROLL_SPIN_FACTOR: f32 = 0.6; // Roll rotation per tick per unit of axis velocity
pub const ROLL_SPIN_MIN: f32 = 0.02; // Rotation floor so slow motion still visibly rolls
pub const YAW_JITTER: f32 = 0.01; // Random rotation around the vertical axis while moving

// =============================================================================
// FLIGHT PHYSICS
// =============================================================================

pub const GRAVITY: f32 = -9.3;
pub const AIR_RESISTANCE: f32 = 0.08; // Multiplicative drag rate, 1/s
pub const BOUNCE_FACTOR: f32 = 0.6; // Vertical restitution on floor contact
pub const BOUNCE_FRICTION: f32 = 0.9; // Horizontal velocity retained per floor bounce
pub const WALL_RESTITUTION: f32 = 0.8; // Reflection coefficient at court bounds while airborne
pub const REST_VERTICAL_SPEED: f32 = 0.5; // Post-bounce |vy| below this ...
pub const REST_TOTAL_SPEED: f32 = 0.5; // ... and total speed below this = flight over
pub const MAX_FRAME_DT: f32 = 0.1; // Clamp so a frame hitch cannot tunnel through the floor

pub const FLIGHT_BACKSPIN_FACTOR: f32 = 0.35; // Visual backspin per unit of horizontal speed
pub const FLIGHT_SIDESPIN_FACTOR: f32 = 0.1;
pub const FLIGHT_SPIN_JITTER: f32 = 0.02; // Random wobble scaled by total speed

// =============================================================================
// SHOOTING
// =============================================================================

pub const SHOT_BASE_SPEED: f32 = 14.0; // Scalar launch speed at power factor 1.0
pub const POWER_FACTOR_MIN: f32 = 0.45; // Power 0 maps here
pub const POWER_FACTOR_MAX: f32 = 0.95; // Power 100 maps here
pub const CLOSE_RANGE_DIST: f32 = 3.0; // Inside this the factor floor rises to CLOSE_RANGE_FLOOR
pub const CLOSE_RANGE_FLOOR: f32 = 0.6;
pub const POINT_BLANK_DIST: f32 = 1.5;
pub const POINT_BLANK_FLOOR: f32 = 0.7;
pub const MAX_LAUNCH_ANGLE_DEG: f32 = 82.0; // Near-vertical cap for point-blank arcs
pub const HEIGHT_COMP_FACTOR: f32 = 0.35; // Vertical boost per unit of rim-to-release gap
pub const HEIGHT_COMP_FALLOFF: f32 = 0.25; // Boost coefficient divisor growth per unit distance

pub const POWER_STEP: u8 = 5;
pub const POWER_DEFAULT: u8 = 50;

// =============================================================================
// SHOT OUTCOME TIMERS
// =============================================================================

pub const MISS_DEBOUNCE_SECS: f32 = 0.1; // First-bounce miss re-checks after this delay
pub const OUTCOME_CLEAR_SECS: f32 = 1.5; // Outcome display auto-clears back to Idle
pub const MADE_RESET_SECS: f32 = 1.2; // Non-free modes: full ball reset after a make
pub const RESULTS_DISPLAY_SECS: f32 = 4.0; // Challenge results shown before reverting to free shoot

// =============================================================================
// GAME MODES
// =============================================================================

pub const TIMED_CHALLENGE_SECS: u32 = 60;
pub const THREE_POINT_CHALLENGE_SECS: u32 = 45;

// =============================================================================
// SPAWN POSITIONS
// =============================================================================

pub const BALL_SPAWN: Vec3 = Vec3::new(0.0, BALL_REST_HEIGHT, 0.0); // Center court

// =============================================================================
// SCHEDULING
// =============================================================================

pub const PHYSICS_TICK_HZ: f64 = 60.0;
