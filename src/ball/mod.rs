//! Ball module - components and the two per-tick integrators

pub mod components;
pub mod flight;
pub mod movement;

pub use components::{
    Ball, BallMode, BouncePhase, DESCENT_WINDOW, FloorContact, GroundVelocity, FlightVelocity,
    TRAJECTORY_CAPACITY, TrajectoryHistory, TrajectorySample,
};
pub use flight::update_flight;
pub use movement::ground_movement;
