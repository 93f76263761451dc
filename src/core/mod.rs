//! Physics core for projectiles launched from an inclined plane.
//!
//! Everything in here is a pure, synchronous computation over numeric inputs.
//! The caller owns the environment and passes it by value into every call.

pub mod angles;
pub mod collision;
pub mod frame;
pub mod kinematics;
pub mod launch;
pub mod prediction;
pub mod report;
pub mod simulation;
pub mod vector;
pub mod window;

pub use collision::is_colliding;
pub use frame::{Component, Decomposition, decompose};
pub use kinematics::{KinematicState, advance};
pub use launch::{
    EnvironmentConfig, ProjectileConfig, ProjectileId, StartPosition, resolve_initial_state,
};
pub use prediction::predict;
pub use simulation::{
    FlightPhase, Landing, LaunchPolicy, Projectile, SimulationState, TickOutcome, advance_all,
};
pub use vector::Vector2;

/// Length of the incline segment, measured from its foot at the origin.
pub const INCLINE_LENGTH: f64 = 100.0;
