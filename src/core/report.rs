use crate::core::collision::{is_colliding, surface_offsets};
use crate::core::frame::{Decomposition, decompose};
use crate::core::launch::{EnvironmentConfig, ProjectileConfig, resolve_initial_state};
use crate::core::prediction::{PREDICTION_STEP_S, predict};
use crate::core::simulation::FLOOR_LIMIT_Y;
use crate::core::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictedEnd {
    /// Stopped on the incline surface.
    Surface,
    /// Fell below the floor limit.
    BelowFloor,
    /// Ran out of lookahead.
    Horizon,
}

/// Summary of a predicted flight, used by the CLI report and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightReport {
    pub points: Vec<Vector2>,
    pub launch_velocity: Vector2,
    pub launch_components: Decomposition,
    pub flight_time_s: f64,
    pub end: PredictedEnd,
    pub final_point: Vector2,
    /// Distance up the slope of the final point, meaningful for `Surface`.
    pub distance_along_incline: f64,
    pub apex_height: f64,
}

impl FlightReport {
    pub fn from_prediction(config: &ProjectileConfig, env: &EnvironmentConfig) -> Self {
        let initial = resolve_initial_state(config, env);
        let points = predict(config, env);
        let final_point = points.last().copied().unwrap_or(initial.position);
        let flight_time_s = points.len().saturating_sub(1) as f64 * PREDICTION_STEP_S;

        let end = if points.len() > 1 && is_colliding(final_point, env.incline_angle_deg) {
            PredictedEnd::Surface
        } else if final_point.y < FLOOR_LIMIT_Y {
            PredictedEnd::BelowFloor
        } else {
            PredictedEnd::Horizon
        };

        let apex_height = points.iter().fold(initial.position.y, |acc, p| acc.max(p.y));
        let (distance_along_incline, _) = surface_offsets(final_point, env.incline_angle_deg);

        Self {
            launch_components: decompose(initial.velocity, env.incline_angle_deg),
            launch_velocity: initial.velocity,
            points,
            flight_time_s,
            end,
            final_point,
            distance_along_incline,
            apex_height,
        }
    }
}
