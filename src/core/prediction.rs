use crate::core::collision::is_colliding;
use crate::core::kinematics::advance;
use crate::core::launch::{EnvironmentConfig, ProjectileConfig, resolve_initial_state};
use crate::core::simulation::{FLOOR_LIMIT_Y, GRACE_PERIOD_S};
use crate::core::vector::Vector2;

pub const PREDICTION_STEP_S: f64 = 0.05;
pub const PREDICTION_HORIZON_S: f64 = 20.0;

/// "What if launched now" preview: the trajectory from the Idle initial
/// condition, sampled every [`PREDICTION_STEP_S`].
///
/// Stops at the first surface hit past the grace period, once the point has
/// fallen below [`FLOOR_LIMIT_Y`], or at the lookahead horizon. The first
/// sample is always the start position.
pub fn predict(config: &ProjectileConfig, env: &EnvironmentConfig) -> Vec<Vector2> {
    let initial = resolve_initial_state(config, env);
    let max_steps = (PREDICTION_HORIZON_S / PREDICTION_STEP_S).round() as usize;
    let mut points = Vec::with_capacity(max_steps + 1);

    for step in 0..=max_steps {
        let t = step as f64 * PREDICTION_STEP_S;
        let position = advance(t, env, initial.position, initial.velocity).position;
        points.push(position);

        if t > GRACE_PERIOD_S && is_colliding(position, env.incline_angle_deg) {
            break;
        }
        if position.y < FLOOR_LIMIT_Y {
            break;
        }
    }

    points
}
