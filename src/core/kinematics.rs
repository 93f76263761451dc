use crate::core::launch::EnvironmentConfig;
use crate::core::vector::Vector2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    pub position: Vector2,
    pub velocity: Vector2,
}

/// Closed-form position and velocity at `time_s` under constant downward
/// gravity.
///
/// Always evaluated from the original initial condition, so the result only
/// depends on the arguments and error never accumulates across calls.
pub fn advance(
    time_s: f64,
    env: &EnvironmentConfig,
    initial_position: Vector2,
    initial_velocity: Vector2,
) -> KinematicState {
    let g = env.gravity_mps2;
    KinematicState {
        position: Vector2::new(
            initial_position.x + (initial_velocity.x * time_s),
            initial_position.y + (initial_velocity.y * time_s) - (0.5 * g * time_s * time_s),
        ),
        velocity: Vector2::new(initial_velocity.x, initial_velocity.y - (g * time_s)),
    }
}

#[cfg(test)]
mod tests {
    use super::advance;
    use crate::core::launch::EnvironmentConfig;
    use crate::core::vector::Vector2;
    use approx::assert_abs_diff_eq;

    fn env() -> EnvironmentConfig {
        EnvironmentConfig {
            gravity_mps2: 9.81,
            ..Default::default()
        }
    }

    #[test]
    fn horizontal_motion_is_unaccelerated() {
        let p0 = Vector2::new(2.0, 5.0);
        let v0 = Vector2::new(6.5, 24.0);
        for i in 0..200 {
            let t = f64::from(i) * 0.037;
            let s = advance(t, &env(), p0, v0);
            assert_eq!(s.position.x, p0.x + v0.x * t);
            assert_eq!(s.velocity.x, v0.x);
            assert_abs_diff_eq!(
                s.position.y,
                p0.y + v0.y * t - 0.5 * 9.81 * t * t,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn repeated_queries_agree_regardless_of_order() {
        let p0 = Vector2::ZERO;
        let v0 = Vector2::new(10.0, 10.0);
        let late = advance(3.0, &env(), p0, v0);
        let _early = advance(0.5, &env(), p0, v0);
        assert_eq!(advance(3.0, &env(), p0, v0), late);
    }

    #[test]
    fn velocity_loses_g_per_second() {
        let s = advance(2.0, &env(), Vector2::ZERO, Vector2::new(0.0, 20.0));
        assert_abs_diff_eq!(s.velocity.y, 20.0 - 2.0 * 9.81, epsilon = 1e-12);
        assert_abs_diff_eq!(s.position.y, 40.0 - 2.0 * 9.81, epsilon = 1e-12);
    }

    #[test]
    fn negative_time_is_well_defined() {
        let s = advance(-1.0, &env(), Vector2::ZERO, Vector2::new(1.0, 0.0));
        assert_eq!(s.position.x, -1.0);
        assert_abs_diff_eq!(s.velocity.y, 9.81, epsilon = 1e-12);
    }
}
