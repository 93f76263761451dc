use crate::core::INCLINE_LENGTH;
use crate::core::frame::incline_basis;
use crate::core::vector::Vector2;

/// Points this close above the surface (or anywhere below it) count as on it.
pub const SURFACE_TOLERANCE: f64 = 0.5;
/// How far before the foot of the incline a hit is still accepted.
pub const PARALLEL_MIN_MARGIN: f64 = -5.0;
/// How far past the top end of the incline a hit is still accepted.
pub const PARALLEL_MAX_MARGIN: f64 = 20.0;

/// Signed distances of `position` relative to the incline line, as
/// `(parallel, perpendicular)`. Perpendicular is positive on the launch side.
pub fn surface_offsets(position: Vector2, incline_deg: f64) -> (f64, f64) {
    let (along, normal) = incline_basis(incline_deg);
    (position.dot(along), position.dot(normal))
}

/// Whether `position` lies on or through the finite incline surface.
///
/// Stateless; callers that start near the surface have to ignore hits during
/// their own grace period.
pub fn is_colliding(position: Vector2, incline_deg: f64) -> bool {
    let (parallel, perpendicular) = surface_offsets(position, incline_deg);
    perpendicular <= SURFACE_TOLERANCE
        && (PARALLEL_MIN_MARGIN..=INCLINE_LENGTH + PARALLEL_MAX_MARGIN).contains(&parallel)
}

#[cfg(test)]
mod tests {
    use super::{is_colliding, surface_offsets};
    use crate::core::vector::Vector2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn flat_incline_surface_band() {
        for i in -5..=120 {
            let x = f64::from(i);
            assert!(is_colliding(Vector2::new(x, 0.0), 0.0), "x={x} on surface");
            assert!(!is_colliding(Vector2::new(x, 1.0), 0.0), "x={x} above surface");
        }
    }

    #[test]
    fn points_below_surface_collide() {
        assert!(is_colliding(Vector2::new(50.0, -3.0), 0.0));
    }

    #[test]
    fn outside_extent_never_collides() {
        assert!(!is_colliding(Vector2::new(-6.0, 0.0), 0.0));
        assert!(!is_colliding(Vector2::new(121.0, 0.0), 0.0));
    }

    #[test]
    fn tilted_incline_uses_rotated_frame() {
        let top = Vector2::new(86.602_540_378, 50.0);
        assert!(is_colliding(top, 30.0));

        let (parallel, perpendicular) = surface_offsets(top, 30.0);
        assert_abs_diff_eq!(parallel, 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(perpendicular, 0.0, epsilon = 1e-6);

        // Straight above the foot is off the surface on a tilted incline.
        assert!(!is_colliding(Vector2::new(0.0, 5.0), 30.0));
    }

    #[test]
    fn nan_position_is_not_a_hit() {
        assert!(!is_colliding(Vector2::new(f64::NAN, 0.0), 0.0));
    }
}
