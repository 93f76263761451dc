//! Projection of vectors onto the incline's parallel/perpendicular basis.
//!
//! The parallel unit vector is `(cos θ, sin θ)` and points up the slope. The
//! perpendicular unit vector is the parallel one rotated by +90 degrees,
//! `(-sin θ, cos θ)`, so a positive perpendicular magnitude points away from
//! the surface on the launch side.

use crate::core::angles::unit_at;
use crate::core::vector::Vector2;

/// One projected part of a vector, in the original frame and as a signed
/// length along its unit vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    pub vector: Vector2,
    pub magnitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub parallel: Component,
    pub perpendicular: Component,
}

impl Decomposition {
    pub fn recompose(&self) -> Vector2 {
        self.parallel.vector + self.perpendicular.vector
    }
}

pub fn incline_basis(incline_deg: f64) -> (Vector2, Vector2) {
    let parallel = Vector2::from(unit_at(incline_deg));
    (parallel, parallel.perp())
}

pub fn decompose(vector: Vector2, incline_deg: f64) -> Decomposition {
    let (parallel_unit, perpendicular_unit) = incline_basis(incline_deg);
    let parallel_mag = vector.dot(parallel_unit);
    let perpendicular_mag = vector.dot(perpendicular_unit);

    Decomposition {
        parallel: Component {
            vector: parallel_unit * parallel_mag,
            magnitude: parallel_mag,
        },
        perpendicular: Component {
            vector: perpendicular_unit * perpendicular_mag,
            magnitude: perpendicular_mag,
        },
    }
}
