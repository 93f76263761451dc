use crate::core::INCLINE_LENGTH;
use crate::core::angles::unit_at;
use crate::core::vector::Vector2;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;
const MIN_SPAN: f64 = 1.0;

/// Axis-aligned data window with a fixed x:y aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewWindow {
    pub min: Vector2,
    pub max: Vector2,
}

impl ViewWindow {
    /// Smallest padded window that holds every point and the incline segment,
    /// widened along one axis to keep [`DISTANCE_TO_HEIGHT_RATIO`].
    pub fn fit<I>(points: I, incline_deg: f64) -> Self
    where
        I: IntoIterator<Item = Vector2>,
    {
        let incline_top = Vector2::from(unit_at(incline_deg)) * INCLINE_LENGTH;
        let mut min = Vector2::new(0.0_f64.min(incline_top.x), 0.0_f64.min(incline_top.y));
        let mut max = Vector2::new(0.0_f64.max(incline_top.x), 0.0_f64.max(incline_top.y));

        for p in points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let raw_x_span = (max.x - min.x).max(MIN_SPAN);
        let raw_y_span = (max.y - min.y).max(MIN_SPAN);
        let mut x_span = raw_x_span * (1.0 + 2.0 * X_PADDING_RATIO);
        let mut y_span = raw_y_span * (1.0 + 2.0 * Y_PADDING_RATIO);

        if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
            x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
        }

        let center = Vector2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5);
        let half = Vector2::new(x_span * 0.5, y_span * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::{DISTANCE_TO_HEIGHT_RATIO, ViewWindow};
    use crate::core::vector::Vector2;
    use approx::assert_relative_eq;

    #[test]
    fn keeps_fixed_ratio_and_holds_incline() {
        let window = ViewWindow::fit([Vector2::new(10.0, 30.0)], 30.0);
        assert_relative_eq!(
            window.width() / window.height(),
            DISTANCE_TO_HEIGHT_RATIO,
            epsilon = 1e-9
        );
        assert!(window.min.x <= 0.0 && window.max.x >= 86.6);
        assert!(window.min.y <= 0.0 && window.max.y >= 50.0);
    }

    #[test]
    fn includes_points_below_the_floor() {
        let window = ViewWindow::fit([Vector2::new(-40.0, -12.0)], 10.0);
        assert!(window.min.x < -40.0);
        assert!(window.min.y < -12.0);
    }

    #[test]
    fn ignores_non_finite_points() {
        let plain = ViewWindow::fit(std::iter::empty(), 0.0);
        let with_nan = ViewWindow::fit([Vector2::new(f64::NAN, 1e9)], 0.0);
        assert_eq!(plain, with_nan);
    }
}
