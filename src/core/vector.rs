use std::ops::{Add, Mul, Sub};

/// A plain (x, y) pair. The frame and units are tracked by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        (self.x * other.x) + (self.y * other.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Counter-clockwise rotation by 90 degrees.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::Vector2;

    #[test]
    fn perp_is_orthogonal() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.dot(v.perp()), 0.0);
        assert_eq!(v.perp(), Vector2::new(-4.0, 3.0));
        assert_eq!(v.length(), 5.0);
    }
}
