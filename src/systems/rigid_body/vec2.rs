/// 2D vector for physics calculations
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - other.x * self.y
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Vector projection of `self` onto `onto`.
    ///
    /// Projecting onto the zero vector yields NaN components.
    pub fn project(&self, onto: Vec2) -> Self {
        onto * (self.dot(onto) / onto.length_squared())
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    pub fn distance_squared(&self, other: Vec2) -> f64 {
        (other - *self).length_squared()
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-12 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn cross_is_signed_area_of_parallelogram() {
        assert_eq!(Vec2::new(1.0, 0.0).cross(Vec2::new(0.0, 1.0)), 1.0);
        assert_eq!(Vec2::new(0.0, 1.0).cross(Vec2::new(1.0, 0.0)), -1.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = Vec2::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(close(r, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn project_onto_axis() {
        let p = Vec2::new(3.0, 4.0).project(Vec2::new(2.0, 0.0));
        assert!(close(p, Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn distance_and_negate() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(-a, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Vec2::zero().normalize(), Vec2::ZERO);
        assert!(close(Vec2::new(0.0, 3.0).normalize(), Vec2::new(0.0, 1.0)));
    }
}
