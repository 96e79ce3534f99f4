//! Two-dimensional vector math.
//!
//! [`Vector2d`] is the value type used for box positions, sizes and offsets.
//! Every operation returns a new vector; nothing mutates through a shared
//! reference.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2d {
    pub x: f32,
    pub y: f32,
}

impl Vector2d {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// The unit vector pointing the same way.
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn normalized(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return None;
        }
        Some(Self::new(self.x / magnitude, self.y / magnitude))
    }

    /// Convert to an array `[x, y]`.
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

impl From<(f32, f32)> for Vector2d {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Vector2d {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for Vector2d {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2d> for (f32, f32) {
    fn from(v: Vector2d) -> Self {
        (v.x, v.y)
    }
}

impl<T: Into<Vector2d>> Add<T> for Vector2d {
    type Output = Vector2d;

    fn add(self, other: T) -> Vector2d {
        let other: Vector2d = other.into();
        Vector2d::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Into<Vector2d>> Sub<T> for Vector2d {
    type Output = Vector2d;

    fn sub(self, other: T) -> Vector2d {
        let other: Vector2d = other.into();
        self + -other
    }
}

impl Mul<f32> for Vector2d {
    type Output = Vector2d;

    fn mul(self, factor: f32) -> Vector2d {
        Vector2d::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;

    fn neg(self) -> Vector2d {
        self * -1.0
    }
}

impl<T: Into<Vector2d>> AddAssign<T> for Vector2d {
    fn add_assign(&mut self, other: T) {
        *self = *self + other;
    }
}

impl<T: Into<Vector2d>> SubAssign<T> for Vector2d {
    fn sub_assign(&mut self, other: T) {
        *self = *self - other;
    }
}

impl MulAssign<f32> for Vector2d {
    fn mul_assign(&mut self, factor: f32) {
        *self = *self * factor;
    }
}

impl IntoIterator for Vector2d {
    type Item = f32;
    type IntoIter = std::array::IntoIter<f32, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_array().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector2d::new(1.0, 2.0);
        let b = Vector2d::new(3.0, -4.0);

        assert_eq!(a + b, Vector2d::new(4.0, -2.0));
        assert_eq!(a - b, Vector2d::new(-2.0, 6.0));
        assert_eq!(a * 3.0, Vector2d::new(3.0, 6.0));
        assert_eq!(-a, Vector2d::new(-1.0, -2.0));
        assert_eq!(a + (1.0_f32, 1.0_f32), Vector2d::new(2.0, 3.0));
        assert_eq!(a - [1.0_f32, 2.0_f32], Vector2d::ZERO);
    }

    #[test]
    fn test_assign_ops_return_new_values() {
        let original = Vector2d::new(1.0, 1.0);
        let mut v = original;
        v += (2.0_f32, 3.0_f32);
        v *= 2.0;
        v -= Vector2d::new(1.0, 1.0);
        assert_eq!(v, Vector2d::new(5.0, 7.0));
        assert_eq!(original, Vector2d::new(1.0, 1.0));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector2d::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector2d::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_normalized() {
        let n = Vector2d::new(0.0, 5.0).normalized().unwrap();
        assert_eq!(n, Vector2d::new(0.0, 1.0));

        let n = Vector2d::new(3.0, 4.0).normalized().unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);

        assert!(Vector2d::ZERO.normalized().is_none());
    }

    #[test]
    fn test_iterates_as_pair() {
        let parts: Vec<f32> = Vector2d::new(7.0, 8.0).into_iter().collect();
        assert_eq!(parts, vec![7.0, 8.0]);

        let (x, y): (f32, f32) = Vector2d::new(1.5, 2.5).into();
        assert_eq!((x, y), (1.5, 2.5));
    }

    #[test]
    fn test_glam_conversion() {
        let v: Vector2d = glam::Vec2::new(1.0, 2.0).into();
        assert_eq!(v.to_vec2(), glam::Vec2::new(1.0, 2.0));
    }
}
