// Mutable 2D vector used for entity position and velocity

use super::math::clamp_symmetric;
use glam::Vec2;

/// A mutable 2D vector.
///
/// Every mutating method works in place and returns `&mut Self`, so calls can
/// be chained: `v.add(other).scale(0.5).clamp_x(2.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[allow(clippy::should_implement_trait)]
impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(&mut self, other: Vector2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn sub(&mut self, other: Vector2) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn scale(&mut self, scalar: f32) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    pub fn magnitude(&self) -> f32 {
        Vec2::from(*self).length()
    }

    /// Scale to unit length. A zero vector is left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        *self = Vec2::from(*self).normalize_or_zero().into();
        self
    }

    /// Rescale to `max` length, only if currently longer than `max`
    pub fn clamp_magnitude(&mut self, max: f32) -> &mut Self {
        *self = Vec2::from(*self).clamp_length_max(max).into();
        self
    }

    /// Clamp x into `[-max, max]`
    pub fn clamp_x(&mut self, max: f32) -> &mut Self {
        self.x = clamp_symmetric(self.x, max);
        self
    }

    /// Clamp y into `[-max, max]`
    pub fn clamp_y(&mut self, max: f32) -> &mut Self {
        self.y = clamp_symmetric(self.y, max);
        self
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
