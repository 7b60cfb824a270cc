//! 2D vector and horizontal facing

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector, also used for points in world space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0);
    pub const NEG_X: Self = Self::new(-1.0, 0.0);
    pub const NEG_Y: Self = Self::new(0.0, -1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Self::ZERO }
    }

    #[inline]
    pub fn normalize_or_zero(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 1e-10 {
            self / len_sq.sqrt()
        } else {
            Self::ZERO
        }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self::new(x, self.y)
    }

    #[inline]
    pub fn with_y(self, y: f32) -> Self {
        Self::new(self.x, y)
    }

    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Horizontal look direction of an actor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Unit vector pointing the way the actor looks
    #[inline]
    pub fn forward(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing that looks from `from` towards `to`; keeps `self` when they share an x
    pub fn towards(self, from: Vec2, to: Vec2) -> Self {
        let dx = to.x - from.x;
        if dx > 0.0 {
            Self::Right
        } else if dx < 0.0 {
            Self::Left
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline] fn add(self, o: Self) -> Self { Self::new(self.x + o.x, self.y + o.y) }
}
impl Sub for Vec2 {
    type Output = Self;
    #[inline] fn sub(self, o: Self) -> Self { Self::new(self.x - o.x, self.y - o.y) }
}
impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline] fn mul(self, s: f32) -> Self { Self::new(self.x * s, self.y * s) }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline] fn mul(self, v: Vec2) -> Vec2 { v * self }
}
impl Div<f32> for Vec2 {
    type Output = Self;
    #[inline] fn div(self, s: f32) -> Self { Self::new(self.x / s, self.y / s) }
}
impl Neg for Vec2 {
    type Output = Self;
    #[inline] fn neg(self) -> Self { Self::new(-self.x, -self.y) }
}
impl AddAssign for Vec2 {
    #[inline] fn add_assign(&mut self, o: Self) { self.x += o.x; self.y += o.y; }
}
impl SubAssign for Vec2 {
    #[inline] fn sub_assign(&mut self, o: Self) { self.x -= o.x; self.y -= o.y; }
}
impl MulAssign<f32> for Vec2 {
    #[inline] fn mul_assign(&mut self, s: f32) { self.x *= s; self.y *= s; }
}
