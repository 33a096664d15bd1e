use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with (x, y, z) components.
///
/// Equality is exact component comparison, no epsilon.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Vector3 {
    /// Zero vector3 constant (0, 0, 0)
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// One vector3 constant (1, 1, 1)
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new 3D vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    // ------------------ Math Ops ------------------

    /// Dot product between this vector and another
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product returns a vector perpendicular to both inputs
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Squared length (avoids a sqrt when only comparing distances)
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scales the vector to unit length in place.
    ///
    /// A vector of exactly zero length is left unchanged.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length == 0.0 {
            return;
        }
        self.x /= length;
        self.y /= length;
        self.z /= length;
    }

    /// Returns a unit-length copy; zero stays zero.
    pub fn normalized(self) -> Self {
        let mut v = self;
        v.normalize();
        v
    }

    /// Distance between two vectors
    pub fn distance(a: Self, b: Self) -> f32 {
        (b - a).length()
    }

    /// Linear interpolation between two vectors
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            z: a.z + (b.z - a.z) * t,
        }
    }

    /// Per-component minimum
    pub fn min(self, rhs: Self) -> Self {
        Self {
            x: if self.x < rhs.x { self.x } else { rhs.x },
            y: if self.y < rhs.y { self.y } else { rhs.y },
            z: if self.z < rhs.z { self.z } else { rhs.z },
        }
    }

    /// Per-component maximum
    pub fn max(self, rhs: Self) -> Self {
        Self {
            x: if self.x > rhs.x { self.x } else { rhs.x },
            y: if self.y > rhs.y { self.y } else { rhs.y },
            z: if self.z > rhs.z { self.z } else { rhs.z },
        }
    }

    /// Reflects the vector off a plane with the given (unit) normal.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Projects the vector onto `onto`. Projecting onto a zero vector yields zero.
    pub fn project(self, onto: Self) -> Self {
        let denom = onto.dot(onto);
        if denom == 0.0 {
            return Self::ZERO;
        }
        onto * (self.dot(onto) / denom)
    }

    /// Removes the component along `plane_normal`.
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project(plane_normal)
    }
}

// ---------------------- Arithmetic Ops ----------------------

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// Scalar multiply
impl Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Mul<Vector3> for f32 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

// Scalar divide
impl Div<f32> for Vector3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

// Conversion traits for glam interop
impl From<Vector3> for Vec3 {
    #[inline]
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_matches_glam() {
        let a = Vector3::new(1.5, -2.0, 0.25);
        let b = Vector3::new(-3.0, 0.5, 4.0);
        let expected: Vector3 = Vec3::from(a).cross(Vec3::from(b)).into();
        assert_eq!(a.cross(b), expected);
        assert_eq!(Vector3::UNIT_X.cross(Vector3::UNIT_Y), Vector3::UNIT_Z);
    }

    #[test]
    fn normalize_zero_is_noop() {
        let mut v = Vector3::ZERO;
        v.normalize();
        assert_eq!(v, Vector3::ZERO);
    }

    #[test]
    fn normalize_scales_to_unit_length() {
        let mut v = Vector3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert_eq!(v, Vector3::new(0.6, 0.0, 0.8));
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn min_max_are_per_component() {
        let a = Vector3::new(1.0, 5.0, -2.0);
        let b = Vector3::new(3.0, -1.0, -2.5);
        assert_eq!(a.min(b), Vector3::new(1.0, -1.0, -2.5));
        assert_eq!(a.max(b), Vector3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn reflect_flips_normal_component() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        assert_eq!(v.reflect(Vector3::UNIT_Y), Vector3::new(1.0, 1.0, 0.0));

        let diagonal = Vector3::new(2.0, -3.0, 5.0);
        assert_eq!(diagonal.reflect(Vector3::UNIT_Z), Vector3::new(2.0, -3.0, -5.0));
    }

    #[test]
    fn project_and_plane_projection_split_the_vector() {
        let v = Vector3::new(2.0, 3.0, 4.0);
        let n = Vector3::new(0.0, 0.0, 2.0);
        assert_eq!(v.project(n), Vector3::new(0.0, 0.0, 4.0));
        assert_eq!(v.project_on_plane(n), Vector3::new(2.0, 3.0, 0.0));
        assert_eq!(v.project(Vector3::ZERO), Vector3::ZERO);
    }

    #[test]
    fn lerp_and_distance() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, -10.0, 4.0);
        assert_eq!(Vector3::lerp(a, b, 0.5), Vector3::new(5.0, -5.0, 2.0));
        assert_eq!(Vector3::distance(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0)), 5.0);
    }

    #[test]
    fn arithmetic_operators() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v += Vector3::ONE;
        v *= 2.0;
        assert_eq!(v, Vector3::new(4.0, 6.0, 8.0));
        v /= 2.0;
        v -= Vector3::ONE;
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(-v, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(v / 2.0, Vector3::new(0.5, 1.0, 1.5));
    }
}
