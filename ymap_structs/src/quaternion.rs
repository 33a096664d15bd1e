use glam::Quat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, MulAssign, Neg, Sub};

use crate::Vector3;

/// Rotation stored in (x, y, z, w) order.
///
/// Values are not kept unit length. Operations that need a unit quaternion
/// (`slerp`, `lerp`) normalize their own copies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Serialize for Quaternion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y, self.z, self.w].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Quaternion::new(arr[0], arr[1], arr[2], arr[3]))
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Vector part (x, y, z).
    #[inline]
    pub fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scales to unit length in place. A zero quaternion is left unchanged.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length == 0.0 {
            return;
        }
        let inv = 1.0 / length;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
        self.w *= inv;
    }

    pub fn normalized(self) -> Self {
        let mut q = self;
        q.normalize();
        q
    }

    /// Negates x, y and z in place; w is untouched.
    pub fn conjugate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    pub fn conjugated(self) -> Self {
        let mut q = self;
        q.conjugate();
        q
    }

    /// Inverts in place: the conjugate scaled by 1 / |q|².
    pub fn invert(&mut self) {
        let inv_length_sq = 1.0 / self.length_squared();
        self.x = -self.x * inv_length_sq;
        self.y = -self.y * inv_length_sq;
        self.z = -self.z * inv_length_sq;
        self.w *= inv_length_sq;
    }

    pub fn inverse(self) -> Self {
        let mut q = self;
        q.invert();
        q
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Vector part scaled by 1 / |q|. Falls back to +X for a zero quaternion.
    ///
    /// The result is only unit length when the rotation is a half turn.
    pub fn axis(self) -> Vector3 {
        let length = self.length();
        if length == 0.0 {
            return Vector3::UNIT_X;
        }
        self.xyz() * (1.0 / length)
    }

    /// Rotation angle in radians, `2·acos(|w|)`; 0 when |w| > 1.
    pub fn angle(self) -> f32 {
        let w = self.w.abs();
        if w <= 1.0 { 2.0 * w.acos() } else { 0.0 }
    }

    /// Angle in degrees between two rotations.
    pub fn angle_between(a: Self, b: Self) -> f32 {
        let dot = a.dot(b).abs().min(1.0);
        (dot.acos() * 2.0).to_degrees()
    }

    /// Normalized linear interpolation, taking the short path.
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let inverse = 1.0 - t;
        let end = if start.dot(end) >= 0.0 { end } else { -end };
        (start * inverse + end * t).normalized()
    }

    /// Spherical interpolation between two rotations.
    ///
    /// Both inputs are normalized first. When their dot product is negative
    /// the end rotation is negated so the shorter arc is taken.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let start = start.normalized();
        let mut end = end.normalized();
        let mut dot = start.dot(end);
        if dot < 0.0 {
            end = -end;
            dot = -dot;
        }

        let (inverse, opposite) = if dot > 1.0 - f32::EPSILON {
            (1.0 - t, t)
        } else {
            let theta = dot.acos();
            let inv_sin = 1.0 / theta.sin();
            (((1.0 - t) * theta).sin() * inv_sin, (t * theta).sin() * inv_sin)
        };

        start * inverse + end * opposite
    }

    /// Steps from `from` towards `to` by at most `max_degrees`.
    pub fn rotate_towards(from: Self, to: Self, max_degrees: f32) -> Self {
        let angle = Self::angle_between(from, to);
        if angle == 0.0 {
            return to;
        }
        let t = (max_degrees / angle).min(1.0);
        Self::slerp(from, to, t)
    }

    /// Rotates a point by this quaternion.
    ///
    /// `t = 2·(q.xyz × v)`, result `v + w·t + q.xyz × t`.
    pub fn rotate(self, v: Vector3) -> Vector3 {
        let q = self.xyz();
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let (sin, cos) = half.sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Builds a rotation from yaw, pitch and roll in radians using the
    /// half-angle composition.
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Self {
            x: cy * sp * cr + sy * cp * sr,
            y: sy * cp * cr - cy * sp * sr,
            z: cy * cp * sr - sy * sp * cr,
            w: cy * cp * cr + sy * sp * sr,
        }
    }

    /// Degrees variant of [`Quaternion::from_yaw_pitch_roll`]: `x` is yaw, `y`
    /// pitch, `z` roll.
    pub fn from_euler_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::from_yaw_pitch_roll(x.to_radians(), y.to_radians(), z.to_radians())
    }

    /// Shortest rotation taking `from` onto `to`.
    pub fn from_to_rotation(from: Vector3, to: Vector3) -> Self {
        let norm = (from.length_squared() * to.length_squared()).sqrt();
        let w = norm + from.dot(to);
        let mut result = if w >= 1e-6 * norm {
            let c = from.cross(to);
            Self::new(c.x, c.y, c.z, w)
        } else if from.x.abs() > from.y.abs() {
            // Opposite directions: any perpendicular axis works.
            Self::new(-from.z, 0.0, from.x, 0.0)
        } else {
            Self::new(0.0, -from.z, from.y, 0.0)
        };
        result.normalize();
        result
    }

    #[inline]
    pub fn to_quat(self) -> Quat {
        Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    #[inline]
    pub fn from_quat(quat: Quat) -> Self {
        Self {
            x: quat.x,
            y: quat.y,
            z: quat.z,
            w: quat.w,
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------- Arithmetic Ops ----------------------

impl Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Self::Output {
        rhs * self
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        let inv = 1.0 / rhs;
        self * inv
    }
}

/// Hamilton product `self ⊗ rhs`.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (rhs.x, rhs.y, rhs.z, rhs.w);
        Self {
            x: ax * bw + aw * bx + ay * bz - az * by,
            y: ay * bw + aw * by + az * bx - ax * bz,
            z: az * bw + aw * bz + ax * by - ay * bx,
            w: aw * bw - ax * bx - ay * by - az * bz,
        }
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Self::Output {
        self.rotate(rhs)
    }
}

impl From<Quat> for Quaternion {
    #[inline]
    fn from(quat: Quat) -> Self {
        Self::from_quat(quat)
    }
}

impl From<Quaternion> for Quat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_quat()
    }
}
