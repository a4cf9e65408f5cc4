use crate::math::{self, Matrix4, Vector3};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Quaternion for representing rotations in 3D space.
///
/// Stored as `(x, y, z, w)` with `w` the real part. Nothing forces unit length;
/// operations that only make sense for rotations say so in their docs.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// First imaginary component
    pub x: f32,

    /// Second imaginary component
    pub y: f32,

    /// Third imaginary component
    pub z: f32,

    /// Real component
    pub w: f32,
}

/// Rotation trait for rotation representations
pub trait Rotation {
    /// Rotate a vector by this rotation
    fn rotate_vector(&self, v: Vector3) -> Vector3;

    /// Get the angle in radians of this rotation
    fn angle(&self) -> f32;

    /// Get the axis of this rotation
    fn axis(&self) -> Vector3;
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The rotation that leaves every vector unchanged
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new quaternion
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from a vector part and a real part
    #[inline]
    pub const fn from_vector3(xyz: Vector3, w: f32) -> Self {
        Self::new(xyz.x, xyz.y, xyz.z, w)
    }

    /// Returns the vector part
    #[inline]
    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates a quaternion rotating `angle` radians about `axis`.
    ///
    /// `axis` must be unit length; it is not normalized here.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::from_vector3(axis * s, c)
    }

    /// Extracts the rotation of the upper 3x3 block of `m`.
    ///
    /// `m` must hold a pure rotation. The real part is taken from the trace, so
    /// the result degrades to NaN/Inf as the rotation approaches 180 degrees
    /// (`w` near zero). No fallback branch is taken.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let d = &m.data;
        let w = 0.5 * (1.0 + d[0][0] + d[1][1] + d[2][2]).sqrt();
        let inv = 1.0 / (4.0 * w);

        Self::new(
            inv * (d[1][2] - d[2][1]),
            inv * (d[2][0] - d[0][2]),
            inv * (d[0][1] - d[1][0]),
            w,
        )
    }

    /// Creates a rotation from yaw (about up), pitch (about right) and roll
    /// (about backward), combined as `yaw * pitch * roll`
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let pitch = Self::from_axis_angle(Vector3::RIGHT, pitch);
        let yaw = Self::from_axis_angle(Vector3::UP, yaw);
        let roll = Self::from_axis_angle(Vector3::BACKWARD, roll);

        yaw * pitch * roll
    }

    /// Returns the rotation that applies `first` and then `second`
    #[inline]
    pub fn concatenate(first: &Self, second: &Self) -> Self {
        *second * *first
    }

    /// Returns the conjugate of this quaternion
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Conjugates this quaternion in-place
    #[inline]
    pub fn conjugate_mut(&mut self) {
        *self = self.conjugate();
    }

    /// Computes the dot product of two quaternions
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the squared length of this quaternion
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the length of this quaternion
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns this quaternion scaled to unit length. A zero quaternion yields NaN.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Normalizes this quaternion in-place
    #[inline]
    pub fn normalize_mut(&mut self) {
        let length = self.length();
        *self /= length;
    }

    /// Returns the inverse of this quaternion: the conjugate over the squared length.
    ///
    /// Valid for non-unit quaternions. A zero quaternion yields NaN.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.length_squared()
    }

    /// Component-wise linear interpolation. The result is not renormalized.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self::new(
            math::lerp(self.x, to.x, t),
            math::lerp(self.y, to.y, t),
            math::lerp(self.z, to.z, t),
            math::lerp(self.w, to.w, t),
        )
    }

    /// Interpolates from `self` to `to`.
    ///
    /// When the dot product of the two is below 0.999 this falls back to the
    /// cheap [`Self::lerp`]. Otherwise it evaluates `(to * from^-1)^t * from`
    /// through the quaternion logarithm and exponential.
    pub fn slerp(&self, to: &Self, t: f32) -> Self {
        if self.dot(to) < 0.999 {
            return self.lerp(to, t);
        }

        (*to * self.inverse()).powf(t) * *self
    }

    /// Quaternion natural logarithm: `(axis * acos(w / |q|), ln |q|)` where
    /// `axis` is the normalized vector part.
    ///
    /// The angle is evaluated as `atan2(|v|, w)`, which equals the arc cosine
    /// but keeps its precision when the vector part is tiny.
    pub fn ln(&self) -> Self {
        let v = self.xyz();
        let v_length = v.length();
        let axis = if v_length > 0.0 { v / v_length } else { Vector3::ZERO };
        let theta = v_length.atan2(self.w);
        Self::from_vector3(axis * theta, self.length().ln())
    }

    /// Quaternion exponential: `(v / |v| * sin |v|, cos |v|) * e^w`
    pub fn exp(&self) -> Self {
        let v = self.xyz();
        let length = v.length();
        // sin(|v|) / |v| tends to 1 as the vector part vanishes
        let scale = if length > 0.0 { length.sin() / length } else { 1.0 };
        Self::from_vector3(v * scale, length.cos()) * self.w.exp()
    }

    /// Raises this quaternion to a real power: `exp(ln(q) * p)`
    #[inline]
    pub fn powf(&self, p: f32) -> Self {
        (self.ln() * p).exp()
    }

    /// Convert to nalgebra Quaternion
    #[inline]
    pub fn to_nalgebra(&self) -> nalgebra::Quaternion<f32> {
        nalgebra::Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Convert from nalgebra Quaternion
    #[inline]
    pub fn from_nalgebra(q: &nalgebra::Quaternion<f32>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl Rotation for Quaternion {
    /// Rotates a vector by `q * (v, 0) * conjugate(q)`. Assumes unit length.
    fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let payload = Quaternion::from_vector3(v, 0.0);
        (*self * payload * self.conjugate()).xyz()
    }

    /// Returns the angle in radians of this rotation
    fn angle(&self) -> f32 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    /// Returns the normalized axis of this rotation, or zero for the identity
    fn axis(&self) -> Vector3 {
        let v = self.xyz();
        let len = v.length();
        if len > 0.0 {
            v / len
        } else {
            Vector3::ZERO
        }
    }
}

impl_epsilon_eq!(Quaternion, x, y, z, w);
impl_approx_eq!(Quaternion, x, y, z, w);
impl_array_conversions!(Quaternion, 4, x, y, z, w);

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

// Hamilton product
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: Quaternion) -> Self::Output {
        rhs * self
    }
}

/// `a / b` is `a * inverse(b)`
impl Div for Quaternion {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inverse()
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

/// Negates all four components
impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl AddAssign for Quaternion {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quaternion {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign for Quaternion {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl DivAssign<f32> for Quaternion {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PI_OVER_2;
    use approx::assert_relative_eq;

    #[test]
    fn hamilton_product_of_basis_units() {
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn inverse_of_non_unit_quaternion() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_relative_eq!(q * q.inverse(), Quaternion::IDENTITY, epsilon = 1e-6);
        assert_relative_eq!(q / q, Quaternion::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn concatenate_applies_first_then_second() {
        let first = Quaternion::from_axis_angle(Vector3::UP, PI_OVER_2);
        let second = Quaternion::from_axis_angle(Vector3::RIGHT, PI_OVER_2);
        let combined = Quaternion::concatenate(&first, &second);

        let stepwise = second.rotate_vector(first.rotate_vector(Vector3::UNIT_X));
        assert_relative_eq!(combined.rotate_vector(Vector3::UNIT_X), stepwise, epsilon = 1e-6);
    }

    #[test]
    fn ln_exp_round_trip() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 1.2) * 2.0;
        assert_relative_eq!(q.ln().exp(), q, epsilon = 1e-5);
    }

    #[test]
    fn exp_of_zero_is_identity() {
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).exp(), Quaternion::IDENTITY);
    }

    #[test]
    fn axis_and_angle() {
        let q = Quaternion::from_axis_angle(Vector3::UNIT_Z, 1.0);
        assert_relative_eq!(q.angle(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(q.axis(), Vector3::UNIT_Z, epsilon = 1e-6);
        assert_eq!(Quaternion::IDENTITY.axis(), Vector3::ZERO);
    }

    #[test]
    fn nalgebra_component_order() {
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.9);
        let na_q = q.to_nalgebra();
        assert_eq!(na_q.w, 0.9);
        assert_eq!(na_q.i, 0.1);
        assert_eq!(Quaternion::from_nalgebra(&na_q), q);
    }
}
