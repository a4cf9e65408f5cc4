use nalgebra as na;
use std::fmt;

use crate::math::{self, Matrix4, Quaternion, Rotation};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A 2D vector
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// A 3D vector, used for positions, directions and scales
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A 4D vector, usually a homogeneous coordinate
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

// Norms and the component-wise lifts of the scalar helpers, shared by all three
// vector types.
macro_rules! impl_vector_common {
    ($t: ident, $($c: ident),+) => {
        impl $t {
            /// Creates a vector with every component set to `value`
            #[inline]
            pub const fn splat(value: f32) -> Self {
                Self { $( $c: value ),+ }
            }

            /// Computes the dot product of two vectors
            #[inline]
            pub fn dot(&self, other: &Self) -> f32 {
                0.0 $( + self.$c * other.$c )+
            }

            /// Returns the squared length of the vector
            #[inline]
            pub fn length_squared(&self) -> f32 {
                self.dot(self)
            }

            /// Returns the length of the vector
            #[inline]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Returns the vector divided by its length.
            ///
            /// A zero vector has no direction; its components come back NaN.
            #[inline]
            pub fn normalize(&self) -> Self {
                *self / self.length()
            }

            /// Normalizes the vector in-place. See [`Self::normalize`].
            #[inline]
            pub fn normalize_mut(&mut self) {
                let length = self.length();
                *self /= length;
            }

            /// Distance between two points
            #[inline]
            pub fn distance(&self, other: &Self) -> f32 {
                self.distance_squared(other).sqrt()
            }

            /// Squared distance between two points
            #[inline]
            pub fn distance_squared(&self, other: &Self) -> f32 {
                (*self - *other).length_squared()
            }

            /// Linear interpolation between two vectors. `t` is not clamped.
            #[inline]
            pub fn lerp(&self, to: &Self, t: f32) -> Self {
                Self { $( $c: math::lerp(self.$c, to.$c, t) ),+ }
            }

            /// Cubic ease between two vectors, `t` clamped to [0, 1]
            #[inline]
            pub fn smooth_step(&self, to: &Self, t: f32) -> Self {
                Self { $( $c: math::smooth_step(self.$c, to.$c, t) ),+ }
            }

            /// Hermite spline between `p1` and `p2` with tangents `t1` and `t2`
            pub fn hermite(p1: &Self, t1: &Self, p2: &Self, t2: &Self, amount: f32) -> Self {
                Self { $( $c: math::hermite(p1.$c, t1.$c, p2.$c, t2.$c, amount) ),+ }
            }

            /// Catmull-Rom spline through `p2` and `p3`
            pub fn catmull_rom(p1: &Self, p2: &Self, p3: &Self, p4: &Self, amount: f32) -> Self {
                Self { $( $c: math::catmull_rom(p1.$c, p2.$c, p3.$c, p4.$c, amount) ),+ }
            }

            /// Point of the triangle `p1 p2 p3` at barycentric weights `b2`, `b3`
            pub fn barycentric(p1: &Self, p2: &Self, p3: &Self, b2: f32, b3: f32) -> Self {
                Self { $( $c: math::barycentric(p1.$c, p2.$c, p3.$c, b2, b3) ),+ }
            }

            /// Clamps each component into the matching range of `min` and `max`
            #[inline]
            pub fn clamp(&self, min: &Self, max: &Self) -> Self {
                Self { $( $c: math::clamp(self.$c, min.$c, max.$c) ),+ }
            }

            /// Component-wise minimum
            #[inline]
            pub fn min(&self, other: &Self) -> Self {
                Self { $( $c: math::min(self.$c, other.$c) ),+ }
            }

            /// Component-wise maximum
            #[inline]
            pub fn max(&self, other: &Self) -> Self {
                Self { $( $c: math::max(self.$c, other.$c) ),+ }
            }
        }

        impl_componentwise_ops!($t, $($c),+);
        impl_epsilon_eq!($t, $($c),+);
        impl_approx_eq!($t, $($c),+);
    };
}

impl_vector_common!(Vector2, x, y);
impl_vector_common!(Vector3, x, y, z);
impl_vector_common!(Vector4, x, y, z, w);

impl_array_conversions!(Vector2, 2, x, y);
impl_array_conversions!(Vector3, 3, x, y, z);
impl_array_conversions!(Vector4, 4, x, y, z, w);

// === Vector2 Implementation ===

impl Vector2 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a new 2D vector
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Mirrors the vector about the line spanned by `normal`.
    ///
    /// `normal` must already be unit length.
    #[inline]
    pub fn reflect(&self, normal: &Self) -> Self {
        let projection = *normal * self.dot(normal);
        *self + (projection - *self) * 2.0
    }

    /// Transforms the vector as a point (`v * m`), picking up the translation row
    #[inline]
    pub fn transform(&self, m: &Matrix4) -> Self {
        let d = &m.data;
        Self::new(
            self.x * d[0][0] + self.y * d[1][0] + d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + d[3][1],
        )
    }

    /// Transforms the vector as a direction, ignoring translation
    #[inline]
    pub fn transform_normal(&self, m: &Matrix4) -> Self {
        let d = &m.data;
        Self::new(
            self.x * d[0][0] + self.y * d[1][0],
            self.x * d[0][1] + self.y * d[1][1],
        )
    }

    /// Rotates `(x, y, 0)` by the quaternion and drops the z component
    #[inline]
    pub fn transform_quaternion(&self, q: &Quaternion) -> Self {
        let rotated = q.rotate_vector(Vector3::from_vector2(*self, 0.0));
        Self::new(rotated.x, rotated.y)
    }

    /// Convert to nalgebra Vector2
    #[inline]
    pub fn to_nalgebra(&self) -> na::Vector2<f32> {
        na::Vector2::new(self.x, self.y)
    }

    /// Convert from nalgebra Vector2
    #[inline]
    pub fn from_nalgebra(v: &na::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// === Vector3 Implementation ===

impl Vector3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);
    pub const UP: Self = Self::UNIT_Y;
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::UNIT_X;
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const BACKWARD: Self = Self::UNIT_Z;

    /// Creates a new 3D vector
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Extends a 2D vector with a z component
    #[inline]
    pub const fn from_vector2(xy: Vector2, z: f32) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    /// Computes the cross product of two vectors
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Mirrors the vector about the line spanned by `normal`.
    ///
    /// `normal` must already be unit length.
    #[inline]
    pub fn reflect(&self, normal: &Self) -> Self {
        let projection = *normal * self.dot(normal);
        *self + (projection - *self) * 2.0
    }

    /// Transforms the vector as a point (`v * m`), picking up the translation row
    #[inline]
    pub fn transform(&self, m: &Matrix4) -> Self {
        let d = &m.data;
        Self::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + d[3][2],
        )
    }

    /// Transforms the vector as a direction with the upper 3x3 block only
    #[inline]
    pub fn transform_normal(&self, m: &Matrix4) -> Self {
        let d = &m.data;
        Self::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2],
        )
    }

    /// Rotates the vector by `q * (v, 0) * conjugate(q)`
    #[inline]
    pub fn transform_quaternion(&self, q: &Quaternion) -> Self {
        q.rotate_vector(*self)
    }

    /// True if every component is greater than the matching one in `other`
    #[inline]
    pub fn all_gt(&self, other: &Self) -> bool {
        self.x > other.x && self.y > other.y && self.z > other.z
    }

    /// True if every component is less than the matching one in `other`
    #[inline]
    pub fn all_lt(&self, other: &Self) -> bool {
        self.x < other.x && self.y < other.y && self.z < other.z
    }

    /// True if every component is greater than or equal to the matching one in `other`
    #[inline]
    pub fn all_ge(&self, other: &Self) -> bool {
        self.x >= other.x && self.y >= other.y && self.z >= other.z
    }

    /// True if every component is less than or equal to the matching one in `other`
    #[inline]
    pub fn all_le(&self, other: &Self) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// Convert to nalgebra Vector3
    #[inline]
    pub fn to_nalgebra(&self) -> na::Vector3<f32> {
        na::Vector3::new(self.x, self.y, self.z)
    }

    /// Convert from nalgebra Vector3
    #[inline]
    pub fn from_nalgebra(v: &na::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// === Vector4 Implementation ===

impl Vector4 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const UNIT_W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new 4D vector
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extends a 2D vector with z and w components
    #[inline]
    pub const fn from_vector2(xy: Vector2, z: f32, w: f32) -> Self {
        Self::new(xy.x, xy.y, z, w)
    }

    /// Creates a new Vector4 from a Vector3 and a w component
    #[inline]
    pub const fn from_vector3(v: Vector3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the x, y, z components as a Vector3
    #[inline]
    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Full homogeneous transform `v * m`, using this vector's own w
    #[inline]
    pub fn transform(&self, m: &Matrix4) -> Self {
        let d = &m.data;
        Self::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + self.w * d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + self.w * d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + self.w * d[3][2],
            self.x * d[0][3] + self.y * d[1][3] + self.z * d[2][3] + self.w * d[3][3],
        )
    }

    /// Transforms xyz with the upper 3x3 block; the result always has `w == 0`
    #[inline]
    pub fn transform_normal(&self, m: &Matrix4) -> Self {
        Self::from_vector3(self.xyz().transform_normal(m), 0.0)
    }

    /// Computes `q * v * inverse(q)` with all four components as the quaternion payload.
    ///
    /// Unlike the 2D and 3D versions this uses the full inverse, since `w` may be
    /// non-zero and `q` is not required to be unit length.
    pub fn transform_quaternion(&self, q: &Quaternion) -> Self {
        let payload = Quaternion::new(self.x, self.y, self.z, self.w);
        let result = *q * payload * q.inverse();
        Self::new(result.x, result.y, result.z, result.w)
    }

    /// Convert to nalgebra Vector4
    #[inline]
    pub fn to_nalgebra(&self) -> na::Vector4<f32> {
        na::Vector4::new(self.x, self.y, self.z, self.w)
    }

    /// Convert from nalgebra Vector4
    #[inline]
    pub fn from_nalgebra(v: &na::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
