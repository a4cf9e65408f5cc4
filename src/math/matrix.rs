use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::MathError;
use crate::math::{self, Plane, Quaternion, Vector3};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Squared camera-to-object distance below which billboards fall back to a forward vector
const BILLBOARD_MIN_DISTANCE_SQUARED: f32 = 0.0001 * 0.0001;

/// |cos| above which a constrained billboard treats its axis as parallel to the view
const BILLBOARD_PARALLEL_DOT: f32 = 0.998;

/// A 4x4 matrix stored row-major: `data[row][col]` is the element `M(row+1)(col+1)`.
///
/// Vectors are rows multiplied on the left (`v' = v * M`), so the translation
/// lives in the fourth row and `a * b` applies `a` first, then `b`.
///
/// Unlike vectors and quaternions, `==` on matrices is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix4 {
    pub data: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Self = Self::new([[0.0; 4]; 4]);

    /// Catmull-Rom basis: `[t^3, t^2, t, 1] * CATMULL_ROM` yields the weights of
    /// the four control points.
    pub const CATMULL_ROM: Self = Self::new([
        [-0.5, 1.5, -1.5, 0.5],
        [1.0, -2.5, 2.0, -0.5],
        [-0.5, 0.0, 0.5, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ]);

    /// Creates a new 4x4 matrix from rows
    #[inline]
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// Creates a new 4x4 identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a new 4x4 zero matrix
    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn row3(&self, row: usize) -> Vector3 {
        let r = &self.data[row];
        Vector3::new(r[0], r[1], r[2])
    }

    #[inline]
    fn set_row3(&mut self, row: usize, v: Vector3) {
        let r = &mut self.data[row];
        r[0] = v.x;
        r[1] = v.y;
        r[2] = v.z;
    }

    // Basis accessors. Right, up and backward are the first three rows; their
    // opposites are derived.

    /// Returns row 1
    pub fn right(&self) -> Vector3 {
        self.row3(0)
    }

    /// Writes row 1
    pub fn set_right(&mut self, v: Vector3) {
        self.set_row3(0, v);
    }

    /// Returns row 1 negated
    pub fn left(&self) -> Vector3 {
        -self.right()
    }

    /// Writes `-v` into row 1, so `left()` reads `v` back
    pub fn set_left(&mut self, v: Vector3) {
        self.set_right(-v);
    }

    /// Returns row 2
    pub fn up(&self) -> Vector3 {
        self.row3(1)
    }

    /// Writes row 2
    pub fn set_up(&mut self, v: Vector3) {
        self.set_row3(1, v);
    }

    /// Returns row 2 negated
    pub fn down(&self) -> Vector3 {
        -self.up()
    }

    /// Writes `-v` into row 2, so `down()` reads `v` back
    pub fn set_down(&mut self, v: Vector3) {
        self.set_up(-v);
    }

    /// Returns row 3
    pub fn backward(&self) -> Vector3 {
        self.row3(2)
    }

    /// Writes row 3
    pub fn set_backward(&mut self, v: Vector3) {
        self.set_row3(2, v);
    }

    /// Returns row 3 negated
    pub fn forward(&self) -> Vector3 {
        -self.backward()
    }

    /// Writes `-v` into row 3, so `forward()` reads `v` back
    pub fn set_forward(&mut self, v: Vector3) {
        self.set_backward(-v);
    }

    /// Extract the translation part of the matrix
    pub fn translation(&self) -> Vector3 {
        self.row3(3)
    }

    /// Writes the translation into row 4, leaving M44 untouched
    pub fn set_translation(&mut self, v: Vector3) {
        self.set_row3(3, v);
    }

    // 2x2 sub-determinants of the top two rows (s) and the bottom two rows (c)
    fn sub_determinants(&self) -> ([f32; 6], [f32; 6]) {
        let [[m11, m12, m13, m14], [m21, m22, m23, m24], [m31, m32, m33, m34], [m41, m42, m43, m44]] =
            self.data;

        let s = [
            m11 * m22 - m12 * m21,
            m11 * m23 - m13 * m21,
            m11 * m24 - m14 * m21,
            m12 * m23 - m13 * m22,
            m12 * m24 - m14 * m22,
            m13 * m24 - m14 * m23,
        ];
        let c = [
            m31 * m42 - m32 * m41,
            m31 * m43 - m33 * m41,
            m31 * m44 - m34 * m41,
            m32 * m43 - m33 * m42,
            m32 * m44 - m34 * m42,
            m33 * m44 - m34 * m43,
        ];
        (s, c)
    }

    /// Returns the determinant of the matrix
    pub fn determinant(&self) -> f32 {
        let ([s0, s1, s2, s3, s4, s5], [c0, c1, c2, c3, c4, c5]) = self.sub_determinants();
        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    /// Returns the inverse as the adjugate scaled by `1 / determinant`.
    ///
    /// A singular matrix is not reported: its inverse comes back full of Inf/NaN.
    pub fn invert(&self) -> Self {
        let [[m11, m12, m13, m14], [m21, m22, m23, m24], [m31, m32, m33, m34], [m41, m42, m43, m44]] =
            self.data;
        let ([s0, s1, s2, s3, s4, s5], [c0, c1, c2, c3, c4, c5]) = self.sub_determinants();

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;

        let adjugate = Self::new([
            [
                m22 * c5 - m23 * c4 + m24 * c3,
                -m12 * c5 + m13 * c4 - m14 * c3,
                m42 * s5 - m43 * s4 + m44 * s3,
                -m32 * s5 + m33 * s4 - m34 * s3,
            ],
            [
                -m21 * c5 + m23 * c2 - m24 * c1,
                m11 * c5 - m13 * c2 + m14 * c1,
                -m41 * s5 + m43 * s2 - m44 * s1,
                m31 * s5 - m33 * s2 + m34 * s1,
            ],
            [
                m21 * c4 - m22 * c2 + m24 * c0,
                -m11 * c4 + m12 * c2 - m14 * c0,
                m41 * s4 - m42 * s2 + m44 * s0,
                -m31 * s4 + m32 * s2 - m34 * s0,
            ],
            [
                -m21 * c3 + m22 * c1 - m23 * c0,
                m11 * c3 - m12 * c1 + m13 * c0,
                -m41 * s3 + m42 * s1 - m43 * s0,
                m31 * s3 - m32 * s1 + m33 * s0,
            ],
        ]);

        adjugate * (1.0 / det)
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;

        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = self.data[j][i];
            }
        }

        result
    }

    /// Splits the matrix into scale, rotation and translation.
    ///
    /// Scale is the length of each of the first three rows. Returns `None` if
    /// any of them is exactly zero. Shear and negative scale are not detected;
    /// the rotation of such a matrix is meaningless.
    pub fn decompose(&self) -> Option<(Vector3, Quaternion, Vector3)> {
        let [[m11, m12, m13, _], [m21, m22, m23, _], [m31, m32, m33, _], [m41, m42, m43, _]] = self.data;

        let scale_x = (m11 * m11 + m12 * m12 + m13 * m13).sqrt();
        let scale_y = (m21 * m21 + m22 * m22 + m23 * m23).sqrt();
        let scale_z = (m31 * m31 + m32 * m32 + m33 * m33).sqrt();

        if scale_x == 0.0 || scale_y == 0.0 || scale_z == 0.0 {
            log::debug!(
                "cannot decompose matrix with a zero axis scale ({}, {}, {})",
                scale_x,
                scale_y,
                scale_z
            );
            return None;
        }

        let rotation = Self::new([
            [m11 / scale_x, m12 / scale_x, m13 / scale_x, 0.0],
            [m21 / scale_y, m22 / scale_y, m23 / scale_y, 0.0],
            [m31 / scale_z, m32 / scale_z, m33 / scale_z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        Some((
            Vector3::new(scale_x, scale_y, scale_z),
            Quaternion::from_rotation_matrix(&rotation),
            Vector3::new(m41, m42, m43),
        ))
    }

    /// Out-parameter form of [`Self::decompose`].
    ///
    /// On failure only `rotation` is written (set to identity) and `false` is returned.
    pub fn decompose_into(&self, scale: &mut Vector3, rotation: &mut Quaternion, translation: &mut Vector3) -> bool {
        match self.decompose() {
            Some((s, r, t)) => {
                *scale = s;
                *rotation = r;
                *translation = t;
                true
            }
            None => {
                *rotation = Quaternion::IDENTITY;
                false
            }
        }
    }

    /// Creates a spherical billboard that rotates around `object_position` to face the camera.
    ///
    /// When the camera sits on the object the facing direction is taken from
    /// `camera_forward`, or [`Vector3::FORWARD`] if none is given.
    pub fn create_billboard(
        object_position: Vector3,
        camera_position: Vector3,
        camera_up: Vector3,
        camera_forward: Option<Vector3>,
    ) -> Self {
        let mut z_basis = object_position - camera_position;
        if z_basis.length_squared() < BILLBOARD_MIN_DISTANCE_SQUARED {
            z_basis = camera_forward.map_or(Vector3::FORWARD, |forward| -forward);
        }
        let z_basis = z_basis.normalize();
        let x_basis = camera_up.cross(&z_basis).normalize();
        let y_basis = z_basis.cross(&x_basis);

        Self::from_basis(x_basis, y_basis, z_basis, object_position)
    }

    /// Creates a cylindrical billboard that only rotates about `rotate_axis`.
    ///
    /// If the view direction is within the parallel threshold of the axis, the
    /// facing hint comes from `object_forward`; if that is also parallel (or
    /// absent), from [`Vector3::FORWARD`], or [`Vector3::RIGHT`] when the axis
    /// itself is forward.
    pub fn create_constrained_billboard(
        object_position: Vector3,
        camera_position: Vector3,
        rotate_axis: Vector3,
        camera_forward: Option<Vector3>,
        object_forward: Option<Vector3>,
    ) -> Self {
        let to_object = object_position - camera_position;
        let distance_squared = to_object.length_squared();
        let to_object = if distance_squared < BILLBOARD_MIN_DISTANCE_SQUARED {
            camera_forward.map_or(Vector3::FORWARD, |forward| -forward)
        } else {
            to_object / distance_squared.sqrt()
        };

        let mut z_hint = to_object;
        let mut axis_dot = rotate_axis.dot(&z_hint).abs();

        if axis_dot > BILLBOARD_PARALLEL_DOT {
            if let Some(forward) = object_forward {
                z_hint = forward;
                axis_dot = rotate_axis.dot(&z_hint).abs();
            }
        }

        if axis_dot > BILLBOARD_PARALLEL_DOT {
            z_hint = if rotate_axis.dot(&Vector3::FORWARD).abs() > BILLBOARD_PARALLEL_DOT {
                Vector3::RIGHT
            } else {
                Vector3::FORWARD
            };
        }

        let y_basis = rotate_axis.normalize();
        let x_basis = y_basis.cross(&z_hint).normalize();
        let z_basis = x_basis.cross(&y_basis).normalize();

        Self::from_basis(x_basis, rotate_axis, z_basis, object_position)
    }

    fn from_basis(x: Vector3, y: Vector3, z: Vector3, translation: Vector3) -> Self {
        Self::new([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [translation.x, translation.y, translation.z, 1.0],
        ])
    }

    /// Creates a rotation of `angle` radians about a unit-length `axis`
    pub fn create_from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let Vector3 { x, y, z } = axis;
        let (s, c) = angle.sin_cos();
        let inv = 1.0 - c;

        Self::new([
            [x * x * inv + c, x * y * inv + z * s, x * z * inv - y * s, 0.0],
            [x * y * inv - z * s, y * y * inv + c, y * z * inv + x * s, 0.0],
            [x * z * inv + y * s, y * z * inv - x * s, z * z * inv + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the rotation matrix of a unit quaternion
    pub fn create_from_quaternion(q: &Quaternion) -> Self {
        let Quaternion { x, y, z, w } = *q;

        Self::new([
            [1.0 - 2.0 * y * y - 2.0 * z * z, 2.0 * x * y + 2.0 * z * w, 2.0 * x * z - 2.0 * y * w, 0.0],
            [2.0 * x * y - 2.0 * z * w, 1.0 - 2.0 * x * x - 2.0 * z * z, 2.0 * y * z + 2.0 * x * w, 0.0],
            [2.0 * x * z + 2.0 * y * w, 2.0 * y * z - 2.0 * x * w, 1.0 - 2.0 * x * x - 2.0 * y * y, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// See [`Quaternion::from_yaw_pitch_roll`]
    pub fn create_from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::create_from_quaternion(&Quaternion::from_yaw_pitch_roll(yaw, pitch, roll))
    }

    /// Creates a view matrix for a camera at `camera_position` looking at `target`.
    ///
    /// The camera looks down its local -Z, matching the projection factories:
    /// the camera position maps to the origin and `target` onto -Z. The z basis
    /// is `camera_position - target`, not `target - camera_position`.
    pub fn create_look_at(camera_position: Vector3, target: Vector3, camera_up: Vector3) -> Self {
        let z_basis = (camera_position - target).normalize();
        let x_basis = camera_up.cross(&z_basis).normalize();
        let y_basis = z_basis.cross(&x_basis);

        Self::new([
            [x_basis.x, y_basis.x, z_basis.x, 0.0],
            [x_basis.y, y_basis.y, z_basis.y, 0.0],
            [x_basis.z, y_basis.z, z_basis.z, 0.0],
            [
                -x_basis.dot(&camera_position),
                -y_basis.dot(&camera_position),
                -z_basis.dot(&camera_position),
                1.0,
            ],
        ])
    }

    /// Creates a centered orthographic projection
    pub fn create_orthographic(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::new([
            [2.0 / width, 0.0, 0.0, 0.0],
            [0.0, 2.0 / height, 0.0, 0.0],
            [0.0, 0.0, 1.0 / (z_near - z_far), 0.0],
            [0.0, 0.0, z_near / (z_near - z_far), 1.0],
        ])
    }

    /// Creates an orthographic projection for an arbitrary view volume
    pub fn create_orthographic_off_center(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::new([
            [2.0 / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (top - bottom), 0.0, 0.0],
            [0.0, 0.0, 1.0 / (z_near - z_far), 0.0],
            [
                (left + right) / (left - right),
                (top + bottom) / (bottom - top),
                z_near / (z_near - z_far),
                1.0,
            ],
        ])
    }

    /// Creates a perspective projection from the size of the near plane.
    ///
    /// Fails with [`MathError::OutOfRange`] unless `0 <= z_near <= z_far`.
    pub fn create_perspective(width: f32, height: f32, z_near: f32, z_far: f32) -> Result<Self> {
        check_depth_range(z_near, z_far)?;

        Ok(Self::new([
            [2.0 * z_near / width, 0.0, 0.0, 0.0],
            [0.0, 2.0 * z_near / height, 0.0, 0.0],
            [0.0, 0.0, z_far / (z_near - z_far), -1.0],
            [0.0, 0.0, z_near * z_far / (z_near - z_far), 0.0],
        ]))
    }

    /// Creates a perspective projection from a vertical field of view in radians.
    ///
    /// Fails with [`MathError::OutOfRange`] unless `0 <= field_of_view <= pi`
    /// and `0 <= z_near <= z_far`.
    pub fn create_perspective_field_of_view(
        field_of_view: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self> {
        if !(field_of_view >= 0.0 && field_of_view <= math::PI) {
            log::warn!("rejected perspective field of view {}", field_of_view);
            return Err(MathError::OutOfRange {
                argument: "field_of_view",
                reason: "must be between 0 and pi radians",
            });
        }
        check_depth_range(z_near, z_far)?;

        let half = field_of_view / 2.0;
        let y_scale = half.cos() / half.sin();
        let x_scale = y_scale / aspect_ratio;

        Ok(Self::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, z_far / (z_near - z_far), -1.0],
            [0.0, 0.0, z_near * z_far / (z_near - z_far), 0.0],
        ]))
    }

    /// Creates a perspective projection for an arbitrary view volume.
    ///
    /// Fails with [`MathError::OutOfRange`] unless `0 <= z_near <= z_far`.
    pub fn create_perspective_off_center(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self> {
        check_depth_range(z_near, z_far)?;

        Ok(Self::new([
            [2.0 * z_near / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 * z_near / (top - bottom), 0.0, 0.0],
            [
                (left + right) / (right - left),
                (top + bottom) / (top - bottom),
                z_far / (z_near - z_far),
                -1.0,
            ],
            [0.0, 0.0, z_near * z_far / (z_near - z_far), 0.0],
        ]))
    }

    /// Creates a matrix that mirrors points across `plane` (normalized first)
    pub fn create_reflection(plane: &Plane) -> Self {
        let plane = plane.normalize();
        let Vector3 { x: a, y: b, z: c } = plane.normal;
        let d = plane.d;

        let ab = -2.0 * a * b;
        let ac = -2.0 * a * c;
        let bc = -2.0 * b * c;

        Self::new([
            [1.0 - 2.0 * a * a, ab, ac, 0.0],
            [ab, 1.0 - 2.0 * b * b, bc, 0.0],
            [ac, bc, 1.0 - 2.0 * c * c, 0.0],
            [-2.0 * a * d, -2.0 * b * d, -2.0 * c * d, 1.0],
        ])
    }

    /// Creates a matrix that flattens geometry onto `plane` along `light_direction`,
    /// the direction pointing toward a directional light.
    pub fn create_shadow(light_direction: Vector3, plane: &Plane) -> Self {
        let plane = plane.normalize();
        let l = -light_direction;
        let n = plane.normal;
        let d = plane.d;
        let s = -l.dot(&n);

        Self::new([
            [n.x * l.x + s, n.x * l.y, n.x * l.z, 0.0],
            [n.y * l.x, n.y * l.y + s, n.y * l.z, 0.0],
            [n.z * l.x, n.z * l.y, n.z * l.z + s, 0.0],
            [d * l.x, d * l.y, d * l.z, s],
        ])
    }

    /// Creates a rotation about the x axis
    pub fn create_rotation_x(angle: f32) -> Self {
        Self::create_from_axis_angle(Vector3::RIGHT, angle)
    }

    /// Creates a rotation about the y axis
    pub fn create_rotation_y(angle: f32) -> Self {
        Self::create_from_axis_angle(Vector3::UP, angle)
    }

    /// Creates a rotation about the z axis
    pub fn create_rotation_z(angle: f32) -> Self {
        Self::create_from_axis_angle(Vector3::BACKWARD, angle)
    }

    /// Creates a uniform scaling matrix
    #[inline]
    pub fn create_scale(scale: f32) -> Self {
        Self::create_scale_xyz(scale, scale, scale)
    }

    /// Creates a scaling matrix with a factor per axis
    pub fn create_scale_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scaling matrix from a vector of per-axis factors
    #[inline]
    pub fn from_scale(scale: Vector3) -> Self {
        Self::create_scale_xyz(scale.x, scale.y, scale.z)
    }

    /// Creates a translation matrix
    pub fn create_translation(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::IDENTITY;
        result.data[3][0] = x;
        result.data[3][1] = y;
        result.data[3][2] = z;
        result
    }

    /// Creates a translation matrix from a vector
    #[inline]
    pub fn from_translation(translation: Vector3) -> Self {
        Self::create_translation(translation.x, translation.y, translation.z)
    }

    /// Creates a world matrix placing an object at `position`, facing `forward`.
    ///
    /// `forward` and `up` are normalized and `up` is re-derived so the basis is
    /// orthonormal; the object's forward ends up as its local -Z.
    pub fn create_world(position: Vector3, forward: Vector3, up: Vector3) -> Self {
        let forward = forward.normalize();
        let up = up.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);

        Self::from_basis(right, up, -forward, position)
    }

    /// Interpolates every element independently. Not rotation aware.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let mut result = Self::ZERO;

        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = math::lerp(self.data[i][j], to.data[i][j], t);
            }
        }

        result
    }

    /// Appends a rotation: `self * create_from_quaternion(rotation)`
    #[inline]
    pub fn transform(&self, rotation: &Quaternion) -> Self {
        *self * Self::create_from_quaternion(rotation)
    }

    /// Convert to nalgebra Matrix4
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix4<f32> {
        let m = &self.data;

        na::Matrix4::new(
            m[0][0], m[0][1], m[0][2], m[0][3],
            m[1][0], m[1][1], m[1][2], m[1][3],
            m[2][0], m[2][1], m[2][2], m[2][3],
            m[3][0], m[3][1], m[3][2], m[3][3],
        )
    }

    /// Convert from nalgebra Matrix4
    #[inline]
    pub fn from_nalgebra(m: &na::Matrix4<f32>) -> Self {
        let mut result = Self::ZERO;

        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = m[(i, j)];
            }
        }

        result
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(self.data.map(|row| row.map(&f)))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = Self::ZERO;

        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = f(self.data[i][j], other.data[i][j]);
            }
        }

        result
    }
}

fn check_depth_range(z_near: f32, z_far: f32) -> Result<()> {
    if z_near > z_far {
        log::warn!("rejected perspective depth range: near {} > far {}", z_near, z_far);
        return Err(MathError::OutOfRange {
            argument: "z_near",
            reason: "must be less than or equal to z_far",
        });
    }
    if z_near < 0.0 || z_far < 0.0 {
        log::warn!("rejected negative perspective depth range {}..{}", z_near, z_far);
        return Err(MathError::OutOfRange {
            argument: "z_near/z_far",
            reason: "must not be negative",
        });
    }
    Ok(())
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[0][0], self.data[0][1], self.data[0][2], self.data[0][3])?;
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[1][0], self.data[1][1], self.data[1][2], self.data[1][3])?;
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[2][0], self.data[2][1], self.data[2][2], self.data[2][3])?;
        write!(f, "[ {}, {}, {}, {} ]", self.data[3][0], self.data[3][1], self.data[3][2], self.data[3][3])
    }
}

impl approx::AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        <f32 as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
    }
}

impl approx::RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        <f32 as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
    }
}

impl Add for Matrix4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

/// Matrix product, row by column
impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Self::ZERO;

        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[i][k] * rhs.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }

        result
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        self.map(|a| a * rhs)
    }
}

impl Mul<Matrix4> for f32 {
    type Output = Matrix4;

    #[inline]
    fn mul(self, rhs: Matrix4) -> Self::Output {
        rhs * self
    }
}

/// Element-wise division
impl Div for Matrix4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a / b)
    }
}

impl Div<f32> for Matrix4 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        self.map(|a| a / rhs)
    }
}

impl Neg for Matrix4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}

impl AddAssign for Matrix4 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Matrix4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Matrix4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign for Matrix4 {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl DivAssign<f32> for Matrix4 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix4 {
        Matrix4::new([
            [2.0, 0.0, 1.0, 0.0],
            [1.0, 3.0, 0.0, 0.0],
            [0.0, 1.0, 4.0, 0.0],
            [5.0, -2.0, 1.0, 1.0],
        ])
    }

    #[test]
    fn translation_round_trip() {
        assert_eq!(Matrix4::create_translation(1.0, 2.0, 3.0).translation(), Vector3::new(1.0, 2.0, 3.0));

        let mut m = Matrix4::IDENTITY;
        m.set_translation(Vector3::new(-4.0, 0.5, 9.0));
        assert_eq!(m, Matrix4::create_translation(-4.0, 0.5, 9.0));
    }

    #[test]
    fn basis_setters_mirror_getters() {
        let mut m = Matrix4::IDENTITY;
        m.set_left(Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(m.left(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(m.right(), Vector3::new(0.0, 0.0, -1.0));

        m.set_down(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(m.up(), Vector3::new(-1.0, 0.0, 0.0));

        m.set_forward(Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(m.backward(), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(Matrix4::IDENTITY.forward(), Vector3::FORWARD);
    }

    #[test]
    fn determinant_matches_nalgebra() {
        let m = sample();
        assert_relative_eq!(m.determinant(), m.to_nalgebra().determinant(), epsilon = 1e-4);
        assert_eq!(Matrix4::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn invert_matches_nalgebra() {
        let m = sample();
        let expected = m.to_nalgebra().try_inverse().map(|inv| Matrix4::from_nalgebra(&inv));
        assert!(expected.is_some());
        if let Some(expected) = expected {
            assert_relative_eq!(m.invert(), expected, epsilon = 1e-5);
        }
        assert_relative_eq!(m * m.invert(), Matrix4::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn singular_inverse_is_not_finite() {
        let inv = Matrix4::ZERO.invert();
        assert!(inv.data.iter().flatten().all(|v| !v.is_finite()));
    }

    #[test]
    fn product_applies_left_operand_first() {
        let scale = Matrix4::create_scale(2.0);
        let move_x = Matrix4::create_translation(1.0, 0.0, 0.0);
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(p.transform(&(scale * move_x)), Vector3::new(3.0, 2.0, 2.0));
        assert_eq!(p.transform(&(move_x * scale)), Vector3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn element_wise_operators() {
        let m = sample();
        assert_eq!(m + m, m * 2.0);
        assert_eq!(m - m, Matrix4::ZERO);
        assert_eq!(-m + m, Matrix4::ZERO);
        assert_eq!((m * 4.0) / 2.0, 2.0 * m);

        let sixes = Matrix4::new([[6.0; 4]; 4]);
        let threes = Matrix4::new([[3.0; 4]; 4]);
        assert_eq!(sixes / threes, Matrix4::new([[2.0; 4]; 4]));
    }

    #[test]
    fn lerp_endpoints() {
        let a = sample();
        let b = Matrix4::create_rotation_x(0.3);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_relative_eq!(a.lerp(&b, 1.0), b, epsilon = 1e-6);
    }

    #[test]
    fn equality_is_exact_unlike_vectors() {
        let mut m = Matrix4::IDENTITY;
        m.data[3][0] = 1e-10;
        assert!(m != Matrix4::IDENTITY);
        assert_eq!(Vector3::new(1e-10, 0.0, 0.0), Vector3::ZERO);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.data[0][3], m.data[3][0]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn catmull_rom_basis_matches_scalar_helper() {
        let t: f32 = 0.3;
        let weights = crate::math::Vector4::new(t * t * t, t * t, t, 1.0).transform(&Matrix4::CATMULL_ROM);
        let points = crate::math::Vector4::new(1.0, 4.0, -2.0, 3.0);
        assert_relative_eq!(
            weights.dot(&points),
            math::catmull_rom(1.0, 4.0, -2.0, 3.0, t),
            epsilon = 1e-5
        );
    }
}
