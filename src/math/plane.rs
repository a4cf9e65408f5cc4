use std::fmt;

use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An infinite plane holding the points `p` where `normal · p + d == 0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// Normal of the plane, not necessarily unit length
    pub normal: Vector3,

    /// Signed offset: `-d` is the distance from the origin along a unit normal
    pub d: f32,
}

impl Plane {
    /// Creates a plane from its raw coefficients
    #[inline]
    pub const fn new(normal: Vector3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Creates a plane through `point` with the given normal (normalized)
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        let normal = normal.normalize();
        let d = -normal.dot(&point);
        Self { normal, d }
    }

    /// Returns the plane scaled so that its normal has unit length
    pub fn normalize(&self) -> Self {
        let length = self.normal.length();
        Self {
            normal: self.normal / length,
            d: self.d / length,
        }
    }

    /// Evaluates `normal · point + d`; the signed distance when the plane is normalized
    #[inline]
    pub fn dot_coordinate(&self, point: &Vector3) -> f32 {
        self.normal.dot(point) + self.d
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Plane({}, {})", self.normal, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_on_plane_has_zero_coordinate() {
        let plane = Plane::from_point_normal(Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(plane.dot_coordinate(&Vector3::new(5.0, 3.0, -1.0)), 0.0);
        assert_relative_eq!(plane.dot_coordinate(&Vector3::new(0.0, 5.0, 0.0)), 2.0);
    }

    #[test]
    fn normalize_keeps_the_same_surface() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 4.0), -8.0).normalize();
        assert_relative_eq!(plane.normal, Vector3::UNIT_Z);
        assert_relative_eq!(plane.d, -2.0);
        assert_relative_eq!(plane.dot_coordinate(&Vector3::new(1.0, 1.0, 2.0)), 0.0);
    }
}
