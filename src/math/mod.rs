#[macro_use]
mod macros;

pub mod vector;
pub mod matrix;
pub mod rotation;
pub mod plane;
pub mod transform;

pub use vector::{Vector2, Vector3, Vector4};
pub use matrix::Matrix4;
pub use rotation::{Quaternion, Rotation};
pub use plane::Plane;
pub use transform::{NormalTransform, VectorTransform};

pub use crate::config::{epsilon, set_epsilon, DEFAULT_EPSILON};

/// Euler's number
pub const E: f32 = std::f32::consts::E;

/// Base-10 logarithm of e
pub const LOG10E: f32 = std::f32::consts::LOG10_E;

/// Base-2 logarithm of e
pub const LOG2E: f32 = std::f32::consts::LOG2_E;

/// The value of pi
pub const PI: f32 = std::f32::consts::PI;

/// Pi divided by two
pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;

/// Pi divided by four
pub const PI_OVER_4: f32 = std::f32::consts::FRAC_PI_4;

/// Two times pi
pub const TWO_PI: f32 = 2.0 * PI;

/// Returns true if `|a - b|` is strictly less than the given tolerance
#[inline]
pub fn equal_within(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Returns true if `|a - b|` is strictly less than the global epsilon
#[inline]
pub fn equal_within_epsilon(a: f32, b: f32) -> bool {
    equal_within(a, b, epsilon())
}

/// Returns the larger of two values.
///
/// Comparison based, so a NaN in `a` yields `b`.
#[inline]
pub fn max(a: f32, b: f32) -> f32 {
    if a > b { a } else { b }
}

/// Returns the smaller of two values.
///
/// Comparison based, so a NaN in `a` yields `b`.
#[inline]
pub fn min(a: f32, b: f32) -> f32 {
    if a < b { a } else { b }
}

/// Clamps a value between a minimum and maximum value.
///
/// Evaluated as `max(min, min(max, value))`: when `min > max` the lower bound wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    self::max(min, self::min(max, value))
}

/// Absolute difference between two values
#[inline]
pub fn distance(a: f32, b: f32) -> f32 {
    (a - b).abs()
}

/// Linearly interpolates between two values. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease between two values, with `t` clamped to [0, 1]
#[inline]
pub fn smooth_step(a: f32, b: f32, t: f32) -> f32 {
    let t = clamp(t, 0.0, 1.0);
    lerp(a, b, t * t * (3.0 - 2.0 * t))
}

/// Evaluates a point of a triangle on one axis from its vertex coordinates and
/// the barycentric weights of the second and third vertex.
///
/// Both weights are clamped to [0, 1] before blending.
#[inline]
pub fn barycentric(p1: f32, p2: f32, p3: f32, b2: f32, b3: f32) -> f32 {
    let b2 = clamp(b2, 0.0, 1.0);
    let b3 = clamp(b3, 0.0, 1.0);
    (1.0 - b2 - b3) * p1 + b2 * p2 + b3 * p3
}

/// Catmull-Rom spline through `p2` (t = 0) and `p3` (t = 1), shaped by `p1` and `p4`
pub fn catmull_rom(p1: f32, p2: f32, p3: f32, p4: f32, t: f32) -> f32 {
    let three_halves = 1.5 * t;
    let one_half = t / 2.0;

    let c1 = (-0.5 + t * (1.0 - one_half)) * p1;
    let c2 = (1.0 + t * t * (-2.5 + three_halves)) * p2;
    let c3 = (0.5 + t * (2.0 - three_halves)) * p3;
    let c4 = (-0.5 + one_half) * t * p4;

    c2 + t * (c1 + c3 + c4)
}

/// Cubic Hermite spline between `v1` and `v2` with tangents `m1` and `m2`
pub fn hermite(v1: f32, m1: f32, v2: f32, m2: f32, t: f32) -> f32 {
    let s = 1.0 - t;
    let c1 = s * s * ((1.0 + 2.0 * t) * v1 + t * m1);
    let c2 = t * t * ((3.0 - 2.0 * t) * v2 + (t - 1.0) * m2);
    c1 + c2
}

/// Returns -1, 0 or 1 for negative, zero and positive values. NaN yields -1.
#[inline]
pub fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value == 0.0 {
        0
    } else {
        -1
    }
}

/// Converts degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Converts radians to degrees
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Reduces an angle in radians into the range (-pi, pi]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle % TWO_PI;
    if wrapped > PI {
        wrapped - TWO_PI
    } else if wrapped <= -PI {
        wrapped + TWO_PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamp_keeps_max_of_min_order() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        // inverted bounds resolve to the lower bound
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 2.0), 6.0);
        assert_eq!(lerp(2.0, 4.0, -1.0), 0.0);
    }

    #[test]
    fn smooth_step_clamps_amount() {
        assert_eq!(smooth_step(0.0, 10.0, -3.0), 0.0);
        assert_eq!(smooth_step(0.0, 10.0, 3.0), 10.0);
        assert_relative_eq!(smooth_step(0.0, 10.0, 0.5), 5.0);
        assert_relative_eq!(smooth_step(0.0, 1.0, 0.25), 0.15625);
    }

    #[test]
    fn spline_endpoints() {
        assert_relative_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 0.0), 1.0);
        assert_relative_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 1.0), 2.0);
        assert_relative_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 0.5), 1.5);

        assert_relative_eq!(hermite(1.0, 0.0, 3.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(hermite(1.0, 0.0, 3.0, 0.0, 1.0), 3.0);
        assert_relative_eq!(hermite(1.0, 0.0, 3.0, 0.0, 0.5), 2.0);
    }

    #[test]
    fn barycentric_weights() {
        assert_relative_eq!(barycentric(1.0, 2.0, 3.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(barycentric(1.0, 2.0, 3.0, 1.0, 0.0), 2.0);
        assert_relative_eq!(barycentric(1.0, 2.0, 3.0, 0.0, 1.0), 3.0);
        // out of range weights are clamped
        assert_relative_eq!(barycentric(1.0, 2.0, 3.0, 2.0, 0.0), 2.0);
    }

    #[test]
    fn sign_and_conversions() {
        assert_eq!(sign(-0.5), -1);
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(7.0), 1);
        assert_relative_eq!(to_radians(180.0), PI);
        assert_relative_eq!(to_degrees(PI_OVER_2), 90.0);
        assert_eq!(distance(-2.0, 3.0), 5.0);
    }

    #[test]
    fn wrap_angle_range() {
        // 3pi and pi are the same angle; f32 rounding lands on the +pi end
        assert_relative_eq!(wrap_angle(3.0 * PI).abs(), PI, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(PI_OVER_2 + TWO_PI), PI_OVER_2, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-PI_OVER_2 - TWO_PI), -PI_OVER_2, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(1.5 * PI), -PI_OVER_2, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-1.5 * PI), PI_OVER_2, epsilon = 1e-5);
    }

    #[test]
    fn epsilon_comparison_is_strict() {
        assert!(equal_within(1.0, 1.05, 0.1));
        assert!(!equal_within(1.0, 1.5, 0.5));
        assert!(!equal_within(0.0, 0.25, 0.25));
    }
}
