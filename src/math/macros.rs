// Shared trait impls for the fixed-size float aggregates in this module.

/// `==` that compares every component against the global epsilon
macro_rules! impl_epsilon_eq {
    ($t: ident, $($c: ident),+) => {
        impl PartialEq for $t {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                let epsilon = crate::math::epsilon();
                $( crate::math::equal_within(self.$c, other.$c, epsilon) )&&+
            }
        }
    };
}

/// `approx` comparisons applied per component
macro_rules! impl_approx_eq {
    ($t: ident, $($c: ident),+) => {
        impl approx::AbsDiffEq for $t {
            type Epsilon = f32;

            #[inline]
            fn default_epsilon() -> f32 {
                <f32 as approx::AbsDiffEq>::default_epsilon()
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $( approx::AbsDiffEq::abs_diff_eq(&self.$c, &other.$c, epsilon) )&&+
            }
        }

        impl approx::RelativeEq for $t {
            #[inline]
            fn default_max_relative() -> f32 {
                <f32 as approx::RelativeEq>::default_max_relative()
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $( approx::RelativeEq::relative_eq(&self.$c, &other.$c, epsilon, max_relative) )&&+
            }
        }
    };
}

/// Component-wise `+ - * /` between two values, broadcast `* /` with a scalar,
/// negation, and the assigning forms of all of them
macro_rules! impl_componentwise_ops {
    ($t: ident, $($c: ident),+) => {
        impl std::ops::Add for $t {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self { $( $c: self.$c + rhs.$c ),+ }
            }
        }

        impl std::ops::Sub for $t {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self { $( $c: self.$c - rhs.$c ),+ }
            }
        }

        impl std::ops::Mul for $t {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self { $( $c: self.$c * rhs.$c ),+ }
            }
        }

        impl std::ops::Div for $t {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self::Output {
                Self { $( $c: self.$c / rhs.$c ),+ }
            }
        }

        impl std::ops::Mul<f32> for $t {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self::Output {
                Self { $( $c: self.$c * rhs ),+ }
            }
        }

        impl std::ops::Mul<$t> for f32 {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: $t) -> Self::Output {
                rhs * self
            }
        }

        impl std::ops::Div<f32> for $t {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self::Output {
                Self { $( $c: self.$c / rhs ),+ }
            }
        }

        impl std::ops::Neg for $t {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self::Output {
                Self { $( $c: -self.$c ),+ }
            }
        }

        impl std::ops::AddAssign for $t {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $( self.$c += rhs.$c; )+
            }
        }

        impl std::ops::SubAssign for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $( self.$c -= rhs.$c; )+
            }
        }

        impl std::ops::MulAssign for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                $( self.$c *= rhs.$c; )+
            }
        }

        impl std::ops::DivAssign for $t {
            #[inline]
            fn div_assign(&mut self, rhs: Self) {
                $( self.$c /= rhs.$c; )+
            }
        }

        impl std::ops::MulAssign<f32> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                $( self.$c *= rhs; )+
            }
        }

        impl std::ops::DivAssign<f32> for $t {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                $( self.$c /= rhs; )+
            }
        }
    };
}

/// Conversions to and from a plain array in component order
macro_rules! impl_array_conversions {
    ($t: ident, $n: literal, $($c: ident),+) => {
        impl From<[f32; $n]> for $t {
            #[inline]
            fn from(array: [f32; $n]) -> Self {
                let [$($c),+] = array;
                Self { $($c),+ }
            }
        }

        impl From<$t> for [f32; $n] {
            #[inline]
            fn from(value: $t) -> Self {
                [$(value.$c),+]
            }
        }
    };
}
