use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tolerance used by approximate equality when nothing else is configured
pub const DEFAULT_EPSILON: f32 = f32::EPSILON;

// Bit pattern of the process-wide epsilon. Stored as bits so that readers and
// writers on different threads never observe a torn value.
static GLOBAL_EPSILON: AtomicU32 = AtomicU32::new(DEFAULT_EPSILON.to_bits());

/// Comparison settings for approximate float equality.
///
/// Vector and quaternion `==` read the process-wide tolerance installed with
/// [`Tolerance::install`]. Code that must not depend on global state can keep
/// its own `Tolerance` and compare through [`Tolerance::approx_eq`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Tolerance {
    /// Two values are equal when their absolute difference is strictly below this
    pub epsilon: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given epsilon
    #[inline]
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Returns the tolerance currently installed for the whole process
    #[inline]
    pub fn global() -> Self {
        Self::new(f32::from_bits(GLOBAL_EPSILON.load(Ordering::Relaxed)))
    }

    /// Makes this tolerance the process-wide one. The change is visible to all
    /// threads immediately.
    pub fn install(self) {
        let previous = f32::from_bits(GLOBAL_EPSILON.swap(self.epsilon.to_bits(), Ordering::Relaxed));
        log::debug!("global epsilon changed from {} to {}", previous, self.epsilon);
    }

    /// Returns true if `|a - b| < epsilon`
    #[inline]
    pub fn approx_eq(&self, a: f32, b: f32) -> bool {
        crate::math::equal_within(a, b, self.epsilon)
    }
}

/// Returns the process-wide epsilon
#[inline]
pub fn epsilon() -> f32 {
    Tolerance::global().epsilon
}

/// Overwrites the process-wide epsilon
#[inline]
pub fn set_epsilon(epsilon: f32) {
    Tolerance::new(epsilon).install();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_machine_epsilon() {
        assert_eq!(Tolerance::default().epsilon, f32::EPSILON);
    }

    #[test]
    fn local_tolerance_ignores_global() {
        let loose = Tolerance::new(0.5);
        assert!(loose.approx_eq(1.0, 1.25));
        assert!(!Tolerance::default().approx_eq(1.0, 1.25));
    }
}
