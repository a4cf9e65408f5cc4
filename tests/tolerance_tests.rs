// The global epsilon is process-wide, so everything that changes it lives in
// this single test.

use math3d::config::Tolerance;
use math3d::math::{self, Quaternion, Vector3};

#[test]
fn test_global_epsilon_drives_equality() {
    let _ = env_logger::builder().is_test(true).try_init();

    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(1.001, 2.0, 3.0);

    assert_eq!(math::epsilon(), math::DEFAULT_EPSILON);
    assert_ne!(a, b);
    assert!(!math::equal_within_epsilon(1.0, 1.001));

    math::set_epsilon(0.01);
    assert_eq!(Tolerance::global().epsilon, 0.01);
    assert_eq!(a, b);
    assert!(math::equal_within_epsilon(1.0, 1.001));
    assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 1.0), Quaternion::new(0.005, 0.0, 0.0, 1.0));

    // The bound is strict
    assert!(!math::equal_within_epsilon(1.0, 1.5));

    Tolerance::default().install();
    assert_eq!(math::epsilon(), f32::EPSILON);
    assert_ne!(a, b);
}
