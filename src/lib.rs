pub mod math;
pub mod config;

/// Re-export common types for easier usage
pub use crate::math::{Matrix4, Plane, Quaternion, Vector2, Vector3, Vector4};
pub use crate::config::Tolerance;

/// Error types for the math library
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum MathError {
        #[error("Argument out of range: {argument} {reason}")]
        OutOfRange {
            argument: &'static str,
            reason: &'static str,
        },

        #[error("Index out of bounds: {count} elements from {start} exceed the {buffer} buffer of length {len}")]
        IndexOutOfBounds {
            buffer: &'static str,
            start: usize,
            count: usize,
            len: usize,
        },
    }
}

pub use crate::error::MathError;

/// Result type for math library operations
pub type Result<T> = std::result::Result<T, error::MathError>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
