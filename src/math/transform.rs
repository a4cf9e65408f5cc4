//! Applying matrices and quaternions to whole buffers of vectors.
//!
//! Every transform that a vector type supports one at a time (by matrix, by
//! matrix as a normal, by quaternion) is exposed here through
//! [`VectorTransform`], so a single set of bulk functions covers all of them.

use crate::error::MathError;
use crate::math::{Matrix4, Quaternion, Vector2, Vector3, Vector4};
use crate::Result;

/// Something that maps a vector of type `V` to another `V`
pub trait VectorTransform<V> {
    fn apply(&self, v: &V) -> V;
}

/// Applies a matrix to direction vectors: the translation row is ignored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalTransform(pub Matrix4);

macro_rules! impl_vector_transform {
    ($($v: ident),+) => {
        $(
            impl VectorTransform<$v> for Matrix4 {
                #[inline]
                fn apply(&self, v: &$v) -> $v {
                    v.transform(self)
                }
            }

            impl VectorTransform<$v> for NormalTransform {
                #[inline]
                fn apply(&self, v: &$v) -> $v {
                    v.transform_normal(&self.0)
                }
            }

            impl VectorTransform<$v> for Quaternion {
                #[inline]
                fn apply(&self, v: &$v) -> $v {
                    v.transform_quaternion(self)
                }
            }
        )+
    };
}

impl_vector_transform!(Vector2, Vector3, Vector4);

fn check_range(buffer: &'static str, start: usize, count: usize, len: usize) -> Result<()> {
    match start.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(MathError::IndexOutOfBounds {
            buffer,
            start,
            count,
            len,
        }),
    }
}

/// Transforms every element of `source` into the same position of `destination`.
///
/// Fails if `destination` is shorter than `source`; nothing is written then.
pub fn transform_all<V, T>(source: &[V], by: &T, destination: &mut [V]) -> Result<()>
where
    T: VectorTransform<V> + ?Sized,
{
    check_range("destination", 0, source.len(), destination.len())?;

    for (out, v) in destination.iter_mut().zip(source) {
        *out = by.apply(v);
    }

    Ok(())
}

/// Transforms every element of `buffer` in place
pub fn transform_all_in_place<V, T>(buffer: &mut [V], by: &T)
where
    T: VectorTransform<V> + ?Sized,
{
    for v in buffer.iter_mut() {
        *v = by.apply(v);
    }
}

/// Transforms `count` elements starting at `source_index` into `destination`
/// starting at `destination_index`.
///
/// Both ranges are checked before anything is written.
pub fn transform_range<V, T>(
    source: &[V],
    source_index: usize,
    by: &T,
    destination: &mut [V],
    destination_index: usize,
    count: usize,
) -> Result<()>
where
    T: VectorTransform<V> + ?Sized,
{
    check_range("source", source_index, count, source.len())?;
    check_range("destination", destination_index, count, destination.len())?;

    let inputs = &source[source_index..source_index + count];
    let outputs = &mut destination[destination_index..destination_index + count];
    for (out, v) in outputs.iter_mut().zip(inputs) {
        *out = by.apply(v);
    }

    Ok(())
}

/// Like [`transform_range`] with source and destination in the same buffer.
///
/// The ranges may overlap: the result is as if every source element had been
/// read before any destination element was written.
pub fn transform_range_in_place<V, T>(
    buffer: &mut [V],
    source_index: usize,
    by: &T,
    destination_index: usize,
    count: usize,
) -> Result<()>
where
    T: VectorTransform<V> + ?Sized,
{
    check_range("source", source_index, count, buffer.len())?;
    check_range("destination", destination_index, count, buffer.len())?;

    if destination_index > source_index {
        for i in (0..count).rev() {
            buffer[destination_index + i] = by.apply(&buffer[source_index + i]);
        }
    } else {
        for i in 0..count {
            buffer[destination_index + i] = by.apply(&buffer[source_index + i]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Vector3> {
        (0..n).map(|i| Vector3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn normal_transform_skips_translation() {
        let m = Matrix4::create_translation(5.0, 5.0, 5.0);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(NormalTransform(m).apply(&v), v);
        assert_eq!(m.apply(&v), Vector3::new(6.0, 7.0, 8.0));
    }

    #[test]
    fn transform_all_rejects_short_destination() {
        let source = ramp(4);
        let mut destination = vec![Vector3::ZERO; 3];
        let result = transform_all(&source, &Matrix4::IDENTITY, &mut destination);
        assert!(matches!(
            result,
            Err(MathError::IndexOutOfBounds { buffer: "destination", count: 4, len: 3, .. })
        ));
        assert!(destination.iter().all(|v| *v == Vector3::ZERO));
    }

    #[test]
    fn range_overflow_is_reported() {
        let source = ramp(2);
        let mut destination = ramp(2);
        let result = transform_range(&source, usize::MAX, &Quaternion::IDENTITY, &mut destination, 0, 2);
        assert!(matches!(result, Err(MathError::IndexOutOfBounds { buffer: "source", .. })));
    }

    #[test]
    fn overlapping_forward_shift() {
        let mut buffer = ramp(5);
        let by = Matrix4::create_translation(0.0, 1.0, 0.0);
        assert!(transform_range_in_place(&mut buffer, 0, &by, 2, 3).is_ok());

        let xs: Vec<f32> = buffer.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 0.0, 1.0, 2.0]);
        assert_eq!(buffer[2].y, 1.0);
        assert_eq!(buffer[1].y, 0.0);
    }

    #[test]
    fn overlapping_backward_shift() {
        let mut buffer = ramp(5);
        assert!(transform_range_in_place(&mut buffer, 2, &Matrix4::IDENTITY, 0, 3).is_ok());

        let xs: Vec<f32> = buffer.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 3.0, 4.0]);
    }
}
