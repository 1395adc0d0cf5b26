//! Deep copy between structurally parallel value graphs.

use graft_core::{Array, MergeError, Path, ShapeError, Value};

use crate::{GraftError, debug, trace};

/// How primitive array elements of different kinds may be paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Widening {
    /// Accept a source kind that widens losslessly into the destination kind,
    /// e.g. `i32[]` into `i64[]`.
    ///
    /// Only pairs with a std `From` impl qualify. `char` into `i32` and
    /// integers into floats that cannot hold every value (`i32` into `f32`,
    /// `i64` into `f32` or `f64`) are rejected as shape mismatches.
    #[default]
    Lossless,
    /// Require identical kinds.
    Exact,
}

/// Options for [`copy_with`].
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Primitive kind pairing policy.
    pub widening: Widening,
}

impl CopyOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primitive kind pairing policy.
    pub fn widening(mut self, widening: Widening) -> Self {
        self.widening = widening;
        self
    }
}

/// Copy every leaf of `src` into `dst`, in place.
///
/// Equivalent to [`copy_with`] with default [`CopyOptions`].
///
/// ```
/// use graft::Value;
///
/// let mut dst = Value::from(vec![0i32; 3]);
/// let src = Value::from(vec![1i32, 2, 3]);
/// graft::copy(Some(&mut dst), Some(&src))?;
/// assert_eq!(dst.as_primitive_array(), src.as_primitive_array());
/// # Ok::<(), graft::GraftError>(())
/// ```
pub fn copy(dst: Option<&mut Value>, src: Option<&Value>) -> Result<(), GraftError> {
    copy_with(dst, src, &CopyOptions::default())
}

/// Copy every leaf of `src` into `dst`, in place.
///
/// - If either side is absent, nothing happens.
/// - If the two are not both arrays, `dst` must be an object whose type
///   accepts merges and `src` an object of the same type; the merge function
///   runs once.
/// - Paired arrays must have equal lengths. Primitive arrays are copied
///   element-wise; object arrays recurse slot by slot, skipping slots absent
///   on either side.
///
/// The whole graph is checked before anything is written: on error, `dst` is
/// unchanged. `src` is never modified.
pub fn copy_with(
    dst: Option<&mut Value>,
    src: Option<&Value>,
    options: &CopyOptions,
) -> Result<(), GraftError> {
    let (Some(dst), Some(src)) = (dst, src) else {
        trace!("copy: absent operand, nothing to do");
        return Ok(());
    };
    debug!(destination = %dst.type_name(), source = %src.type_name(), "copy");

    let mut path = Path::new();
    check(dst, src, options, &mut path)?;
    apply(dst, src, &mut path)
}

fn check(
    dst: &Value,
    src: &Value,
    options: &CopyOptions,
    path: &mut Path,
) -> Result<(), GraftError> {
    match (dst, src) {
        (Value::Array(d), Value::Array(s)) => {
            if d.len() != s.len() {
                return Err(GraftError::LengthMismatch {
                    path: path.clone(),
                    destination_len: d.len(),
                    source_len: s.len(),
                });
            }
            match (d, s) {
                (Array::Primitive(d), Array::Primitive(s)) => {
                    let compatible = match options.widening {
                        Widening::Lossless => s.kind().widens_to(d.kind()),
                        Widening::Exact => s.kind() == d.kind(),
                    };
                    if compatible {
                        Ok(())
                    } else {
                        Err(shape_mismatch(path, dst, src))
                    }
                }
                (Array::Object(d), Array::Object(s)) => {
                    for (index, pair) in d.slots().iter().zip(s.slots()).enumerate() {
                        if let (Some(d), Some(s)) = pair {
                            path.push(index);
                            check(d, s, options, path)?;
                            path.pop();
                        }
                    }
                    Ok(())
                }
                _ => Err(shape_mismatch(path, dst, src)),
            }
        }
        (Value::Object(d), _) => {
            let ty = d.object_type();
            if !ty.is_mergeable() {
                return Err(unsupported(path, dst, MergeError::NotMergeable));
            }
            match src {
                Value::Object(s) if s.object_type() == ty => Ok(()),
                _ => Err(unsupported(
                    path,
                    dst,
                    MergeError::SourceType {
                        expected: ty.type_name,
                        actual: src.type_name(),
                    },
                )),
            }
        }
        _ => Err(unsupported(path, dst, MergeError::NotMergeable)),
    }
}

fn apply(dst: &mut Value, src: &Value, path: &mut Path) -> Result<(), GraftError> {
    match (dst, src) {
        (Value::Array(Array::Primitive(d)), Value::Array(Array::Primitive(s))) => {
            trace!(path = %path, kind = %d.kind(), len = d.len(), "copying primitive leaves");
            d.assign_from(s).map_err(|source| GraftError::ShapeMismatch {
                path: path.clone(),
                source,
            })
        }
        (Value::Array(Array::Object(d)), Value::Array(Array::Object(s))) => {
            for index in 0..d.len() {
                if let (Some(d), Some(s)) = (d.get_mut(index), s.get(index)) {
                    path.push(index);
                    apply(d, s, path)?;
                    path.pop();
                }
            }
            Ok(())
        }
        (Value::Object(d), Value::Object(s)) => {
            let ty = d.object_type();
            trace!(path = %path, type_name = ty.type_name, "merge dispatch");
            ty.merge(&mut **d, &**s)
                .map_err(|source| GraftError::UnsupportedMergeOperation {
                    path: path.clone(),
                    type_name: ty.type_name.to_string(),
                    source,
                })
        }
        (dst, src) => Err(shape_mismatch(path, dst, src)),
    }
}

fn unsupported(path: &Path, dst: &Value, source: MergeError) -> GraftError {
    GraftError::UnsupportedMergeOperation {
        path: path.clone(),
        type_name: dst.type_name(),
        source,
    }
}

fn shape_mismatch(path: &Path, dst: &Value, src: &Value) -> GraftError {
    GraftError::ShapeMismatch {
        path: path.clone(),
        source: ShapeError::TypeMismatch {
            expected: dst.type_name(),
            actual: src.type_name(),
        },
    }
}
