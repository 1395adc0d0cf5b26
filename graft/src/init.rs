//! Zero-initialization of array value graphs.

use graft_core::{Array, ElementType, ObjectArray, ObjectType, Path, Value};

use crate::{GraftError, debug, trace};

/// Reset the graph rooted at `graph`, in place.
///
/// - Absent graphs and non-array roots are left alone.
/// - Primitive arrays are reset to the zero value of their kind.
/// - Object arrays of arrays recurse into present sub-arrays; absent
///   sub-arrays stay absent.
/// - Object arrays of objects fill absent slots with a default instance of
///   the declared type; present objects are not touched.
///
/// On failure the slots already filled stay filled.
///
/// ```
/// use graft::{PrimitiveArray, Value};
///
/// let mut counters = Value::from(vec![1i32, 2, 3, 4, 5]);
/// graft::initialize(Some(&mut counters))?;
/// assert_eq!(
///     counters.as_primitive_array(),
///     Some(&PrimitiveArray::I32(vec![0; 5]))
/// );
/// # Ok::<(), graft::GraftError>(())
/// ```
pub fn initialize(graph: Option<&mut Value>) -> Result<(), GraftError> {
    let Some(Value::Array(array)) = graph else {
        trace!("initialize: no array at the root, nothing to do");
        return Ok(());
    };
    debug!(array_type = %array.array_type(), "initialize");

    let mut path = Path::new();
    initialize_array(array, &mut path)
}

fn initialize_array(array: &mut Array, path: &mut Path) -> Result<(), GraftError> {
    match array {
        Array::Primitive(primitives) => {
            trace!(path = %path, kind = %primitives.kind(), len = primitives.len(), "zeroing");
            primitives.fill_zero();
            Ok(())
        }
        Array::Object(objects) => {
            let leaf = match objects.element() {
                ElementType::Object(ty) => Some(*ty),
                ElementType::Array(_) => None,
            };
            if let Some(ty) = leaf {
                return fill_absent(objects, ty, path);
            }
            for index in 0..objects.len() {
                if let Some(Value::Array(sub)) = objects.get_mut(index) {
                    path.push(index);
                    initialize_array(sub, path)?;
                    path.pop();
                }
            }
            Ok(())
        }
    }
}

fn fill_absent(
    objects: &mut ObjectArray,
    ty: &'static ObjectType,
    path: &Path,
) -> Result<(), GraftError> {
    for index in 0..objects.len() {
        if objects.get(index).is_some() {
            continue;
        }
        let object = ty
            .construct()
            .map_err(|source| GraftError::DefaultConstructionFailed {
                path: path.child(index),
                type_name: ty.type_name,
                source,
            })?;
        objects
            .set(index, Some(Value::Object(object)))
            .map_err(|source| GraftError::ShapeMismatch {
                path: path.child(index),
                source,
            })?;
    }
    Ok(())
}
