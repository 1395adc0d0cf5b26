//! The value graph.

use core::any::Any;

use crate::{Array, Object, ObjectArray, PrimitiveArray, Scalar};

/// A node of a value graph: a primitive scalar, an array, or a reference
/// leaf.
///
/// Absence is not a variant: optional values are `Option<Value>`, both at the
/// top level and inside [`ObjectArray`] slots.
#[derive(Debug)]
pub enum Value {
    /// A primitive scalar.
    Scalar(Scalar),
    /// A (possibly nested) array.
    Array(Array),
    /// A user-defined object.
    Object(Box<dyn Object>),
}

impl Value {
    /// Wrap an object.
    pub fn object<T: Object>(object: T) -> Self {
        Value::Object(Box::new(object))
    }

    /// The runtime type name of this value: `i32`, `Point[][]`, `Point`.
    pub fn type_name(&self) -> String {
        match self {
            Value::Scalar(scalar) => scalar.kind().to_string(),
            Value::Array(array) => array.array_type().to_string(),
            Value::Object(object) => object.object_type().type_name.to_string(),
        }
    }

    /// Whether this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The array, if this value is one.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The array, if this value is one.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The primitive array, if this value is one.
    pub fn as_primitive_array(&self) -> Option<&PrimitiveArray> {
        match self {
            Value::Array(Array::Primitive(array)) => Some(array),
            _ => None,
        }
    }

    /// The object array, if this value is one.
    pub fn as_object_array(&self) -> Option<&ObjectArray> {
        match self {
            Value::Array(Array::Object(array)) => Some(array),
            _ => None,
        }
    }

    /// The object, if this value is one.
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Value::Object(object) => Some(&**object),
            _ => None,
        }
    }

    /// The object as a `T`, if this value is an object of that type.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let object: &dyn Any = self.as_object()?;
        object.downcast_ref()
    }

    /// The object as a mutable `T`, if this value is an object of that type.
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        match self {
            Value::Object(object) => {
                let object: &mut dyn Any = &mut **object;
                object.downcast_mut()
            }
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<PrimitiveArray> for Value {
    fn from(array: PrimitiveArray) -> Self {
        Value::Array(Array::Primitive(array))
    }
}

impl From<ObjectArray> for Value {
    fn from(array: ObjectArray) -> Self {
        Value::Array(Array::Object(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayType, ElementType, Leaf, ScalarKind, leaf};
    use graft_testhelpers::test;

    #[derive(Debug, Default, PartialEq)]
    struct Badge(u8);

    leaf!(Badge, with_default);

    #[test]
    fn type_names() {
        assert_eq!(Value::from(Scalar::U8(1)).type_name(), "u8");
        assert_eq!(Value::from(vec!['a', 'b']).type_name(), "char[]");
        assert_eq!(Value::object(Badge(3)).type_name(), "Badge");

        let badges = ObjectArray::new(
            ElementType::Array(ArrayType::of_objects(Badge::TYPE)),
            1,
        );
        assert_eq!(Value::from(badges).type_name(), "Badge[][]");
    }

    #[test]
    fn downcast() {
        let mut value = Value::object(Badge(3));
        assert_eq!(value.downcast_ref::<Badge>(), Some(&Badge(3)));
        if let Some(badge) = value.downcast_mut::<Badge>() {
            badge.0 = 4;
        }
        assert_eq!(value.downcast_ref::<Badge>(), Some(&Badge(4)));
        assert!(Value::from(Scalar::I32(0)).downcast_ref::<Badge>().is_none());
    }

    #[test]
    fn accessors() {
        let value = Value::from(PrimitiveArray::zeroed(ScalarKind::I8, 3));
        assert!(value.is_array());
        assert_eq!(value.as_array().map(Array::len), Some(3));
        assert!(value.as_object_array().is_none());
        assert_eq!(
            value.as_primitive_array().map(PrimitiveArray::kind),
            Some(ScalarKind::I8)
        );
    }
}
