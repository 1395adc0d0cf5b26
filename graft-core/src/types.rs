//! Array and element type descriptors.

use core::fmt;

use crate::{Array, ObjectArray, ObjectType, PrimitiveArray, ScalarKind, ShapeError, Value};

/// The declared type of an array.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArrayType {
    /// Unboxed primitive slots, e.g. `i32[]`.
    Primitive(ScalarKind),
    /// Reference slots of the given component type, each possibly absent.
    Object(Box<ElementType>),
}

/// The component type of an object array.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ElementType {
    /// Every present slot holds a nested array of this type.
    Array(ArrayType),
    /// Every present slot holds an object of this type.
    Object(&'static ObjectType),
}

impl ArrayType {
    /// `kind[]`
    pub const fn primitive(kind: ScalarKind) -> Self {
        ArrayType::Primitive(kind)
    }

    /// `ty[]` for an object type.
    pub fn of_objects(ty: &'static ObjectType) -> Self {
        ArrayType::Object(Box::new(ElementType::Object(ty)))
    }

    /// `self[]`: an array whose slots hold arrays of this type.
    pub fn nested(self) -> Self {
        ArrayType::Object(Box::new(ElementType::Array(self)))
    }

    /// Number of array dimensions, at least 1.
    pub fn depth(&self) -> usize {
        match self {
            ArrayType::Primitive(_) => 1,
            ArrayType::Object(element) => match &**element {
                ElementType::Array(inner) => 1 + inner.depth(),
                ElementType::Object(_) => 1,
            },
        }
    }

    /// Allocate an array with one length per leading dimension.
    ///
    /// Mirrors `multianewarray`: requested dimensions are allocated, primitive
    /// slots start at zero, and reference slots as well as dimensions past the
    /// last length stay absent.
    pub fn instantiate(&self, lengths: &[usize]) -> Result<Array, ShapeError> {
        let Some((&len, rest)) = lengths.split_first() else {
            return Err(ShapeError::NoDimensions);
        };
        if lengths.len() > self.depth() {
            return Err(ShapeError::TooManyDimensions {
                depth: self.depth(),
                requested: lengths.len(),
            });
        }

        match self {
            ArrayType::Primitive(kind) => Ok(PrimitiveArray::zeroed(*kind, len).into()),
            ArrayType::Object(element) => {
                let mut array = ObjectArray::new((**element).clone(), len);
                if let (ElementType::Array(inner), false) = (&**element, rest.is_empty()) {
                    for index in 0..len {
                        let sub = inner.instantiate(rest)?;
                        array.set(index, Some(Value::Array(sub)))?;
                    }
                }
                Ok(array.into())
            }
        }
    }
}

impl From<ScalarKind> for ArrayType {
    fn from(kind: ScalarKind) -> Self {
        ArrayType::Primitive(kind)
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayType::Primitive(kind) => write!(f, "{kind}[]"),
            ArrayType::Object(element) => write!(f, "{element}[]"),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Array(array) => write!(f, "{array}"),
            ElementType::Object(ty) => write!(f, "{ty}"),
        }
    }
}

impl ElementType {
    /// Whether `value` may be stored in a slot of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ElementType::Array(ty), Value::Array(array)) => array.is_of_type(ty),
            (ElementType::Object(ty), Value::Object(object)) => object.object_type() == *ty,
            _ => false,
        }
    }
}
