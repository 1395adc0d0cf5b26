//! Array values: unboxed primitive arrays and object arrays with absent slots.

use crate::scalar::with_scalar_kinds;
use crate::{ArrayType, ElementType, Scalar, ScalarKind, ShapeError, Value, trace};

macro_rules! define_primitive_array {
    ($($variant:ident($ty:ty) = $name:literal, $zero:expr;)*) => {
        /// A one-dimensional array of primitive scalars, stored unboxed.
        #[derive(Clone, PartialEq, Debug)]
        pub enum PrimitiveArray {
            $(
                #[doc = concat!("A `", $name, "[]`.")]
                $variant(Vec<$ty>),
            )*
        }

        impl PrimitiveArray {
            /// An array of `len` zero values of `kind`.
            pub fn zeroed(kind: ScalarKind, len: usize) -> Self {
                match kind {
                    $(ScalarKind::$variant => PrimitiveArray::$variant(vec![$zero; len]),)*
                }
            }

            /// The kind of every element.
            pub fn kind(&self) -> ScalarKind {
                match self {
                    $(PrimitiveArray::$variant(_) => ScalarKind::$variant,)*
                }
            }

            /// Number of elements.
            pub fn len(&self) -> usize {
                match self {
                    $(PrimitiveArray::$variant(v) => v.len(),)*
                }
            }

            /// The element at `index`, if in bounds.
            pub fn get(&self, index: usize) -> Option<Scalar> {
                match self {
                    $(PrimitiveArray::$variant(v) => v.get(index).copied().map(Scalar::$variant),)*
                }
            }

            /// Reset every element to the zero value of its kind.
            pub fn fill_zero(&mut self) {
                match self {
                    $(PrimitiveArray::$variant(v) => v.fill($zero),)*
                }
            }

            fn write(&mut self, index: usize, value: Scalar) {
                match (self, value) {
                    $((PrimitiveArray::$variant(v), Scalar::$variant(x)) => v[index] = x,)*
                    _ => unreachable!("write called with an unwidened value"),
                }
            }

            fn copy_same_kind(&mut self, src: &PrimitiveArray) -> bool {
                match (self, src) {
                    $((PrimitiveArray::$variant(d), PrimitiveArray::$variant(s)) => {
                        d.copy_from_slice(s);
                        true
                    })*
                    _ => false,
                }
            }
        }

        $(
            impl From<Vec<$ty>> for PrimitiveArray {
                fn from(values: Vec<$ty>) -> Self {
                    PrimitiveArray::$variant(values)
                }
            }

            impl From<Vec<$ty>> for Value {
                fn from(values: Vec<$ty>) -> Self {
                    Value::Array(Array::Primitive(PrimitiveArray::$variant(values)))
                }
            }
        )*
    };
}

with_scalar_kinds!(define_primitive_array);

impl PrimitiveArray {
    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `value` at `index`, widening it losslessly to this array's kind.
    pub fn set(&mut self, index: usize, value: Scalar) -> Result<(), ShapeError> {
        let len = self.len();
        if index >= len {
            return Err(ShapeError::IndexOutOfBounds { index, len });
        }
        let widened = value.widen(self.kind()).ok_or_else(|| ShapeError::TypeMismatch {
            expected: self.kind().to_string(),
            actual: value.kind().to_string(),
        })?;
        self.write(index, widened);
        Ok(())
    }

    /// Overwrite every element with the corresponding element of `src`.
    ///
    /// Lengths must match and `src`'s kind must widen losslessly into this
    /// array's kind. Both conditions are checked before the first write, so
    /// on error `self` is unchanged.
    pub fn assign_from(&mut self, src: &PrimitiveArray) -> Result<(), ShapeError> {
        if self.len() != src.len() {
            return Err(ShapeError::LengthMismatch {
                expected: self.len(),
                actual: src.len(),
            });
        }
        if self.copy_same_kind(src) {
            return Ok(());
        }

        let kind = self.kind();
        if !src.kind().widens_to(kind) {
            return Err(ShapeError::TypeMismatch {
                expected: ArrayType::Primitive(kind).to_string(),
                actual: ArrayType::Primitive(src.kind()).to_string(),
            });
        }
        trace!(from = %src.kind(), to = %kind, len = src.len(), "widening primitive array");
        for index in 0..src.len() {
            if let Some(value) = src.get(index).and_then(|v| v.widen(kind)) {
                self.write(index, value);
            }
        }
        Ok(())
    }

    /// Iterate over the elements as [`Scalar`]s.
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }
}

/// An array of reference slots sharing one declared component type.
///
/// A slot is either absent (`None`) or holds a [`Value`] accepted by the
/// component type; every mutating method upholds this.
#[derive(Debug)]
pub struct ObjectArray {
    element: ElementType,
    slots: Vec<Option<Value>>,
}

impl ObjectArray {
    /// An array of `len` absent slots.
    pub fn new(element: ElementType, len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { element, slots }
    }

    /// An array from existing slots, checking each present one against
    /// `element`.
    pub fn from_slots(element: ElementType, slots: Vec<Option<Value>>) -> Result<Self, ShapeError> {
        for value in slots.iter().flatten() {
            check_slot(&element, value)?;
        }
        Ok(Self { element, slots })
    }

    /// The declared component type.
    pub fn element(&self) -> &ElementType {
        &self.element
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value at `index`, or `None` if the slot is absent or out of bounds.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the value at `index`.
    ///
    /// The value may be mutated in place but not replaced with one of another
    /// type; use [`ObjectArray::set`] for that.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Store `value` at `index`, returning the previous content of the slot.
    pub fn set(&mut self, index: usize, value: Option<Value>) -> Result<Option<Value>, ShapeError> {
        let len = self.slots.len();
        if index >= len {
            return Err(ShapeError::IndexOutOfBounds { index, len });
        }
        if let Some(value) = &value {
            check_slot(&self.element, value)?;
        }
        Ok(core::mem::replace(&mut self.slots[index], value))
    }

    /// All slots, in order.
    pub fn slots(&self) -> &[Option<Value>] {
        &self.slots
    }

    /// The array type this array was declared with.
    pub fn array_type(&self) -> ArrayType {
        ArrayType::Object(Box::new(self.element.clone()))
    }
}

fn check_slot(element: &ElementType, value: &Value) -> Result<(), ShapeError> {
    if element.accepts(value) {
        Ok(())
    } else {
        Err(ShapeError::TypeMismatch {
            expected: element.to_string(),
            actual: value.type_name(),
        })
    }
}

/// An array of either kind.
#[derive(Debug)]
pub enum Array {
    /// Unboxed primitive slots.
    Primitive(PrimitiveArray),
    /// Reference slots.
    Object(ObjectArray),
}

impl Array {
    /// Number of slots.
    pub fn len(&self) -> usize {
        match self {
            Array::Primitive(array) => array.len(),
            Array::Object(array) => array.len(),
        }
    }

    /// Whether the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The declared type of this array.
    pub fn array_type(&self) -> ArrayType {
        match self {
            Array::Primitive(array) => ArrayType::Primitive(array.kind()),
            Array::Object(array) => array.array_type(),
        }
    }

    /// Whether this array was declared with type `ty`.
    pub fn is_of_type(&self, ty: &ArrayType) -> bool {
        match (self, ty) {
            (Array::Primitive(array), ArrayType::Primitive(kind)) => array.kind() == *kind,
            (Array::Object(array), ArrayType::Object(element)) => array.element() == &**element,
            _ => false,
        }
    }
}

impl From<PrimitiveArray> for Array {
    fn from(array: PrimitiveArray) -> Self {
        Array::Primitive(array)
    }
}

impl From<ObjectArray> for Array {
    fn from(array: ObjectArray) -> Self {
        Array::Object(array)
    }
}
