//! Reference leaves: user-defined objects and their type descriptors.

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// A user-defined value stored as a reference leaf of a value graph.
///
/// This trait is dyn-compatible: graphs hold objects as `Box<dyn Object>`
/// and reach their capabilities through [`ObjectType`].
pub trait Object: Any + fmt::Debug {
    /// The descriptor of this object's concrete type.
    fn object_type(&self) -> &'static ObjectType;
}

/// An [`Object`] whose descriptor is known without an instance.
///
/// Object arrays declare their component type through this constant, which is
/// what lets the initializer construct a missing leaf. Use the [`leaf!`]
/// macro to implement both traits at once.
pub trait Leaf: Object + Sized {
    /// Descriptor for `Self`.
    const TYPE: &'static ObjectType;
}

/// Opt-in capability for receiving the state of another instance of the same
/// type during a copy.
///
/// ```
/// use graft_core::{leaf, Mergeable};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Mergeable for Point {
///     fn merge_from(&mut self, other: &Self) {
///         self.clone_from(other);
///     }
/// }
///
/// leaf!(Point, with_default, with_merge);
/// ```
pub trait Mergeable {
    /// Overwrite `self` with the state of `other`.
    fn merge_from(&mut self, other: &Self);
}

/// Produces a default instance of an object type.
pub type DefaultFn = fn() -> Result<Box<dyn Object>, ConstructError>;

/// Merges `src` into `dst`; both must be of the descriptor's type.
pub type MergeFn = fn(dst: &mut dyn Object, src: &dyn Object) -> Result<(), MergeError>;

/// Runtime descriptor of an object type: its name, identity and the
/// capabilities it opted into.
///
/// Descriptors are built in const context and live in statics:
///
/// ```
/// use graft_core::{Leaf, Object, ObjectType};
///
/// #[derive(Debug, Default)]
/// struct Cell(u8);
///
/// impl Object for Cell {
///     fn object_type(&self) -> &'static ObjectType {
///         Self::TYPE
///     }
/// }
///
/// impl Leaf for Cell {
///     const TYPE: &'static ObjectType = &ObjectType::new::<Cell>("Cell").with_default::<Cell>();
/// }
///
/// assert!(Cell::TYPE.has_default());
/// assert!(!Cell::TYPE.is_mergeable());
/// ```
#[derive(Clone, Copy)]
pub struct ObjectType {
    /// Human-readable name, used in error messages.
    pub type_name: &'static str,
    type_id: fn() -> TypeId,
    default: Option<DefaultFn>,
    merge: Option<MergeFn>,
}

impl ObjectType {
    /// Descriptor for `T` with no capabilities.
    pub const fn new<T: Object>(type_name: &'static str) -> Self {
        Self {
            type_name,
            type_id: TypeId::of::<T>,
            default: None,
            merge: None,
        }
    }

    /// Construct missing leaves with `T::default()`.
    pub const fn with_default<T: Object + Default>(self) -> Self {
        Self {
            default: Some(default_boxed::<T>),
            ..self
        }
    }

    /// Construct missing leaves with a custom, possibly failing, factory.
    pub const fn with_factory(self, factory: DefaultFn) -> Self {
        Self {
            default: Some(factory),
            ..self
        }
    }

    /// Accept merges through [`Mergeable::merge_from`].
    pub const fn with_merge<T: Object + Mergeable>(self) -> Self {
        Self {
            merge: Some(merge_downcast::<T>),
            ..self
        }
    }

    /// The [`TypeId`] of the described type.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Whether missing leaves of this type can be constructed.
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether this type accepts merges.
    pub const fn is_mergeable(&self) -> bool {
        self.merge.is_some()
    }

    /// Build a default instance.
    ///
    /// Fails when the type has no factory, when the factory fails, or when it
    /// returns an instance of another type.
    pub fn construct(&self) -> Result<Box<dyn Object>, ConstructError> {
        let factory = self.default.ok_or(ConstructError::NoDefault)?;
        let object = factory()?;
        let actual = object.object_type();
        if actual != self {
            return Err(ConstructError::WrongType {
                expected: self.type_name,
                actual: actual.type_name,
            });
        }
        crate::trace!(type_name = self.type_name, "constructed default instance");
        Ok(object)
    }

    /// Merge `src` into `dst` through this type's merge function.
    pub fn merge(&self, dst: &mut dyn Object, src: &dyn Object) -> Result<(), MergeError> {
        let merge = self.merge.ok_or(MergeError::NotMergeable)?;
        merge(dst, src)
    }
}

fn default_boxed<T: Object + Default>() -> Result<Box<dyn Object>, ConstructError> {
    Ok(Box::new(T::default()))
}

fn merge_downcast<T: Object + Mergeable>(
    dst: &mut dyn Object,
    src: &dyn Object,
) -> Result<(), MergeError> {
    let expected = dst.object_type().type_name;
    let actual = src.object_type().type_name;
    let src: &dyn Any = src;
    let dst: &mut dyn Any = dst;
    match (dst.downcast_mut::<T>(), src.downcast_ref::<T>()) {
        (Some(dst), Some(src)) => {
            dst.merge_from(src);
            Ok(())
        }
        _ => Err(MergeError::SourceType {
            expected,
            actual: actual.into(),
        }),
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ObjectType {}

impl Hash for ObjectType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("type_name", &self.type_name)
            .field("default", &self.has_default())
            .field("merge", &self.is_mergeable())
            .finish()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Implements [`Leaf`] and [`Object`] for a type.
///
/// The optional arguments name the [`ObjectType`] builder methods to apply:
/// `with_default` (requires `Default`) and `with_merge` (requires
/// [`Mergeable`]).
///
/// ```
/// use graft_core::{leaf, Leaf};
///
/// #[derive(Debug, Default)]
/// struct Tally(u32);
///
/// leaf!(Tally, with_default);
///
/// assert_eq!(Tally::TYPE.type_name, "Tally");
/// ```
#[macro_export]
macro_rules! leaf {
    ($ty:ty $(, $capability:ident)* $(,)?) => {
        impl $crate::Leaf for $ty {
            const TYPE: &'static $crate::ObjectType =
                &$crate::ObjectType::new::<$ty>(::core::stringify!($ty))
                    $(.$capability::<$ty>())*;
        }

        impl $crate::Object for $ty {
            fn object_type(&self) -> &'static $crate::ObjectType {
                <$ty as $crate::Leaf>::TYPE
            }
        }
    };
}

/// Why a merge dispatch could not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The destination's type does not accept merges.
    NotMergeable,
    /// The source is not of the destination's type.
    SourceType {
        /// Destination type name.
        expected: &'static str,
        /// Source type name.
        actual: String,
    },
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NotMergeable => write!(f, "type does not implement Mergeable"),
            MergeError::SourceType { expected, actual } => {
                write!(f, "expected a {expected} source, got {actual}")
            }
        }
    }
}

impl core::error::Error for MergeError {}

/// Why a default instance could not be produced.
#[derive(Debug)]
pub enum ConstructError {
    /// The type registered no default factory.
    NoDefault,
    /// The factory produced an instance of another type.
    WrongType {
        /// Declared type name.
        expected: &'static str,
        /// Type name of the produced instance.
        actual: &'static str,
    },
    /// The factory itself failed.
    Failed(Box<dyn core::error::Error + Send + Sync>),
}

impl ConstructError {
    /// Wrap a factory failure.
    pub fn failed(error: impl Into<Box<dyn core::error::Error + Send + Sync>>) -> Self {
        ConstructError::Failed(error.into())
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructError::NoDefault => write!(f, "no default factory registered"),
            ConstructError::WrongType { expected, actual } => {
                write!(f, "factory for {expected} produced a {actual}")
            }
            ConstructError::Failed(e) => write!(f, "factory failed: {e}"),
        }
    }
}

impl core::error::Error for ConstructError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConstructError::Failed(e) => Some(&**e),
            _ => None,
        }
    }
}
