use core::fmt;

/// Errors raised when a value or length does not fit a declared array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A value's type does not match the declared type.
    TypeMismatch {
        /// The declared type.
        expected: String,
        /// The type that was supplied.
        actual: String,
    },

    /// A slot index past the end of an array.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The array length.
        len: usize,
    },

    /// Two arrays that must have equal lengths do not.
    LengthMismatch {
        /// Length of the array being written.
        expected: usize,
        /// Length of the array being read.
        actual: usize,
    },

    /// More lengths than the array type has dimensions.
    TooManyDimensions {
        /// Dimensions of the array type.
        depth: usize,
        /// Number of lengths supplied.
        requested: usize,
    },

    /// No lengths were supplied to allocate an array.
    NoDimensions,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, found {actual}")
            }
            ShapeError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            ShapeError::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} elements, found {actual}")
            }
            ShapeError::TooManyDimensions { depth, requested } => write!(
                f,
                "{requested} lengths given for an array type with {depth} dimensions"
            ),
            ShapeError::NoDimensions => write!(f, "at least one dimension length is required"),
        }
    }
}

impl core::error::Error for ShapeError {}
