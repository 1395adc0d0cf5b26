use core::fmt;

use graft_core::{ConstructError, MergeError, Path, ShapeError};

/// Errors raised by [`copy`](crate::copy) and [`initialize`](crate::initialize).
///
/// Every variant is a contract violation by the caller; none is worth
/// retrying.
#[derive(Debug)]
pub enum GraftError {
    /// Two arrays paired by a copy have different lengths.
    LengthMismatch {
        /// Where the arrays sit in the graph.
        path: Path,
        /// Length of the destination array.
        destination_len: usize,
        /// Length of the source array.
        source_len: usize,
    },

    /// A non-array destination cannot receive a merge from the source.
    UnsupportedMergeOperation {
        /// Where the destination sits in the graph.
        path: Path,
        /// Runtime type name of the destination.
        type_name: String,
        /// Why the merge could not run.
        source: MergeError,
    },

    /// A missing reference leaf could not be constructed.
    DefaultConstructionFailed {
        /// The slot that was being filled.
        path: Path,
        /// The declared component type.
        type_name: &'static str,
        /// Why construction failed.
        source: ConstructError,
    },

    /// Paired arrays have incompatible component types.
    ShapeMismatch {
        /// Where the arrays sit in the graph.
        path: Path,
        /// The incompatibility.
        source: ShapeError,
    },
}

impl GraftError {
    /// Where in the graph the error was detected.
    pub fn path(&self) -> &Path {
        match self {
            GraftError::LengthMismatch { path, .. }
            | GraftError::UnsupportedMergeOperation { path, .. }
            | GraftError::DefaultConstructionFailed { path, .. }
            | GraftError::ShapeMismatch { path, .. } => path,
        }
    }
}

impl fmt::Display for GraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraftError::LengthMismatch {
                path,
                destination_len,
                source_len,
            } => write!(
                f,
                "length mismatch at {path}: destination has {destination_len} elements, source has {source_len}"
            ),
            GraftError::UnsupportedMergeOperation {
                path,
                type_name,
                source,
            } => write!(f, "cannot merge into {type_name} at {path}: {source}"),
            GraftError::DefaultConstructionFailed {
                path,
                type_name,
                source,
            } => write!(f, "cannot construct a default {type_name} at {path}: {source}"),
            GraftError::ShapeMismatch { path, source } => {
                write!(f, "shape mismatch at {path}: {source}")
            }
        }
    }
}

impl core::error::Error for GraftError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            GraftError::LengthMismatch { .. } => None,
            GraftError::UnsupportedMergeOperation { source, .. } => Some(source),
            GraftError::DefaultConstructionFailed { source, .. } => Some(source),
            GraftError::ShapeMismatch { source, .. } => Some(source),
        }
    }
}
