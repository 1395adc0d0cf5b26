#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![doc = include_str!("../README.md")]

pub use graft_core::*;

mod error;
pub use error::*;

mod copy;
pub use copy::*;

mod init;
pub use init::*;

/// Method-call forms of [`copy`] and [`initialize`] on a present root.
pub trait ValueExt {
    /// Copy every leaf of `src` into `self`; see [`copy`].
    fn copy_from(&mut self, src: &Value) -> Result<(), GraftError>;

    /// Reset the graph rooted at `self`; see [`initialize`].
    fn initialize(&mut self) -> Result<(), GraftError>;
}

impl ValueExt for Value {
    fn copy_from(&mut self, src: &Value) -> Result<(), GraftError> {
        copy(Some(self), Some(src))
    }

    fn initialize(&mut self) -> Result<(), GraftError> {
        initialize(Some(self))
    }
}

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
