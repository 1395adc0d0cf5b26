//! Primitive scalar kinds and values.

use core::fmt;

/// Invokes `$callback!` with the full list of primitive kinds.
///
/// Each entry reads `Variant(rust_type) = "name", zero_value;`.
macro_rules! with_scalar_kinds {
    ($callback:ident) => {
        $callback! {
            Bool(bool) = "bool", false;
            Char(char) = "char", '\0';
            I8(i8) = "i8", 0;
            I16(i16) = "i16", 0;
            I32(i32) = "i32", 0;
            I64(i64) = "i64", 0;
            U8(u8) = "u8", 0;
            U16(u16) = "u16", 0;
            U32(u32) = "u32", 0;
            U64(u64) = "u64", 0;
            F32(f32) = "f32", 0.0;
            F64(f64) = "f64", 0.0;
        }
    };
}
pub(crate) use with_scalar_kinds;

macro_rules! define_scalars {
    ($($variant:ident($ty:ty) = $name:literal, $zero:expr;)*) => {
        /// The primitive kinds a [`Scalar`] or a [`PrimitiveArray`](crate::PrimitiveArray) can hold.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub enum ScalarKind {
            $(
                #[doc = concat!("Primitive type `", $name, "`.")]
                $variant,
            )*
        }

        /// A single primitive value.
        #[derive(Clone, Copy, PartialEq, Debug)]
        pub enum Scalar {
            $(
                #[doc = concat!("A `", $name, "` value.")]
                $variant($ty),
            )*
        }

        impl ScalarKind {
            /// Every primitive kind, in declaration order.
            pub const ALL: &'static [ScalarKind] = &[$(ScalarKind::$variant),*];

            /// The Rust name of this kind, e.g. `"i32"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ScalarKind::$variant => $name,)*
                }
            }

            /// The zero value of this kind: `false`, `0`, `0.0` or `'\0'`.
            pub const fn zero(self) -> Scalar {
                match self {
                    $(ScalarKind::$variant => Scalar::$variant($zero),)*
                }
            }
        }

        impl Scalar {
            /// The kind of this value.
            pub const fn kind(&self) -> ScalarKind {
                match self {
                    $(Scalar::$variant(_) => ScalarKind::$variant,)*
                }
            }
        }

        impl fmt::Display for Scalar {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Scalar::$variant(v) => fmt::Debug::fmt(v, f),)*
                }
            }
        }

        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }
        )*
    };
}

with_scalar_kinds!(define_scalars);

/// Expands to a match over `(Scalar, ScalarKind)` pairs, one arm per
/// lossless `From` conversion between distinct primitives.
macro_rules! lossless {
    ($value:expr, $to:expr; $($from:ident => $target:ident),* $(,)?) => {
        match ($value, $to) {
            $((Scalar::$from(v), ScalarKind::$target) => Some(Scalar::$target(v.into())),)*
            _ => None,
        }
    };
}

impl Scalar {
    /// Convert this value to `to` without loss of information.
    ///
    /// Identity always succeeds. Otherwise the conversion exists exactly when
    /// the standard library implements `From` between the two primitive types
    /// (`i32 -> i64`, `u8 -> char`, `char -> u32`, `f32 -> f64`, ...).
    /// `bool` never widens.
    pub fn widen(self, to: ScalarKind) -> Option<Scalar> {
        if self.kind() == to {
            return Some(self);
        }
        lossless! { self, to;
            Char => U32, Char => U64,
            I8 => I16, I8 => I32, I8 => I64, I8 => F32, I8 => F64,
            I16 => I32, I16 => I64, I16 => F32, I16 => F64,
            I32 => I64, I32 => F64,
            U8 => Char, U8 => I16, U8 => I32, U8 => I64,
            U8 => U16, U8 => U32, U8 => U64, U8 => F32, U8 => F64,
            U16 => I32, U16 => I64, U16 => U32, U16 => U64, U16 => F32, U16 => F64,
            U32 => I64, U32 => U64, U32 => F64,
            F32 => F64,
        }
    }
}

impl ScalarKind {
    /// Whether every value of `self` widens losslessly into `to`.
    pub fn widens_to(self, to: ScalarKind) -> bool {
        self.zero().widen(to).is_some()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_testhelpers::test;

    #[test]
    fn zero_values() {
        assert_eq!(ScalarKind::Bool.zero(), Scalar::Bool(false));
        assert_eq!(ScalarKind::Char.zero(), Scalar::Char('\0'));
        assert_eq!(ScalarKind::I64.zero(), Scalar::I64(0));
        assert_eq!(ScalarKind::F32.zero(), Scalar::F32(0.0));
        for kind in ScalarKind::ALL {
            assert_eq!(kind.zero().kind(), *kind);
        }
    }

    #[test]
    fn widening_follows_from_impls() {
        assert_eq!(Scalar::I32(-7).widen(ScalarKind::I64), Some(Scalar::I64(-7)));
        assert_eq!(Scalar::I32(3).widen(ScalarKind::F64), Some(Scalar::F64(3.0)));
        assert_eq!(Scalar::U8(b'a').widen(ScalarKind::Char), Some(Scalar::Char('a')));
        assert_eq!(Scalar::Char('A').widen(ScalarKind::U32), Some(Scalar::U32(65)));

        assert_eq!(Scalar::I64(1).widen(ScalarKind::I32), None);
        assert_eq!(Scalar::I32(1).widen(ScalarKind::F32), None);
        assert_eq!(Scalar::Bool(true).widen(ScalarKind::U8), None);
        assert!(!ScalarKind::F64.widens_to(ScalarKind::F32));
    }

    #[test]
    fn every_kind_widens_to_itself() {
        for kind in ScalarKind::ALL {
            assert!(kind.widens_to(*kind), "{kind} should widen to itself");
        }
    }

    #[test]
    fn display() {
        assert_eq!(Scalar::Char('\0').to_string(), "'\\0'");
        assert_eq!(Scalar::I16(-4).to_string(), "-4");
        assert_eq!(Scalar::F64(0.0).to_string(), "0.0");
        assert_eq!(ScalarKind::U64.to_string(), "u64");
    }
}
