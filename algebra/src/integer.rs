//! Unsigned integer abstraction shared by moduli, polynomials and samplers.

use std::fmt::{Debug, Display};

use num_traits::{ConstOne, ConstZero, PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use rand::distributions::uniform::SampleUniform;

/// Numeric cast from `T`, performed with the semantics of the `as` operator.
pub trait AsFrom<T>: Sized {
    /// Converts `value` into `Self` with `as` semantics.
    fn as_from(value: T) -> Self;
}

/// Numeric cast into `T`, performed with the semantics of the `as` operator.
pub trait AsInto<T>: Sized {
    /// Converts `self` into `T` with `as` semantics.
    fn as_into(self) -> T;
}

macro_rules! impl_as_casts {
    ($($T:ty),*) => {
        $(
            impl_as_casts!(@from $T => u8, u16, u32, u64, u128, usize, f64);
            impl_as_casts!(@into $T => u8, u16, u32, u64, u128, usize, f64);
        )*
    };
    (@from $T:ty => $($U:ty),*) => {
        $(
            impl AsFrom<$U> for $T {
                #[inline(always)]
                fn as_from(value: $U) -> $T {
                    value as $T
                }
            }
        )*
    };
    (@into $T:ty => $($U:ty),*) => {
        $(
            impl AsInto<$U> for $T {
                #[inline(always)]
                fn as_into(self) -> $U {
                    self as $U
                }
            }
        )*
    };
}

impl_as_casts!(u8, u16, u32, u64, u128, usize, f64);

/// The unsigned integer types that can carry LWE values and field values.
pub trait UnsignedInteger:
    PrimInt
    + ConstZero
    + ConstOne
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
    + SampleUniform
    + AsFrom<u32>
    + AsFrom<u64>
    + AsFrom<f64>
    + AsFrom<usize>
    + AsInto<u64>
    + AsInto<u128>
    + AsInto<f64>
    + AsInto<usize>
{
    /// The bit size of the type.
    const BITS: u32;
    /// 2
    const TWO: Self;

    /// Returns the number of significant bits of `self`.
    #[inline]
    fn significant_bits(self) -> u32 {
        Self::BITS - self.leading_zeros()
    }
}

macro_rules! impl_unsigned_integer {
    ($($T:ty),*) => {
        $(
            impl UnsignedInteger for $T {
                const BITS: u32 = <$T>::BITS;
                const TWO: Self = 2;
            }
        )*
    };
}

impl_unsigned_integer!(u8, u16, u32, u64);
