//! Prime field abstraction used by the ring layer.

use crate::integer::UnsignedInteger;
use crate::modulus::BarrettModulus;
use crate::ntt::{FieldNttTable, NumberTheoryTransform};
use crate::reduce::RingReduce;
use crate::AlgebraError;

/// A marker trait describing a prime field `Z_P`.
///
/// Field elements are carried as raw [`Field::ValueT`] values in `[0, P)`;
/// all arithmetic goes through [`Field::MODULUS`], so the field type itself
/// is a zero-sized tag.
pub trait Field: Sized + Copy + Send + Sync + 'static {
    /// The value type carrying field elements.
    type ValueT: UnsignedInteger;
    /// The modulus type performing the reduction.
    type Modulus: RingReduce<Self::ValueT>;

    /// The modulus value `P`.
    const MODULUS_VALUE: Self::ValueT;
    /// The value `P - 1`.
    const MINUS_ONE: Self::ValueT;
    /// The modulus object.
    const MODULUS: Self::Modulus;
}

/// A field with an NTT-friendly modulus, i.e. `P ≡ 1 (mod 2N)` for the
/// negacyclic rings of interest.
pub trait NttField: Field {
    /// The precomputed transform table type.
    type Table: NumberTheoryTransform<Field = Self> + Send + Sync;

    /// Generates the transform table for the ring `Z_P[X]/(X^N + 1)` with
    /// `N = 2^log_n`. The primitive `2N`-th root is computed here, never
    /// hardcoded.
    fn generate_ntt_table(log_n: u32) -> Result<Self::Table, AlgebraError>;
}

/// A prime field over `u32` with a const-generic modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U32Field<const P: u32>;

impl<const P: u32> Field for U32Field<P> {
    type ValueT = u32;
    type Modulus = BarrettModulus<u32>;

    const MODULUS_VALUE: u32 = P;
    const MINUS_ONE: u32 = P - 1;
    const MODULUS: BarrettModulus<u32> = BarrettModulus::new(P);
}

impl<const P: u32> NttField for U32Field<P> {
    type Table = FieldNttTable<Self>;

    #[inline]
    fn generate_ntt_table(log_n: u32) -> Result<Self::Table, AlgebraError> {
        FieldNttTable::new(Self::MODULUS, log_n)
    }
}
