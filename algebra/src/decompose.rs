//! Gadget decomposition basis for power-of-two bases.

use std::marker::PhantomData;

use num_traits::ConstOne;

use crate::field::Field;
use crate::integer::UnsignedInteger;

/// A power-of-two decomposition basis `B = 2^bits` for field values.
///
/// A value `v < P` is written as `ℓ` unsigned digits `v = Σ d_j · B^j` with
/// `d_j < B` and `ℓ = ⌈bits(P-1) / bits⌉`, so the decomposition is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Basis<F: Field> {
    bits: u32,
    mask: F::ValueT,
    decompose_len: usize,
    _marker: PhantomData<F>,
}

impl<F: Field> Basis<F> {
    /// Creates a new [`Basis<F>`] with the given basis bits.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is zero or not smaller than the bit size of the
    /// value type.
    pub fn new(bits: u32) -> Self {
        assert!(bits > 0 && bits < <F::ValueT as UnsignedInteger>::BITS);

        let modulus_bits = F::MINUS_ONE.significant_bits();
        let decompose_len = modulus_bits.div_ceil(bits) as usize;
        let mask = (F::ValueT::ONE << bits as usize) - F::ValueT::ONE;

        Self {
            bits,
            mask,
            decompose_len,
            _marker: PhantomData,
        }
    }

    /// Returns the number of digits `ℓ`.
    #[inline]
    pub fn decompose_len(&self) -> usize {
        self.decompose_len
    }

    /// Returns the bit size of one digit.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the digit mask `B - 1`.
    #[inline]
    pub fn mask(&self) -> F::ValueT {
        self.mask
    }

    /// Returns the basis value `B`.
    #[inline]
    pub fn basis_value(&self) -> F::ValueT {
        self.mask + F::ValueT::ONE
    }

    /// Returns an iterator over the scalars `B^0, B^1, …, B^{ℓ-1}`.
    #[inline]
    pub fn scalar_iter(&self) -> impl Iterator<Item = F::ValueT> + '_ {
        (0..self.decompose_len).map(|j| F::ValueT::ONE << (j as u32 * self.bits) as usize)
    }

    /// Decomposes a single value into its digits, lowest first.
    #[inline]
    pub fn decompose_value(&self, mut value: F::ValueT, destination: &mut [F::ValueT]) {
        debug_assert_eq!(destination.len(), self.decompose_len);
        for d in destination.iter_mut() {
            *d = value & self.mask;
            value = value >> self.bits as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::distributions::{Distribution, Uniform};
    use rand::prelude::*;

    use super::*;
    use crate::U32Field;

    type Fp = U32Field<132120577>;

    #[test]
    fn digits_reconstruct_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let basis = Basis::<Fp>::new(7);
        assert_eq!(basis.decompose_len(), 4);

        let distr = Uniform::new(0u32, 132120577);
        let mut digits = vec![0u32; basis.decompose_len()];
        for _ in 0..100 {
            let v = distr.sample(&mut rng);
            basis.decompose_value(v, &mut digits);

            let recomposed: u64 = digits
                .iter()
                .zip(basis.scalar_iter())
                .map(|(&d, s)| d as u64 * s as u64)
                .sum();
            assert_eq!(recomposed, v as u64);
            assert!(digits.iter().all(|&d| d <= basis.mask()));
        }
    }
}
