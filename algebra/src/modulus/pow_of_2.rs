use std::fmt::Debug;

use crate::integer::UnsignedInteger;
use crate::reduce::RingReduce;

/// A power-of-two modulus `2^k`.
///
/// Reduction is a single mask, so every ring operation can run on wrapping
/// integer arithmetic followed by the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowOf2Modulus<C: UnsignedInteger> {
    /// The value `2^k - 1`.
    mask: C,
}

impl<C: UnsignedInteger> PowOf2Modulus<C> {
    /// Creates a new [`PowOf2Modulus<C>`] from the modulus value `2^k`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a power of two greater than one.
    #[inline]
    pub fn new(value: C) -> Self {
        assert!(value > C::ONE && (value & (value - C::ONE)).is_zero());
        Self {
            mask: value - C::ONE,
        }
    }

    /// Returns the mask `2^k - 1`.
    #[inline]
    pub fn mask(self) -> C {
        self.mask
    }
}

impl<C: UnsignedInteger> RingReduce<C> for PowOf2Modulus<C> {
    #[inline]
    fn modulus_value(self) -> C {
        self.mask + C::ONE
    }

    #[inline]
    fn reduce(self, value: C) -> C {
        value & self.mask
    }

    #[inline]
    fn reduce_add(self, a: C, b: C) -> C {
        a.wrapping_add(&b) & self.mask
    }

    #[inline]
    fn reduce_sub(self, a: C, b: C) -> C {
        a.wrapping_sub(&b) & self.mask
    }

    #[inline]
    fn reduce_neg(self, a: C) -> C {
        a.wrapping_neg() & self.mask
    }

    #[inline]
    fn reduce_mul(self, a: C, b: C) -> C {
        a.wrapping_mul(&b) & self.mask
    }

    #[inline]
    fn reduce_dot_product(self, lhs: &[C], rhs: &[C]) -> C {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.iter()
            .zip(rhs)
            .fold(C::ZERO, |acc, (&a, &b)| {
                acc.wrapping_add(&a.wrapping_mul(&b))
            })
            & self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_ops_match_u64_reference() {
        let modulus = PowOf2Modulus::<u16>::new(1 << 15);
        let q = 1u64 << 15;

        for (a, b) in [(0u16, 0u16), (1, 32767), (32767, 32767), (12345, 6789)] {
            assert_eq!(modulus.reduce_add(a, b) as u64, (a as u64 + b as u64) % q);
            assert_eq!(
                modulus.reduce_sub(a, b) as u64,
                (a as u64 + q - b as u64) % q
            );
            assert_eq!(modulus.reduce_neg(a) as u64, (q - a as u64) % q);
            assert_eq!(modulus.reduce_mul(a, b) as u64, (a as u64 * b as u64) % q);
        }
    }
}
