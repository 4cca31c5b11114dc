//! A bundled trait for modular reduction over a ring `Z_m`.
//!
//! Modulus types implement this once and every lattice operation takes the
//! modulus as an explicit argument, so no reduction behaviour is ever implied
//! by the value type alone.

use crate::integer::UnsignedInteger;

/// Modular arithmetic over `Z_m` for values of type `C`.
///
/// All inputs other than the argument of [`RingReduce::reduce`] are expected
/// to already lie in `[0, m)`; every output lies in `[0, m)`.
pub trait RingReduce<C: UnsignedInteger>: Clone + Copy + Send + Sync {
    /// Returns the modulus value `m`.
    fn modulus_value(self) -> C;

    /// Reduces an arbitrary value into `[0, m)`.
    fn reduce(self, value: C) -> C;

    /// Computes `a + b mod m`.
    fn reduce_add(self, a: C, b: C) -> C;

    /// Computes `a = a + b mod m`.
    #[inline]
    fn reduce_add_assign(self, a: &mut C, b: C) {
        *a = self.reduce_add(*a, b);
    }

    /// Computes `a + a mod m`.
    #[inline]
    fn reduce_double(self, a: C) -> C {
        self.reduce_add(a, a)
    }

    /// Computes `a = a + a mod m`.
    #[inline]
    fn reduce_double_assign(self, a: &mut C) {
        *a = self.reduce_double(*a);
    }

    /// Computes `a - b mod m`.
    fn reduce_sub(self, a: C, b: C) -> C;

    /// Computes `a = a - b mod m`.
    #[inline]
    fn reduce_sub_assign(self, a: &mut C, b: C) {
        *a = self.reduce_sub(*a, b);
    }

    /// Computes `-a mod m`.
    fn reduce_neg(self, a: C) -> C;

    /// Computes `a = -a mod m`.
    #[inline]
    fn reduce_neg_assign(self, a: &mut C) {
        *a = self.reduce_neg(*a);
    }

    /// Computes `a * b mod m`.
    fn reduce_mul(self, a: C, b: C) -> C;

    /// Computes `a = a * b mod m`.
    #[inline]
    fn reduce_mul_assign(self, a: &mut C, b: C) {
        *a = self.reduce_mul(*a, b);
    }

    /// Computes `<lhs, rhs> mod m`.
    fn reduce_dot_product(self, lhs: &[C], rhs: &[C]) -> C;
}
