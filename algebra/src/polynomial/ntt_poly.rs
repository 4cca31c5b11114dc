use std::marker::PhantomData;
use std::ops::{AddAssign, Deref, DerefMut, MulAssign, SubAssign};

use num_traits::ConstZero;

use crate::field::Field;
use crate::reduce::RingReduce;

/// A polynomial in evaluation (NTT) form over the field `F`.
///
/// Multiplication is pointwise here; conversions to and from coefficient
/// form go through the transform table.
pub struct FieldNttPolynomial<F: Field> {
    data: Vec<F::ValueT>,
    _marker: PhantomData<F>,
}

impl<F: Field> Clone for FieldNttPolynomial<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.data.clone())
    }
}

impl<F: Field> std::fmt::Debug for FieldNttPolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldNttPolynomial")
            .field("data", &self.data)
            .finish()
    }
}

impl<F: Field> PartialEq for FieldNttPolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<F: Field> Eq for FieldNttPolynomial<F> {}

impl<F: Field> Deref for FieldNttPolynomial<F> {
    type Target = [F::ValueT];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<F: Field> DerefMut for FieldNttPolynomial<F> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<F: Field> FieldNttPolynomial<F> {
    /// Creates a new [`FieldNttPolynomial<F>`] from raw values.
    #[inline]
    pub fn new(data: Vec<F::ValueT>) -> Self {
        Self {
            data,
            _marker: PhantomData,
        }
    }

    /// Creates a zero polynomial with `coeff_count` values.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self::new(vec![F::ValueT::ZERO; coeff_count])
    }

    /// Returns the number of values.
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Extracts a slice of the values.
    #[inline]
    pub fn as_slice(&self) -> &[F::ValueT] {
        &self.data
    }

    /// Extracts a mutable slice of the values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [F::ValueT] {
        &mut self.data
    }

    /// Consumes the polynomial, returning the value vector.
    #[inline]
    pub fn inner_data(self) -> Vec<F::ValueT> {
        self.data
    }

    /// Sets every value to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(F::ValueT::ZERO);
    }

    /// Copies all values from `src`.
    #[inline]
    pub fn copy_from(&mut self, src: &Self) {
        self.data.copy_from_slice(&src.data);
    }

    /// Adds `scalar` to every value, which adds the constant `scalar` to the
    /// underlying plaintext polynomial.
    #[inline]
    pub fn add_scalar_assign(&mut self, scalar: F::ValueT) {
        self.data
            .iter_mut()
            .for_each(|v| F::MODULUS.reduce_add_assign(v, scalar));
    }

    /// Performs `self += lhs * rhs` pointwise.
    #[inline]
    pub fn add_mul_assign(&mut self, lhs: &Self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), lhs.coeff_count());
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(lhs.iter().zip(rhs.iter()))
            .for_each(|(acc, (&a, &b))| {
                F::MODULUS.reduce_add_assign(acc, F::MODULUS.reduce_mul(a, b))
            });
    }
}

impl<F: Field> AddAssign<&Self> for FieldNttPolynomial<F> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| F::MODULUS.reduce_add_assign(a, b));
    }
}

impl<F: Field> SubAssign<&Self> for FieldNttPolynomial<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| F::MODULUS.reduce_sub_assign(a, b));
    }
}

impl<F: Field> MulAssign<&Self> for FieldNttPolynomial<F> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| F::MODULUS.reduce_mul_assign(a, b));
    }
}
