use std::marker::PhantomData;
use std::ops::{AddAssign, Deref, DerefMut, SubAssign};

use num_traits::ConstZero;
use rand::distributions::{Distribution, Uniform};
use rand::{CryptoRng, Rng};

use crate::field::Field;
use crate::random::{sample_binary_values, DiscreteGaussian};
use crate::reduce::RingReduce;

/// A polynomial in coefficient form over the field `F`.
///
/// Coefficients are raw [`Field::ValueT`] values in `[0, P)`, lowest degree
/// first.
pub struct FieldPolynomial<F: Field> {
    data: Vec<F::ValueT>,
    _marker: PhantomData<F>,
}

impl<F: Field> Clone for FieldPolynomial<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.data.clone())
    }
}

impl<F: Field> std::fmt::Debug for FieldPolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPolynomial")
            .field("data", &self.data)
            .finish()
    }
}

impl<F: Field> PartialEq for FieldPolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<F: Field> Eq for FieldPolynomial<F> {}

impl<F: Field> Deref for FieldPolynomial<F> {
    type Target = [F::ValueT];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<F: Field> DerefMut for FieldPolynomial<F> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<F: Field> FieldPolynomial<F> {
    /// Creates a new [`FieldPolynomial<F>`] from raw coefficients.
    #[inline]
    pub fn new(data: Vec<F::ValueT>) -> Self {
        Self {
            data,
            _marker: PhantomData,
        }
    }

    /// Creates a zero polynomial with `coeff_count` coefficients.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self::new(vec![F::ValueT::ZERO; coeff_count])
    }

    /// Returns the number of coefficients.
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Extracts a slice of the coefficients.
    #[inline]
    pub fn as_slice(&self) -> &[F::ValueT] {
        &self.data
    }

    /// Extracts a mutable slice of the coefficients.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [F::ValueT] {
        &mut self.data
    }

    /// Consumes the polynomial, returning the coefficient vector.
    #[inline]
    pub fn inner_data(self) -> Vec<F::ValueT> {
        self.data
    }

    /// Sets every coefficient to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(F::ValueT::ZERO);
    }

    /// Copies all coefficients from `src`.
    #[inline]
    pub fn copy_from(&mut self, src: &Self) {
        self.data.copy_from_slice(&src.data);
    }

    /// Negates every coefficient in place.
    #[inline]
    pub fn neg_assign(&mut self) {
        self.data
            .iter_mut()
            .for_each(|v| F::MODULUS.reduce_neg_assign(v));
    }

    /// Extracts the least significant `bits` of every coefficient into
    /// `destination` and shifts `self` down, so repeated calls walk up the
    /// digit levels of a power-of-two basis.
    #[inline]
    pub fn decompose_lsb_bits(&mut self, mask: F::ValueT, bits: u32, destination: &mut [F::ValueT]) {
        debug_assert_eq!(self.coeff_count(), destination.len());
        self.data.iter_mut().zip(destination).for_each(|(v, d)| {
            *d = *v & mask;
            *v = *v >> bits as usize;
        });
    }

    /// Samples a polynomial with uniform coefficients.
    #[inline]
    pub fn random<R>(coeff_count: usize, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        let distr = Uniform::new(F::ValueT::ZERO, F::MODULUS_VALUE);
        Self::new(distr.sample_iter(rng).take(coeff_count).collect())
    }

    /// Samples a polynomial with discrete Gaussian coefficients.
    #[inline]
    pub fn random_gaussian<R>(
        coeff_count: usize,
        gaussian: DiscreteGaussian<F::ValueT>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self::new(gaussian.sample_iter(rng).take(coeff_count).collect())
    }

    /// Samples a polynomial with uniform binary coefficients.
    #[inline]
    pub fn random_binary<R>(coeff_count: usize, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self::new(sample_binary_values(coeff_count, rng))
    }
}

impl<F: Field> AddAssign<&Self> for FieldPolynomial<F> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| F::MODULUS.reduce_add_assign(a, b));
    }
}

impl<F: Field> SubAssign<&Self> for FieldPolynomial<F> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| F::MODULUS.reduce_sub_assign(a, b));
    }
}
