use algebra::integer::UnsignedInteger;
use algebra::random::DiscreteGaussian;
use algebra::reduce::RingReduce;
use rand::distributions::{Distribution, Uniform};
use rand::{CryptoRng, Rng};

/// An LWE sample `(a, b)` with `b = <a, s> + m + e` over `Z_m`.
///
/// The value type carries no modulus; every operation takes the modulus as
/// an explicit argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lwe<C: UnsignedInteger> {
    a: Vec<C>,
    b: C,
}

impl<C: UnsignedInteger> Lwe<C> {
    /// Creates a new [`Lwe<C>`].
    #[inline]
    pub fn new(a: Vec<C>, b: C) -> Self {
        Self { a, b }
    }

    /// Creates a zero sample of the given dimension.
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: vec![C::ZERO; dimension],
            b: C::ZERO,
        }
    }

    /// Returns the dimension `n`.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    /// Returns a reference to the mask `a`.
    #[inline]
    pub fn a(&self) -> &[C] {
        &self.a
    }

    /// Returns a mutable reference to the mask `a`.
    #[inline]
    pub fn a_mut(&mut self) -> &mut [C] {
        &mut self.a
    }

    /// Returns the body `b`.
    #[inline]
    pub fn b(&self) -> C {
        self.b
    }

    /// Returns a mutable reference to the body `b`.
    #[inline]
    pub fn b_mut(&mut self) -> &mut C {
        &mut self.b
    }

    /// Performs component-wise addition, returning a new sample.
    #[inline]
    pub fn add_reduce_component_wise_ref(&self, rhs: &Self, modulus: impl RingReduce<C>) -> Self {
        let mut result = self.clone();
        result.add_reduce_assign_component_wise(rhs, modulus);
        result
    }

    /// Performs in-place component-wise addition.
    #[inline]
    pub fn add_reduce_assign_component_wise(&mut self, rhs: &Self, modulus: impl RingReduce<C>) {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(v, &r)| modulus.reduce_add_assign(v, r));
        modulus.reduce_add_assign(&mut self.b, rhs.b);
    }

    /// Performs component-wise subtraction, returning a new sample.
    #[inline]
    pub fn sub_reduce_component_wise_ref(&self, rhs: &Self, modulus: impl RingReduce<C>) -> Self {
        let mut result = self.clone();
        result.sub_reduce_assign_component_wise(rhs, modulus);
        result
    }

    /// Performs in-place component-wise subtraction.
    #[inline]
    pub fn sub_reduce_assign_component_wise(&mut self, rhs: &Self, modulus: impl RingReduce<C>) {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(v, &r)| modulus.reduce_sub_assign(v, r));
        modulus.reduce_sub_assign(&mut self.b, rhs.b);
    }

    /// Negates every component, returning a new sample.
    #[inline]
    pub fn neg_reduce(&self, modulus: impl RingReduce<C>) -> Self {
        let mut result = self.clone();
        result.neg_reduce_assign(modulus);
        result
    }

    /// Negates every component in place.
    #[inline]
    pub fn neg_reduce_assign(&mut self, modulus: impl RingReduce<C>) {
        self.a
            .iter_mut()
            .for_each(|v| modulus.reduce_neg_assign(v));
        modulus.reduce_neg_assign(&mut self.b);
    }

    /// Doubles every component in place.
    #[inline]
    pub fn double_reduce_assign(&mut self, modulus: impl RingReduce<C>) {
        self.a
            .iter_mut()
            .for_each(|v| modulus.reduce_double_assign(v));
        modulus.reduce_double_assign(&mut self.b);
    }

    /// Performs `self += rhs * scalar` component-wise.
    #[inline]
    pub fn add_assign_rhs_mul_scalar_reduce(
        &mut self,
        rhs: &Self,
        scalar: C,
        modulus: impl RingReduce<C>,
    ) {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(v, &r)| modulus.reduce_add_assign(v, modulus.reduce_mul(r, scalar)));
        modulus.reduce_add_assign(&mut self.b, modulus.reduce_mul(rhs.b, scalar));
    }

    /// Performs `self -= rhs * scalar` component-wise.
    #[inline]
    pub fn sub_assign_rhs_mul_scalar_reduce(
        &mut self,
        rhs: &Self,
        scalar: C,
        modulus: impl RingReduce<C>,
    ) {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        self.a
            .iter_mut()
            .zip(rhs.a())
            .for_each(|(v, &r)| modulus.reduce_sub_assign(v, modulus.reduce_mul(r, scalar)));
        modulus.reduce_sub_assign(&mut self.b, modulus.reduce_mul(rhs.b, scalar));
    }

    /// Generates a fresh sample which encrypts `0` under `secret_key`.
    pub fn generate_random_zero_sample<M, R>(
        secret_key: &[C],
        modulus: M,
        gaussian: &DiscreteGaussian<C>,
        rng: &mut R,
    ) -> Self
    where
        M: RingReduce<C>,
        R: Rng + CryptoRng,
    {
        let distr = Uniform::new(C::ZERO, modulus.modulus_value());
        let a: Vec<C> = distr.sample_iter(&mut *rng).take(secret_key.len()).collect();

        let mut b = modulus.reduce_dot_product(&a, secret_key);
        modulus.reduce_add_assign(&mut b, gaussian.sample(rng));

        Self { a, b }
    }
}
