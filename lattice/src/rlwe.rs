use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::random::DiscreteGaussian;
use algebra::reduce::RingReduce;
use algebra::{Field, NttField, NumberTheoryTransform};
use rand::{CryptoRng, Rng};

use crate::{Lwe, NttRgsw, PolyDecomposeSpace};

/// An RLWE sample `(a, b)` with `b = a · s + m + e` in
/// `Z_Q[X]/(X^N + 1)`, stored in coefficient form.
pub struct Rlwe<F: Field> {
    a: FieldPolynomial<F>,
    b: FieldPolynomial<F>,
}

impl<F: Field> Clone for Rlwe<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }
}

impl<F: Field> PartialEq for Rlwe<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl<F: Field> Eq for Rlwe<F> {}

impl<F: Field> Rlwe<F> {
    /// Creates a new [`Rlwe<F>`].
    #[inline]
    pub fn new(a: FieldPolynomial<F>, b: FieldPolynomial<F>) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a zero sample of the given dimension.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            a: FieldPolynomial::zero(coeff_count),
            b: FieldPolynomial::zero(coeff_count),
        }
    }

    /// Returns the ring dimension `N`.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.coeff_count()
    }

    /// Returns a reference to the mask polynomial `a`.
    #[inline]
    pub fn a(&self) -> &FieldPolynomial<F> {
        &self.a
    }

    /// Returns a mutable reference to the mask polynomial `a`.
    #[inline]
    pub fn a_mut(&mut self) -> &mut FieldPolynomial<F> {
        &mut self.a
    }

    /// Returns a reference to the body polynomial `b`.
    #[inline]
    pub fn b(&self) -> &FieldPolynomial<F> {
        &self.b
    }

    /// Returns a mutable reference to the body polynomial `b`.
    #[inline]
    pub fn b_mut(&mut self) -> &mut FieldPolynomial<F> {
        &mut self.b
    }

    /// Performs in-place element-wise addition.
    #[inline]
    pub fn add_assign_element_wise(&mut self, rhs: &Self) {
        self.a += rhs.a();
        self.b += rhs.b();
    }

    /// Performs in-place element-wise subtraction.
    #[inline]
    pub fn sub_assign_element_wise(&mut self, rhs: &Self) {
        self.a -= rhs.a();
        self.b -= rhs.b();
    }

    /// Extracts the LWE sample of the constant coefficient, consuming `self`.
    ///
    /// With `a'[0] = a[0]` and `a'[i] = -a[N - i]`, the pair `(a', b[0])`
    /// satisfies `b[0] - <a', s> = m[0] + e[0]` under the coefficient vector
    /// of the ring secret.
    #[inline]
    pub fn extract_lwe_locally(self) -> Lwe<<F as Field>::ValueT> {
        let Self { a, b } = self;
        let mut a = a.inner_data();
        a[1..].reverse();
        a[1..]
            .iter_mut()
            .for_each(|v| F::MODULUS.reduce_neg_assign(v));

        Lwe::new(a, b[0])
    }

    /// Performs `self += rhs * X^r` with the negacyclic rule
    /// `X^N = -1`, `r ∈ [0, 2N)`.
    pub fn add_assign_rhs_mul_monic_monomial(&mut self, rhs: &Self, dimension: usize, r: usize) {
        debug_assert!(r < dimension << 1);
        if r <= dimension {
            #[inline]
            fn rotate_add<F: Field>(
                x: &mut FieldPolynomial<F>,
                y: &FieldPolynomial<F>,
                r: usize,
                n_sub_r: usize,
            ) {
                x[0..r]
                    .iter_mut()
                    .zip(y[n_sub_r..].iter())
                    .for_each(|(u, &v)| F::MODULUS.reduce_sub_assign(u, v));
                x[r..]
                    .iter_mut()
                    .zip(y[0..n_sub_r].iter())
                    .for_each(|(u, &v)| F::MODULUS.reduce_add_assign(u, v));
            }
            let n_sub_r = dimension - r;
            rotate_add(&mut self.a, rhs.a(), r, n_sub_r);
            rotate_add(&mut self.b, rhs.b(), r, n_sub_r);
        } else {
            #[inline]
            fn rotate_add<F: Field>(
                x: &mut FieldPolynomial<F>,
                y: &FieldPolynomial<F>,
                r: usize,
                n_sub_r: usize,
            ) {
                x[0..r]
                    .iter_mut()
                    .zip(y[n_sub_r..].iter())
                    .for_each(|(u, &v)| F::MODULUS.reduce_add_assign(u, v));
                x[r..]
                    .iter_mut()
                    .zip(y[0..n_sub_r].iter())
                    .for_each(|(u, &v)| F::MODULUS.reduce_sub_assign(u, v));
            }
            let r = r - dimension;
            let n_sub_r = dimension - r;
            rotate_add(&mut self.a, rhs.a(), r, n_sub_r);
            rotate_add(&mut self.b, rhs.b(), r, n_sub_r);
        }
    }
}

impl<F: NttField> Rlwe<F> {
    /// Performs the external product `self ⊠ rgsw`, writing the result into
    /// `destination`.
    ///
    /// The gadget encrypting `-s·m` is multiplied by the decomposition of
    /// `a`, the gadget encrypting `m` by the decomposition of `b`; their sum
    /// is an RLWE sample of `m · (b - a·s)`.
    #[inline]
    pub fn mul_ntt_rgsw_inplace(
        &self,
        rgsw: &NttRgsw<F>,
        ntt_table: &<F as NttField>::Table,
        decompose_space: &mut PolyDecomposeSpace<F>,
        median: &mut NttRlwe<F>,
        destination: &mut Rlwe<F>,
    ) {
        rgsw.minus_s_m()
            .mul_polynomial_inplace(self.a(), ntt_table, decompose_space, median);

        rgsw.m()
            .add_mul_polynomial_assign(self.b(), ntt_table, decompose_space, median);

        median.inverse_transform_inplace(ntt_table, destination);
    }

    /// Generates a fresh sample which encrypts `0` under the NTT-form ring
    /// secret key.
    pub fn generate_random_zero_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let dimension = ntt_secret_key.coeff_count();

        let a = FieldPolynomial::random(dimension, rng);
        let mut a_ntt = ntt_table.transform(&a);
        a_ntt *= ntt_secret_key;

        let mut b = FieldPolynomial::random_gaussian(dimension, gaussian, rng);
        b += &ntt_table.inverse_transform_inplace(a_ntt);

        Self { a, b }
    }
}

/// An RLWE sample in evaluation (NTT) form.
pub struct NttRlwe<F: Field> {
    a: FieldNttPolynomial<F>,
    b: FieldNttPolynomial<F>,
}

impl<F: Field> Clone for NttRlwe<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }
}

impl<F: Field> NttRlwe<F> {
    /// Creates a new [`NttRlwe<F>`].
    #[inline]
    pub fn new(a: FieldNttPolynomial<F>, b: FieldNttPolynomial<F>) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a zero sample of the given dimension.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            a: FieldNttPolynomial::zero(coeff_count),
            b: FieldNttPolynomial::zero(coeff_count),
        }
    }

    /// Sets all values to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.a.set_zero();
        self.b.set_zero();
    }

    /// Returns a reference to the mask `a`.
    #[inline]
    pub fn a(&self) -> &FieldNttPolynomial<F> {
        &self.a
    }

    /// Returns a reference to the body `b`.
    #[inline]
    pub fn b(&self) -> &FieldNttPolynomial<F> {
        &self.b
    }

    /// Returns mutable references to `a` and `b`.
    #[inline]
    pub fn a_b_mut(&mut self) -> (&mut FieldNttPolynomial<F>, &mut FieldNttPolynomial<F>) {
        (&mut self.a, &mut self.b)
    }

    /// Performs `self += rhs * poly` with a pointwise multiplication.
    #[inline]
    pub fn add_ntt_rlwe_mul_ntt_polynomial_assign(
        &mut self,
        rhs: &Self,
        poly: &FieldNttPolynomial<F>,
    ) {
        self.a.add_mul_assign(rhs.a(), poly);
        self.b.add_mul_assign(rhs.b(), poly);
    }
}

impl<F: NttField> NttRlwe<F> {
    /// Inverse transforms into `destination`, leaving `self` untouched.
    #[inline]
    pub fn inverse_transform_inplace(
        &self,
        ntt_table: &<F as NttField>::Table,
        destination: &mut Rlwe<F>,
    ) {
        destination.a_mut().copy_from_slice(self.a.as_slice());
        destination.b_mut().copy_from_slice(self.b.as_slice());

        ntt_table.inverse_transform_slice(destination.a_mut().as_mut_slice());
        ntt_table.inverse_transform_slice(destination.b_mut().as_mut_slice());
    }

    /// Generates a fresh sample which encrypts `0` under the NTT-form ring
    /// secret key.
    pub fn generate_random_zero_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let dimension = ntt_secret_key.coeff_count();

        let a = FieldNttPolynomial::new(
            FieldPolynomial::<F>::random(dimension, rng).inner_data(),
        );

        let e = FieldPolynomial::random_gaussian(dimension, gaussian, rng);
        let mut b = ntt_table.transform_inplace(e);
        b.add_mul_assign(&a, ntt_secret_key);

        Self { a, b }
    }

    /// Generates a fresh sample which encrypts the constant `scalar`.
    pub fn generate_random_value_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        scalar: <F as Field>::ValueT,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let mut sample =
            Self::generate_random_zero_sample(ntt_secret_key, gaussian, ntt_table, rng);
        sample.b.add_scalar_assign(scalar);
        sample
    }
}
