use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::random::DiscreteGaussian;
use algebra::{Basis, Field, NttField, NumberTheoryTransform};
use rand::{CryptoRng, Rng};

use crate::{NttRlwe, PolyDecomposeSpace};

/// A gadget vector of NTT-form RLWE samples.
///
/// Row `j` encrypts `m · B^j`, so multiplying row-wise against the base-`B`
/// digits of a polynomial and accumulating yields an RLWE sample of the
/// product `m · poly` with additive noise growth.
pub struct NttGadgetRlwe<F: NttField> {
    data: Vec<NttRlwe<F>>,
    basis: Basis<F>,
}

impl<F: NttField> Clone for NttGadgetRlwe<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            basis: self.basis,
        }
    }
}

impl<F: NttField> NttGadgetRlwe<F> {
    /// Creates a new [`NttGadgetRlwe<F>`].
    #[inline]
    pub fn new(data: Vec<NttRlwe<F>>, basis: Basis<F>) -> Self {
        debug_assert_eq!(data.len(), basis.decompose_len());
        Self { data, basis }
    }

    /// Returns a reference to the gadget rows.
    #[inline]
    pub fn data(&self) -> &[NttRlwe<F>] {
        &self.data
    }

    /// Returns the decomposition basis.
    #[inline]
    pub fn basis(&self) -> Basis<F> {
        self.basis
    }

    /// Returns an iterator over the gadget rows.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NttRlwe<F>> {
        self.data.iter()
    }

    /// Computes `destination = self ⊙ decompose(polynomial)`.
    #[inline]
    pub fn mul_polynomial_inplace(
        &self,
        polynomial: &FieldPolynomial<F>,
        ntt_table: &<F as NttField>::Table,
        decompose_space: &mut PolyDecomposeSpace<F>,
        destination: &mut NttRlwe<F>,
    ) {
        destination.set_zero();
        self.add_mul_polynomial_assign(polynomial, ntt_table, decompose_space, destination);
    }

    /// Computes `destination += self ⊙ decompose(polynomial)`.
    ///
    /// Each digit level is extracted, transformed and multiplied against the
    /// matching gadget row.
    pub fn add_mul_polynomial_assign(
        &self,
        polynomial: &FieldPolynomial<F>,
        ntt_table: &<F as NttField>::Table,
        decompose_space: &mut PolyDecomposeSpace<F>,
        destination: &mut NttRlwe<F>,
    ) {
        let (working, digits) = decompose_space.get_mut();
        working.copy_from(polynomial);

        let mask = self.basis.mask();
        let bits = self.basis.bits();

        for row in self.data.iter() {
            working.decompose_lsb_bits(mask, bits, digits.as_mut_slice());
            ntt_table.transform_slice(digits.as_mut_slice());
            destination.add_ntt_rlwe_mul_ntt_polynomial_assign(row, digits);
        }
    }

    /// Generates a gadget sample which encrypts `0`.
    pub fn generate_random_zero_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        basis: Basis<F>,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let data = (0..basis.decompose_len())
            .map(|_| NttRlwe::generate_random_zero_sample(ntt_secret_key, gaussian, ntt_table, rng))
            .collect();
        Self { data, basis }
    }

    /// Generates a gadget sample which encrypts `1`, row `j` holding `B^j`.
    pub fn generate_random_one_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        basis: Basis<F>,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let data = basis
            .scalar_iter()
            .map(|scalar| {
                NttRlwe::generate_random_value_sample(
                    ntt_secret_key,
                    scalar,
                    gaussian,
                    ntt_table,
                    rng,
                )
            })
            .collect();
        Self { data, basis }
    }

    /// Generates a gadget sample which encrypts `-s`, row `j` holding
    /// `-s · B^j` (realized by adding `B^j` to the mask of a zero sample).
    pub fn generate_random_neg_secret_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<F>,
        basis: Basis<F>,
        gaussian: DiscreteGaussian<<F as Field>::ValueT>,
        ntt_table: &<F as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let data = basis
            .scalar_iter()
            .map(|scalar| {
                let mut sample = NttRlwe::generate_random_zero_sample(
                    ntt_secret_key,
                    gaussian,
                    ntt_table,
                    rng,
                );
                let (a, _) = sample.a_b_mut();
                a.add_scalar_assign(scalar);
                sample
            })
            .collect();
        Self { data, basis }
    }
}
