use algebra::polynomial::FieldNttPolynomial;
use algebra::random::DiscreteGaussian;
use algebra::{Basis, Field, NttField};
use rand::{CryptoRng, Rng};

use crate::NttGadgetRlwe;

/// An RGSW sample in NTT form: two gadget RLWE vectors encrypting `-s·m`
/// and `m`.
///
/// The external product against an RLWE sample `(a, b)` is
/// `(-s·m) ⊙ decompose(a) + m ⊙ decompose(b)`, an RLWE sample of
/// `m · (b - a·s)` with additive noise growth.
pub struct NttRgsw<F: NttField> {
    minus_s_m: NttGadgetRlwe<F>,
    m: NttGadgetRlwe<F>,
}

impl<F: NttField> Clone for NttRgsw<F> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            minus_s_m: self.minus_s_m.clone(),
            m: self.m.clone(),
        }
    }
}

impl<F: NttField> NttRgsw<F> {
    /// Creates a new [`NttRgsw<F>`].
    #[inline]
    pub fn new(minus_s_m: NttGadgetRlwe<F>, m: NttGadgetRlwe<F>) -> Self {
        Self { minus_s_m, m }
    }

    /// Returns a reference to the gadget vector encrypting `-s·m`.
    #[inline]
    pub fn minus_s_m(&self) -> &NttGadgetRlwe<F> {
        &self.minus_s_m
    }

    /// Returns a reference to the gadget vector encrypting `m`.
    #[inline]
    pub fn m(&self) -> &NttGadgetRlwe<F> {
        &self.m
    }

    /// Returns the decomposition basis.
    #[inline]
    pub fn basis(&self) -> Basis<F> {
        self.m.basis()
    }

    /// Generates an RGSW sample which encrypts `0`.
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
        Self {
            minus_s_m: NttGadgetRlwe::generate_random_zero_sample(
                ntt_secret_key,
                basis,
                gaussian,
                ntt_table,
                rng,
            ),
            m: NttGadgetRlwe::generate_random_zero_sample(
                ntt_secret_key,
                basis,
                gaussian,
                ntt_table,
                rng,
            ),
        }
    }

    /// Generates an RGSW sample which encrypts `1`.
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
        Self {
            minus_s_m: NttGadgetRlwe::generate_random_neg_secret_sample(
                ntt_secret_key,
                basis,
                gaussian,
                ntt_table,
                rng,
            ),
            m: NttGadgetRlwe::generate_random_one_sample(
                ntt_secret_key,
                basis,
                gaussian,
                ntt_table,
                rng,
            ),
        }
    }
}
