use algebra::integer::UnsignedInteger;
use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::random::DiscreteGaussian;
use algebra::reduce::RingReduce;
use algebra::{Basis, Field, NttField};
use lattice::{Lwe, NttRgsw, NttRlweSpace, PolyDecomposeSpace, Rlwe, RlweSpace};
use rand::{CryptoRng, Rng};

use crate::LweSecretKey;

/// The blind rotation key: one RGSW encryption of each bit of the binary
/// LWE secret key, under the ring secret key.
pub struct BlindRotationKey<Q: NttField> {
    key: Vec<NttRgsw<Q>>,
}

impl<Q: NttField> Clone for BlindRotationKey<Q> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
        }
    }
}

impl<Q: NttField> BlindRotationKey<Q> {
    /// Creates a new [`BlindRotationKey<Q>`].
    #[inline]
    pub fn new(key: Vec<NttRgsw<Q>>) -> Self {
        Self { key }
    }

    /// Returns the RGSW samples, one per LWE secret coefficient.
    #[inline]
    pub fn data(&self) -> &[NttRgsw<Q>] {
        &self.key
    }

    /// Returns the LWE dimension this key rotates for.
    #[inline]
    pub fn lwe_dimension(&self) -> usize {
        self.key.len()
    }

    /// Generates the [`BlindRotationKey<Q>`].
    pub fn generate<C, R>(
        lwe_secret_key: &LweSecretKey<C>,
        ntt_rlwe_secret_key: &FieldNttPolynomial<Q>,
        blind_rotation_basis: Basis<Q>,
        gaussian: DiscreteGaussian<<Q as Field>::ValueT>,
        ntt_table: &<Q as NttField>::Table,
        rng: &mut R,
    ) -> Self
    where
        C: UnsignedInteger,
        R: Rng + CryptoRng,
    {
        let key = lwe_secret_key
            .as_ref()
            .iter()
            .map(|&s| {
                if s.is_zero() {
                    NttRgsw::generate_random_zero_sample(
                        ntt_rlwe_secret_key,
                        blind_rotation_basis,
                        gaussian,
                        ntt_table,
                        rng,
                    )
                } else {
                    NttRgsw::generate_random_one_sample(
                        ntt_rlwe_secret_key,
                        blind_rotation_basis,
                        gaussian,
                        ntt_table,
                        rng,
                    )
                }
            })
            .collect();
        Self { key }
    }

    /// Performs the blind rotation with an LWE sample already rescaled to
    /// `[0, 2N)`, starting from the test polynomial `lut`.
    ///
    /// The accumulator is `X^{-b} · lut` and each step applies the CMUX
    /// `ACC ← ACC + (X^{a_i} - 1) · (ACC ⊠ RGSW(s_i))`.
    pub fn blind_rotate<C: UnsignedInteger>(
        &self,
        mut lut: FieldPolynomial<Q>,
        lwe: &Lwe<C>,
        ntt_table: &<Q as NttField>::Table,
    ) -> Rlwe<Q> {
        let ring_dimension = lut.coeff_count();
        debug_assert_eq!(self.key.len(), lwe.dimension());

        let decompose_space = &mut PolyDecomposeSpace::new(ring_dimension);
        let median = &mut NttRlweSpace::new(ring_dimension);
        let external_product = &mut RlweSpace::new(ring_dimension);

        // lut * X^{-b}
        let b: usize = lwe.b().as_into();
        if b != 0 {
            let neg_b = (ring_dimension << 1) - b;
            if neg_b <= ring_dimension {
                lut.rotate_right(neg_b);
                lut[..neg_b]
                    .iter_mut()
                    .for_each(|v| Q::MODULUS.reduce_neg_assign(v));
            } else {
                let r = neg_b - ring_dimension;
                lut.rotate_right(r);
                lut[r..]
                    .iter_mut()
                    .for_each(|v| Q::MODULUS.reduce_neg_assign(v));
            }
        }

        let acc = Rlwe::new(FieldPolynomial::zero(ring_dimension), lut);

        self.key
            .iter()
            .zip(lwe.a())
            .fold(acc, |mut acc, (s_i, &a_i)| {
                if !a_i.is_zero() {
                    // external_product = ACC ⊠ RGSW(s_i)
                    acc.mul_ntt_rgsw_inplace(
                        s_i,
                        ntt_table,
                        decompose_space,
                        median,
                        external_product,
                    );
                    // ACC = ACC + (X^{a_i} - 1) * (ACC ⊠ RGSW(s_i))
                    acc.sub_assign_element_wise(external_product);
                    acc.add_assign_rhs_mul_monic_monomial(
                        external_product,
                        ring_dimension,
                        a_i.as_into(),
                    );
                }
                acc
            })
    }
}
