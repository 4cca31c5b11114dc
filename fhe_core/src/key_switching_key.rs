use algebra::integer::{AsFrom, UnsignedInteger};
use algebra::reduce::RingReduce;
use algebra::{Basis, Field, NttField};
use lattice::Lwe;
use num_traits::{ConstZero, Zero};
use rand::{CryptoRng, Rng};

use crate::{FheError, SecretKeyPack};

/// The LWE key switching key, still at the ring modulus `Q`.
///
/// Entry `key[i][j]` encrypts `s_ring[i] · B^j` under the LWE secret key.
/// Switching decomposes every mask coefficient of the extracted sample into
/// base-`B` digits and subtracts the digit-scaled entries, rewriting a
/// dimension-`N` sample under `s_ring` into a dimension-`n` sample under
/// `s_lwe` with the same phase.
pub struct LweKeySwitchingKey<Q: NttField> {
    lwe_dimension: usize,
    basis: Basis<Q>,
    key: Vec<Vec<Lwe<<Q as Field>::ValueT>>>,
}

impl<Q: NttField> Clone for LweKeySwitchingKey<Q> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            lwe_dimension: self.lwe_dimension,
            basis: self.basis,
            key: self.key.clone(),
        }
    }
}

impl<Q: NttField> LweKeySwitchingKey<Q> {
    /// Creates an [`LweKeySwitchingKey<Q>`] from its stored rows.
    #[inline]
    pub fn from_rows(
        lwe_dimension: usize,
        basis: Basis<Q>,
        key: Vec<Vec<Lwe<<Q as Field>::ValueT>>>,
    ) -> Self {
        Self {
            lwe_dimension,
            basis,
            key,
        }
    }

    /// Returns the output dimension `n`.
    #[inline]
    pub fn lwe_dimension(&self) -> usize {
        self.lwe_dimension
    }

    /// Returns the decomposition basis.
    #[inline]
    pub fn basis(&self) -> Basis<Q> {
        self.basis
    }

    /// Returns the stored rows, indexed `[ring coefficient][digit level]`.
    #[inline]
    pub fn rows(&self) -> &[Vec<Lwe<<Q as Field>::ValueT>>] {
        &self.key
    }

    /// Generates the [`LweKeySwitchingKey<Q>`].
    pub fn generate<C, R>(secret_key_pack: &SecretKeyPack<C, Q>, rng: &mut R) -> Self
    where
        C: UnsignedInteger,
        R: Rng + CryptoRng,
    {
        let params = secret_key_pack.parameters();
        let basis = params.key_switching_basis();
        let modulus = Q::MODULUS;
        let gaussian = params.key_switching_noise_distribution();

        // the binary LWE secret key, lifted into the field
        let s_out: Vec<<Q as Field>::ValueT> = secret_key_pack
            .lwe_secret_key()
            .as_ref()
            .iter()
            .map(|&v| {
                let v: u64 = v.as_into();
                <Q as Field>::ValueT::as_from(v)
            })
            .collect();

        let key = secret_key_pack
            .rlwe_secret_key()
            .iter()
            .map(|&z| {
                basis
                    .scalar_iter()
                    .map(|scalar| {
                        let mut cipher =
                            Lwe::generate_random_zero_sample(&s_out, modulus, &gaussian, rng);
                        modulus
                            .reduce_add_assign(cipher.b_mut(), modulus.reduce_mul(z, scalar));
                        cipher
                    })
                    .collect()
            })
            .collect();

        Self {
            lwe_dimension: params.lwe_dimension(),
            basis,
            key,
        }
    }

    /// Performs the key switching operation.
    pub fn key_switch(
        &self,
        ciphertext: &Lwe<<Q as Field>::ValueT>,
    ) -> Result<Lwe<<Q as Field>::ValueT>, FheError> {
        if ciphertext.dimension() != self.key.len() {
            return Err(FheError::DimensionMismatch {
                expected: self.key.len(),
                found: ciphertext.dimension(),
            });
        }

        let modulus = Q::MODULUS;
        let mut result = Lwe::zero(self.lwe_dimension);
        *result.b_mut() = ciphertext.b();

        let mut digits = vec![<Q as Field>::ValueT::ZERO; self.basis.decompose_len()];
        for (&a_i, rows) in ciphertext.a().iter().zip(&self.key) {
            self.basis.decompose_value(a_i, &mut digits);
            for (&digit, row) in digits.iter().zip(rows) {
                if !digit.is_zero() {
                    result.sub_assign_rhs_mul_scalar_reduce(row, digit, modulus);
                }
            }
        }

        Ok(result)
    }
}
