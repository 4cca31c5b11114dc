use std::ops::Deref;
use std::sync::Arc;

use algebra::integer::UnsignedInteger;
use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::random::sample_binary_values;
use algebra::reduce::RingReduce;
use algebra::{NttField, NumberTheoryTransform};
use rand::{CryptoRng, Rng};

use crate::{decode, encode, LweCiphertext, LweParameters, Parameters};

/// The LWE secret key: a uniform binary vector of length `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LweSecretKey<C: UnsignedInteger> {
    key: Vec<C>,
}

impl<C: UnsignedInteger> AsRef<[C]> for LweSecretKey<C> {
    #[inline]
    fn as_ref(&self) -> &[C] {
        &self.key
    }
}

impl<C: UnsignedInteger> LweSecretKey<C> {
    /// Creates an [`LweSecretKey<C>`] from raw coefficients.
    #[inline]
    pub fn new(key: Vec<C>) -> Self {
        Self { key }
    }

    /// Generates a fresh binary secret key.
    #[inline]
    pub fn generate<R>(params: &LweParameters<C>, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self {
            key: sample_binary_values(params.dimension, rng),
        }
    }

    /// Returns the dimension `n`.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.key.len()
    }

    /// Encrypts a message in `[0, t)` into an [`LweCiphertext<C>`].
    pub fn encrypt<R>(
        &self,
        message: C,
        params: &LweParameters<C>,
        rng: &mut R,
    ) -> LweCiphertext<C>
    where
        R: Rng + CryptoRng,
    {
        let modulus = params.cipher_modulus;
        let gaussian = params.noise_distribution();

        let mut ciphertext =
            LweCiphertext::generate_random_zero_sample(&self.key, modulus, &gaussian, rng);
        modulus.reduce_add_assign(
            ciphertext.b_mut(),
            encode(
                message,
                params.plain_modulus_value,
                params.cipher_modulus_value,
            ),
        );

        ciphertext
    }

    /// Decrypts an [`LweCiphertext<C>`] back to its message in `[0, t)`.
    ///
    /// Decryption of a ciphertext whose noise is below `Δ/2` always
    /// succeeds; it never fails at the API level.
    #[inline]
    pub fn decrypt(&self, ciphertext: &LweCiphertext<C>, params: &LweParameters<C>) -> C {
        let modulus = params.cipher_modulus;

        let a_mul_s = modulus.reduce_dot_product(ciphertext.a(), &self.key);
        let plaintext = modulus.reduce_sub(ciphertext.b(), a_mul_s);

        decode(
            plaintext,
            params.plain_modulus_value,
            params.cipher_modulus_value,
        )
    }

    /// Decrypts an [`LweCiphertext<C>`], also returning the noise magnitude.
    pub fn decrypt_with_noise(
        &self,
        ciphertext: &LweCiphertext<C>,
        params: &LweParameters<C>,
    ) -> (C, C) {
        let modulus = params.cipher_modulus;

        let a_mul_s = modulus.reduce_dot_product(ciphertext.a(), &self.key);
        let plaintext = modulus.reduce_sub(ciphertext.b(), a_mul_s);

        let t = params.plain_modulus_value;
        let q = params.cipher_modulus_value;
        let message = decode(plaintext, t, q);
        let fresh = encode(message, t, q);

        (
            message,
            modulus
                .reduce_sub(plaintext, fresh)
                .min(modulus.reduce_sub(fresh, plaintext)),
        )
    }
}

/// The ring secret key: a uniform binary polynomial of degree `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlweSecretKey<F: NttField> {
    key: FieldPolynomial<F>,
}

impl<F: NttField> Deref for RlweSecretKey<F> {
    type Target = FieldPolynomial<F>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.key
    }
}

impl<F: NttField> RlweSecretKey<F> {
    /// Creates an [`RlweSecretKey<F>`] from raw coefficients.
    #[inline]
    pub fn new(key: FieldPolynomial<F>) -> Self {
        Self { key }
    }

    /// Generates a fresh binary ring secret key.
    #[inline]
    pub fn generate<R>(ring_dimension: usize, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self {
            key: FieldPolynomial::random_binary(ring_dimension, rng),
        }
    }
}

/// All secret material of one user: both secret keys, the NTT form of the
/// ring key and the shared transform table.
///
/// Keys are immutable once the pack exists.
pub struct SecretKeyPack<C: UnsignedInteger, Q: NttField> {
    parameters: Parameters<C, Q>,
    lwe_secret_key: LweSecretKey<C>,
    rlwe_secret_key: RlweSecretKey<Q>,
    ntt_rlwe_secret_key: FieldNttPolynomial<Q>,
    ntt_table: Arc<<Q as NttField>::Table>,
}

impl<C: UnsignedInteger, Q: NttField> SecretKeyPack<C, Q> {
    /// Generates fresh secret material for `parameters`.
    pub fn new<R>(parameters: Parameters<C, Q>, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        let lwe_secret_key = LweSecretKey::generate(parameters.lwe_params(), rng);
        let rlwe_secret_key = RlweSecretKey::generate(parameters.ring_dimension(), rng);
        Self::from_parts(parameters, lwe_secret_key, rlwe_secret_key)
    }

    /// Rebuilds a pack from its persistent parts, recomputing the NTT table
    /// and the NTT form of the ring key.
    pub fn from_parts(
        parameters: Parameters<C, Q>,
        lwe_secret_key: LweSecretKey<C>,
        rlwe_secret_key: RlweSecretKey<Q>,
    ) -> Self {
        let ntt_table = Arc::new(parameters.generate_ntt_table());
        let ntt_rlwe_secret_key = ntt_table.transform(&rlwe_secret_key);

        Self {
            parameters,
            lwe_secret_key,
            rlwe_secret_key,
            ntt_rlwe_secret_key,
            ntt_table,
        }
    }

    /// Returns the parameters.
    #[inline]
    pub fn parameters(&self) -> &Parameters<C, Q> {
        &self.parameters
    }

    /// Returns the LWE secret key.
    #[inline]
    pub fn lwe_secret_key(&self) -> &LweSecretKey<C> {
        &self.lwe_secret_key
    }

    /// Returns the ring secret key.
    #[inline]
    pub fn rlwe_secret_key(&self) -> &RlweSecretKey<Q> {
        &self.rlwe_secret_key
    }

    /// Returns the NTT form of the ring secret key.
    #[inline]
    pub fn ntt_rlwe_secret_key(&self) -> &FieldNttPolynomial<Q> {
        &self.ntt_rlwe_secret_key
    }

    /// Returns the shared NTT table.
    #[inline]
    pub fn ntt_table(&self) -> &Arc<<Q as NttField>::Table> {
        &self.ntt_table
    }

    /// Encrypts a message in `[0, t)` under the LWE secret key.
    #[inline]
    pub fn encrypt<R>(&self, message: C, rng: &mut R) -> LweCiphertext<C>
    where
        R: Rng + CryptoRng,
    {
        self.lwe_secret_key
            .encrypt(message, self.parameters.lwe_params(), rng)
    }

    /// Decrypts a ciphertext back to its message in `[0, t)`.
    #[inline]
    pub fn decrypt(&self, ciphertext: &LweCiphertext<C>) -> C {
        self.lwe_secret_key
            .decrypt(ciphertext, self.parameters.lwe_params())
    }

    /// Decrypts a ciphertext, also returning the noise magnitude.
    #[inline]
    pub fn decrypt_with_noise(&self, ciphertext: &LweCiphertext<C>) -> (C, C) {
        self.lwe_secret_key
            .decrypt_with_noise(ciphertext, self.parameters.lwe_params())
    }
}
