use algebra::integer::UnsignedInteger;
use algebra::random::sample_binary_values;
use algebra::reduce::RingReduce;
use lattice::Lwe;
use rand::prelude::Distribution;
use rand::{CryptoRng, Rng};

use crate::{encode, LweCiphertext, LweParameters, LweSecretKey, ParameterPreset};

/// A pool of fresh LWE zero-encryptions.
///
/// Public encryption sums a random binary subset of the pool, adds the
/// encoded message and fresh noise on every component. The evaluator side
/// never needs the secret key.
#[derive(Debug, Clone)]
pub struct LwePublicKey<C: UnsignedInteger> {
    preset: ParameterPreset,
    public_key: Vec<Lwe<C>>,
}

impl<C: UnsignedInteger> LwePublicKey<C> {
    /// Creates an [`LwePublicKey<C>`] from `dimension` zero samples.
    pub fn new<R>(
        secret_key: &LweSecretKey<C>,
        params: &LweParameters<C>,
        preset: ParameterPreset,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let modulus = params.cipher_modulus;
        let gaussian = params.noise_distribution();

        let public_key = (0..params.dimension)
            .map(|_| {
                Lwe::generate_random_zero_sample(secret_key.as_ref(), modulus, &gaussian, rng)
            })
            .collect();

        Self { preset, public_key }
    }

    /// Rebuilds a public key from its stored samples.
    #[inline]
    pub fn from_samples(preset: ParameterPreset, public_key: Vec<Lwe<C>>) -> Self {
        Self { preset, public_key }
    }

    /// Returns the preset this key was generated for.
    #[inline]
    pub fn preset(&self) -> ParameterPreset {
        self.preset
    }

    /// Returns the pool of zero samples.
    #[inline]
    pub fn samples(&self) -> &[Lwe<C>] {
        &self.public_key
    }

    /// Encrypts a message in `[0, t)` without the secret key.
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

        let r: Vec<C> = sample_binary_values(self.public_key.len(), rng);

        let mut result = LweCiphertext::zero(params.dimension);
        modulus.reduce_add_assign(
            result.b_mut(),
            encode(
                message,
                params.plain_modulus_value,
                params.cipher_modulus_value,
            ),
        );

        for (zero, &ri) in self.public_key.iter().zip(r.iter()) {
            if !ri.is_zero() {
                result.add_assign_rhs_mul_scalar_reduce(zero, ri, modulus);
            }
        }

        for (ai, ei) in result
            .a_mut()
            .iter_mut()
            .zip(gaussian.sample_iter(&mut *rng))
        {
            modulus.reduce_add_assign(ai, ei);
        }
        let e = gaussian.sample(rng);
        modulus.reduce_add_assign(result.b_mut(), e);

        result
    }
}
