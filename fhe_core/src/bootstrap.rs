use std::sync::Arc;

use algebra::integer::{AsInto, UnsignedInteger};
use algebra::polynomial::FieldPolynomial;
use algebra::NttField;
use rand::{CryptoRng, Rng};

use crate::{
    lwe_modulus_switch, BlindRotationKey, FheError, LweCiphertext, LweKeySwitchingKey, Parameters,
    SecretKeyPack,
};

/// The complete bootstrapping key: blind rotation key, key switching key
/// and the parameters they were generated for.
///
/// [`BootstrapKey::bootstrap`] evaluates one test polynomial at the phase of
/// an LWE sample and returns a fresh sample whose noise depends only on the
/// parameter set, never on the input noise. This is the sole reason gates
/// compose to arbitrary depth.
pub struct BootstrapKey<C: UnsignedInteger, Q: NttField> {
    blind_rotation_key: BlindRotationKey<Q>,
    key_switching_key: LweKeySwitchingKey<Q>,
    parameters: Parameters<C, Q>,
    ntt_table: Arc<<Q as NttField>::Table>,
}

impl<C: UnsignedInteger, Q: NttField> BootstrapKey<C, Q> {
    /// Generates the [`BootstrapKey<C, Q>`] from the secret material.
    ///
    /// This dominates key generation time and memory.
    pub fn new<R>(secret_key_pack: &SecretKeyPack<C, Q>, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        let parameters = *secret_key_pack.parameters();

        let blind_rotation_key = BlindRotationKey::generate(
            secret_key_pack.lwe_secret_key(),
            secret_key_pack.ntt_rlwe_secret_key(),
            parameters.blind_rotation_basis(),
            parameters.ring_noise_distribution(),
            secret_key_pack.ntt_table(),
            rng,
        );

        let key_switching_key = LweKeySwitchingKey::generate(secret_key_pack, rng);

        Self {
            blind_rotation_key,
            key_switching_key,
            parameters,
            ntt_table: Arc::clone(secret_key_pack.ntt_table()),
        }
    }

    /// Rebuilds a bootstrap key from its persistent parts.
    pub fn from_parts(
        blind_rotation_key: BlindRotationKey<Q>,
        key_switching_key: LweKeySwitchingKey<Q>,
        parameters: Parameters<C, Q>,
    ) -> Self {
        let ntt_table = Arc::new(parameters.generate_ntt_table());
        Self {
            blind_rotation_key,
            key_switching_key,
            parameters,
            ntt_table,
        }
    }

    /// Returns the parameters.
    #[inline]
    pub fn parameters(&self) -> &Parameters<C, Q> {
        &self.parameters
    }

    /// Returns the blind rotation key.
    #[inline]
    pub fn blind_rotation_key(&self) -> &BlindRotationKey<Q> {
        &self.blind_rotation_key
    }

    /// Returns the key switching key.
    #[inline]
    pub fn key_switching_key(&self) -> &LweKeySwitchingKey<Q> {
        &self.key_switching_key
    }

    /// Evaluates `lut` at the phase of `ciphertext` and resets its noise.
    ///
    /// The pipeline is: modulus switch `q → 2N` (nearest, ties to even),
    /// blind rotation from `X^{-b}·lut`, sample extraction of the constant
    /// coefficient, key switching back under the LWE secret key and a final
    /// modulus switch `Q → q`.
    pub fn bootstrap(
        &self,
        ciphertext: &LweCiphertext<C>,
        lut: FieldPolynomial<Q>,
    ) -> Result<LweCiphertext<C>, FheError> {
        let parameters = &self.parameters;

        if ciphertext.dimension() != parameters.lwe_dimension() {
            return Err(FheError::DimensionMismatch {
                expected: parameters.lwe_dimension(),
                found: ciphertext.dimension(),
            });
        }

        let lwe_modulus: u64 = parameters.lwe_cipher_modulus_value().as_into();
        let twice_ring_dimension = (parameters.ring_dimension() << 1) as u64;
        let ring_modulus: u64 = Q::MODULUS_VALUE.as_into();

        // q -> 2N
        let rescaled: LweCiphertext<C> =
            lwe_modulus_switch(ciphertext, lwe_modulus, twice_ring_dimension);

        // blind rotation
        let acc = self
            .blind_rotation_key
            .blind_rotate(lut, &rescaled, &self.ntt_table);

        // sample extraction and key switching, still mod Q
        let extracted = acc.extract_lwe_locally();
        let key_switched = self.key_switching_key.key_switch(&extracted)?;

        // Q -> q
        Ok(lwe_modulus_switch(&key_switched, ring_modulus, lwe_modulus))
    }
}
