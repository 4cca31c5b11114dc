use algebra::integer::UnsignedInteger;
use algebra::NttField;
use fhe_core::{LwePublicKey, Parameters, SecretKeyPack};
use rand::{CryptoRng, Rng};

/// Key generation entry points.
pub struct KeyGen;

impl KeyGen {
    /// Generates a fresh [`SecretKeyPack`].
    #[inline]
    pub fn generate_secret_key<C, Q, R>(
        parameters: Parameters<C, Q>,
        rng: &mut R,
    ) -> SecretKeyPack<C, Q>
    where
        C: UnsignedInteger,
        Q: NttField,
        R: Rng + CryptoRng,
    {
        SecretKeyPack::new(parameters, rng)
    }

    /// Generates the public key belonging to a [`SecretKeyPack`].
    #[inline]
    pub fn generate_public_key<C, Q, R>(
        secret_key_pack: &SecretKeyPack<C, Q>,
        rng: &mut R,
    ) -> LwePublicKey<C>
    where
        C: UnsignedInteger,
        Q: NttField,
        R: Rng + CryptoRng,
    {
        let parameters = secret_key_pack.parameters();
        LwePublicKey::new(
            secret_key_pack.lwe_secret_key(),
            parameters.lwe_params(),
            parameters.preset(),
            rng,
        )
    }
}
