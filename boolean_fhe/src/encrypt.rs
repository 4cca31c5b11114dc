use algebra::integer::UnsignedInteger;
use algebra::NttField;
use fhe_core::{
    LweParameters, LwePublicKey, LweSecretKey, ParameterPreset, SecretKeyPack,
};
use rand::{CryptoRng, Rng};

use crate::BitCiphertext;

/// Encryptor holding the LWE secret key.
pub struct Encryptor<C: UnsignedInteger> {
    lwe_secret_key: LweSecretKey<C>,
    params: LweParameters<C>,
    preset: ParameterPreset,
}

impl<C: UnsignedInteger> Encryptor<C> {
    /// Creates a new [`Encryptor<C>`].
    #[inline]
    pub fn new<Q: NttField>(secret_key_pack: &SecretKeyPack<C, Q>) -> Self {
        Self {
            lwe_secret_key: secret_key_pack.lwe_secret_key().clone(),
            params: *secret_key_pack.parameters().lwe_params(),
            preset: secret_key_pack.parameters().preset(),
        }
    }

    /// Encrypts a bool message.
    #[inline]
    pub fn encrypt<R>(&self, message: bool, rng: &mut R) -> BitCiphertext<C>
    where
        R: Rng + CryptoRng,
    {
        let message = if message { C::ONE } else { C::ZERO };
        BitCiphertext::new(
            self.lwe_secret_key.encrypt(message, &self.params, rng),
            self.preset,
        )
    }
}

/// Encryptor holding only the public key.
pub struct PublicEncryptor<C: UnsignedInteger> {
    public_key: LwePublicKey<C>,
    params: LweParameters<C>,
}

impl<C: UnsignedInteger> PublicEncryptor<C> {
    /// Creates a new [`PublicEncryptor<C>`].
    #[inline]
    pub fn new<Q: NttField>(
        public_key: LwePublicKey<C>,
        parameters: &fhe_core::Parameters<C, Q>,
    ) -> Self {
        Self {
            public_key,
            params: *parameters.lwe_params(),
        }
    }

    /// Encrypts a bool message without the secret key.
    #[inline]
    pub fn encrypt<R>(&self, message: bool, rng: &mut R) -> BitCiphertext<C>
    where
        R: Rng + CryptoRng,
    {
        let message = if message { C::ONE } else { C::ZERO };
        BitCiphertext::new(
            self.public_key.encrypt(message, &self.params, rng),
            self.public_key.preset(),
        )
    }
}
