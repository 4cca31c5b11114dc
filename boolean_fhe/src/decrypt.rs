use algebra::integer::UnsignedInteger;
use algebra::NttField;
use fhe_core::{LweParameters, LweSecretKey, SecretKeyPack};

use crate::BitCiphertext;

/// Decryptor holding the LWE secret key.
pub struct Decryptor<C: UnsignedInteger> {
    lwe_secret_key: LweSecretKey<C>,
    params: LweParameters<C>,
}

impl<C: UnsignedInteger> Decryptor<C> {
    /// Creates a new [`Decryptor<C>`].
    #[inline]
    pub fn new<Q: NttField>(secret_key_pack: &SecretKeyPack<C, Q>) -> Self {
        Self {
            lwe_secret_key: secret_key_pack.lwe_secret_key().clone(),
            params: *secret_key_pack.parameters().lwe_params(),
        }
    }

    /// Decrypts a ciphertext into a bool message.
    #[inline]
    pub fn decrypt(&self, ciphertext: &BitCiphertext<C>) -> bool {
        self.lwe_secret_key
            .decrypt(ciphertext.cipher(), &self.params)
            == C::ONE
    }

    /// Decrypts a ciphertext into a bool message and the noise magnitude.
    #[inline]
    pub fn decrypt_with_noise(&self, ciphertext: &BitCiphertext<C>) -> (bool, C) {
        let (message, noise) = self
            .lwe_secret_key
            .decrypt_with_noise(ciphertext.cipher(), &self.params);
        (message == C::ONE, noise)
    }
}
