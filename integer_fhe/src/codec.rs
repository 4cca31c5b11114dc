use algebra::integer::UnsignedInteger;
use algebra::NttField;
use boolean_fhe::{Decryptor, Encryptor, PublicEncryptor};
use fhe_core::{FheError, ParameterPreset, SecretKeyPack};
use rand::{CryptoRng, Rng};

use crate::ciphertext::check_width;
use crate::UintCiphertext;

#[inline]
fn bit_of_le_bytes(bytes: &[u8], i: usize) -> bool {
    bytes
        .get(i / 8)
        .map_or(false, |byte| (byte >> (i % 8)) & 1 == 1)
}

/// Encrypts unsigned integers as bit arrays under the secret key.
pub struct IntegerEncryptor<C: UnsignedInteger> {
    bit: Encryptor<C>,
    preset: ParameterPreset,
}

impl<C: UnsignedInteger> IntegerEncryptor<C> {
    /// Creates a new [`IntegerEncryptor<C>`].
    #[inline]
    pub fn new<Q: NttField>(secret_key_pack: &SecretKeyPack<C, Q>) -> Self {
        Self {
            bit: Encryptor::new(secret_key_pack),
            preset: secret_key_pack.parameters().preset(),
        }
    }

    fn encrypt_with<R, F>(
        &self,
        width: usize,
        rng: &mut R,
        bit_at: F,
    ) -> Result<UintCiphertext<C>, FheError>
    where
        R: Rng + CryptoRng,
        F: Fn(usize) -> bool,
    {
        check_width(width)?;
        let bits = (0..width)
            .map(|i| self.bit.encrypt(bit_at(i), rng))
            .collect();
        Ok(UintCiphertext::new(bits, self.preset))
    }

    /// Encrypts `value mod 2^width` as a `width`-bit integer.
    #[inline]
    pub fn encrypt_u64<R>(
        &self,
        value: u64,
        width: usize,
        rng: &mut R,
    ) -> Result<UintCiphertext<C>, FheError>
    where
        R: Rng + CryptoRng,
    {
        self.encrypt_u128(value as u128, width, rng)
    }

    /// Encrypts `value mod 2^width` as a `width`-bit integer.
    #[inline]
    pub fn encrypt_u128<R>(
        &self,
        value: u128,
        width: usize,
        rng: &mut R,
    ) -> Result<UintCiphertext<C>, FheError>
    where
        R: Rng + CryptoRng,
    {
        self.encrypt_with(width, rng, |i| i < 128 && (value >> i) & 1 == 1)
    }

    /// Encrypts a little-endian byte string as a `width`-bit integer.
    /// Bits beyond `width` are discarded; missing bytes read as zero.
    #[inline]
    pub fn encrypt_le_bytes<R>(
        &self,
        bytes: &[u8],
        width: usize,
        rng: &mut R,
    ) -> Result<UintCiphertext<C>, FheError>
    where
        R: Rng + CryptoRng,
    {
        self.encrypt_with(width, rng, |i| bit_of_le_bytes(bytes, i))
    }
}

/// Encrypts unsigned integers without the secret key.
pub struct PublicIntegerEncryptor<C: UnsignedInteger> {
    bit: PublicEncryptor<C>,
    preset: ParameterPreset,
}

impl<C: UnsignedInteger> PublicIntegerEncryptor<C> {
    /// Creates a new [`PublicIntegerEncryptor<C>`].
    #[inline]
    pub fn new(bit: PublicEncryptor<C>, preset: ParameterPreset) -> Self {
        Self { bit, preset }
    }

    /// Encrypts `value mod 2^width` as a `width`-bit integer.
    pub fn encrypt_u128<R>(
        &self,
        value: u128,
        width: usize,
        rng: &mut R,
    ) -> Result<UintCiphertext<C>, FheError>
    where
        R: Rng + CryptoRng,
    {
        check_width(width)?;
        let bits = (0..width)
            .map(|i| self.bit.encrypt(i < 128 && (value >> i) & 1 == 1, rng))
            .collect();
        Ok(UintCiphertext::new(bits, self.preset))
    }
}

/// Decrypts bit-array integers back to their values.
pub struct IntegerDecryptor<C: UnsignedInteger> {
    bit: Decryptor<C>,
}

impl<C: UnsignedInteger> IntegerDecryptor<C> {
    /// Creates a new [`IntegerDecryptor<C>`].
    #[inline]
    pub fn new<Q: NttField>(secret_key_pack: &SecretKeyPack<C, Q>) -> Self {
        Self {
            bit: Decryptor::new(secret_key_pack),
        }
    }

    /// Decrypts an integer of width at most 64.
    pub fn decrypt_u64(&self, ciphertext: &UintCiphertext<C>) -> Result<u64, FheError> {
        if ciphertext.width() > 64 {
            return Err(FheError::UnsupportedWidth(ciphertext.width()));
        }
        Ok(self.decrypt_u128(ciphertext)? as u64)
    }

    /// Decrypts an integer of width at most 128.
    pub fn decrypt_u128(&self, ciphertext: &UintCiphertext<C>) -> Result<u128, FheError> {
        if ciphertext.width() > 128 {
            return Err(FheError::UnsupportedWidth(ciphertext.width()));
        }
        let mut value = 0u128;
        for (i, bit) in ciphertext.bits().iter().enumerate() {
            if self.bit.decrypt(bit) {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    /// Decrypts an integer of any supported width into `⌈w/8⌉`
    /// little-endian bytes.
    pub fn decrypt_le_bytes(&self, ciphertext: &UintCiphertext<C>) -> Vec<u8> {
        let mut bytes = vec![0u8; ciphertext.width().div_ceil(8)];
        for (i, bit) in ciphertext.bits().iter().enumerate() {
            if self.bit.decrypt(bit) {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        bytes
    }
}
