use algebra::integer::UnsignedInteger;
use fhe_core::serialize::{
    self, expect_consumed, read_header, read_lwe, write_header, write_lwe, ByteCodec,
};
use fhe_core::{LweCiphertext, ParameterPreset, SerializeError};

/// A single encrypted bit.
///
/// The bit is an LWE sample with the canonical encoding `false ↔ 0`,
/// `true ↔ Δ = q/8`, tagged with the preset it was built under so every
/// operation can check parameter compatibility before touching
/// coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitCiphertext<C: UnsignedInteger> {
    cipher: LweCiphertext<C>,
    preset: ParameterPreset,
}

impl<C: UnsignedInteger> BitCiphertext<C> {
    /// Creates a new [`BitCiphertext<C>`].
    #[inline]
    pub fn new(cipher: LweCiphertext<C>, preset: ParameterPreset) -> Self {
        Self { cipher, preset }
    }

    /// Returns a reference to the LWE sample.
    #[inline]
    pub fn cipher(&self) -> &LweCiphertext<C> {
        &self.cipher
    }

    /// Returns a mutable reference to the LWE sample.
    #[inline]
    pub fn cipher_mut(&mut self) -> &mut LweCiphertext<C> {
        &mut self.cipher
    }

    /// Consumes `self`, returning the LWE sample.
    #[inline]
    pub fn into_cipher(self) -> LweCiphertext<C> {
        self.cipher
    }

    /// Returns the preset this bit was built under.
    #[inline]
    pub fn preset(&self) -> ParameterPreset {
        self.preset
    }
}

impl<C: UnsignedInteger> ByteCodec for BitCiphertext<C> {
    fn to_bytes(&self) -> Vec<u8> {
        let width = serialize::value_byte_width(self.preset.lwe_modulus_bits());
        let mut out = Vec::new();
        write_header(&mut out, self.preset, serialize::kind::BIT_CIPHERTEXT);
        write_lwe(&mut out, &self.cipher, width);
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        let mut reader = bytes;
        let preset = read_header(&mut reader, serialize::kind::BIT_CIPHERTEXT)?;
        if C::BITS < preset.lwe_modulus_bits() {
            return Err(SerializeError::PresetMismatch);
        }
        let width = serialize::value_byte_width(preset.lwe_modulus_bits());

        let cipher = read_lwe(&mut reader, preset.lwe_dimension(), width)?;
        expect_consumed(reader)?;

        Ok(Self { cipher, preset })
    }
}
