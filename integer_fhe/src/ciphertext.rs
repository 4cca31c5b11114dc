use algebra::integer::UnsignedInteger;
use boolean_fhe::BitCiphertext;
use fhe_core::serialize::{
    self, expect_consumed, read_header, read_lwe, write_header, write_lwe, ByteCodec,
};
use fhe_core::{FheError, ParameterPreset, SerializeError};

/// The bit widths the integer layer accepts.
///
/// 160 and 256 exist to carry blockchain addresses and words; they are
/// encoded identically to the smaller widths, just with more bits.
pub const SUPPORTED_WIDTHS: [usize; 9] = [1, 4, 8, 16, 32, 64, 128, 160, 256];

/// Returns an error if `width` is not supported.
#[inline]
pub(crate) fn check_width(width: usize) -> Result<(), FheError> {
    if SUPPORTED_WIDTHS.contains(&width) {
        Ok(())
    } else {
        Err(FheError::UnsupportedWidth(width))
    }
}

/// A fixed-width unsigned integer: an ordered array of encrypted bits,
/// little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UintCiphertext<C: UnsignedInteger> {
    bits: Vec<BitCiphertext<C>>,
    preset: ParameterPreset,
}

impl<C: UnsignedInteger> UintCiphertext<C> {
    /// Creates a new [`UintCiphertext<C>`] from its bits, least significant
    /// first.
    #[inline]
    pub fn new(bits: Vec<BitCiphertext<C>>, preset: ParameterPreset) -> Self {
        debug_assert!(!bits.is_empty());
        debug_assert!(bits.iter().all(|b| b.preset() == preset));
        Self { bits, preset }
    }

    /// Returns the bit width `w`.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns the preset this integer was built under.
    #[inline]
    pub fn preset(&self) -> ParameterPreset {
        self.preset
    }

    /// Returns the bits, least significant first.
    #[inline]
    pub fn bits(&self) -> &[BitCiphertext<C>] {
        &self.bits
    }

    /// Returns the `i`-th bit.
    #[inline]
    pub fn bit(&self, i: usize) -> &BitCiphertext<C> {
        &self.bits[i]
    }
}

impl<C: UnsignedInteger> ByteCodec for UintCiphertext<C> {
    fn to_bytes(&self) -> Vec<u8> {
        let width = serialize::value_byte_width(self.preset.lwe_modulus_bits());
        let mut out = Vec::new();
        write_header(&mut out, self.preset, serialize::kind::UINT_CIPHERTEXT);

        out.extend_from_slice(&(self.width() as u16).to_le_bytes());
        for bit in &self.bits {
            write_lwe(&mut out, bit.cipher(), width);
        }
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        let mut reader = bytes;
        let preset = read_header(&mut reader, serialize::kind::UINT_CIPHERTEXT)?;
        if C::BITS < preset.lwe_modulus_bits() {
            return Err(SerializeError::PresetMismatch);
        }
        let value_width = serialize::value_byte_width(preset.lwe_modulus_bits());

        let mut width_bytes = [0u8; 2];
        use std::io::Read;
        reader.read_exact(&mut width_bytes)?;
        let width = u16::from_le_bytes(width_bytes) as usize;
        if check_width(width).is_err() {
            return Err(SerializeError::PresetMismatch);
        }

        let bits = (0..width)
            .map(|_| {
                read_lwe(&mut reader, preset.lwe_dimension(), value_width)
                    .map(|lwe| BitCiphertext::new(lwe, preset))
            })
            .collect::<Result<Vec<_>, _>>()?;
        expect_consumed(reader)?;

        Ok(Self { bits, preset })
    }
}
