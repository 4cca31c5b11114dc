//! The stable byte format.
//!
//! Every frame is `[magic, version, preset id, kind]` followed by the
//! payload. Payload integers are little-endian with a fixed width of
//! `⌈bits(modulus) / 8⌉` bytes; all element counts are implied by the
//! preset, so a round trip through bytes is bit-identical.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use algebra::integer::{AsInto, UnsignedInteger};
use algebra::{Basis, Field, NttField};
use lattice::{Lwe, NttGadgetRlwe, NttRgsw, NttRlwe};

use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};

use crate::{
    build_parameters, BlindRotationKey, BootstrapKey, LweKeySwitchingKey, LwePublicKey,
    LweSecretKey, ParameterPreset, RlweSecretKey, SecretKeyPack, SerializeError,
};

/// The format magic byte.
pub const MAGIC: u8 = 0xC7;
/// The current format version.
pub const VERSION: u8 = 1;

/// Stable object kind tags.
pub mod kind {
    /// A single encrypted bit.
    pub const BIT_CIPHERTEXT: u8 = 1;
    /// A fixed-width unsigned integer ciphertext.
    pub const UINT_CIPHERTEXT: u8 = 2;
    /// The secret key pack (both secret keys).
    pub const SECRET_KEY: u8 = 3;
    /// The public key (zero-encryption pool).
    pub const PUBLIC_KEY: u8 = 4;
    /// The bootstrap key (blind rotation key and key switching key).
    pub const BOOTSTRAP_KEY: u8 = 5;

    pub(crate) const ALL: [u8; 5] = [
        BIT_CIPHERTEXT,
        UINT_CIPHERTEXT,
        SECRET_KEY,
        PUBLIC_KEY,
        BOOTSTRAP_KEY,
    ];
}

/// Conversion to and from the stable byte format.
pub trait ByteCodec: Sized {
    /// Serializes `self` into a framed byte vector.
    fn to_bytes(&self) -> Vec<u8>;

    /// Parses a framed byte vector. The whole input must be consumed.
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError>;
}

/// Returns the payload byte width for values below `2^bits`.
#[inline]
pub const fn value_byte_width(bits: u32) -> usize {
    bits.div_ceil(8) as usize
}

/// Writes the frame header.
pub fn write_header(out: &mut Vec<u8>, preset: ParameterPreset, kind: u8) {
    out.push(MAGIC);
    out.push(VERSION);
    out.push(preset.id());
    out.push(kind);
}

/// Reads and validates the frame header, returning the stored preset.
pub fn read_header(
    reader: &mut &[u8],
    expected_kind: u8,
) -> Result<ParameterPreset, SerializeError> {
    let magic = reader.read_u8()?;
    if magic != MAGIC {
        return Err(SerializeError::BadMagic(magic));
    }

    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(SerializeError::UnsupportedVersion(version));
    }

    let preset_id = reader.read_u8()?;
    let preset =
        ParameterPreset::from_id(preset_id).ok_or(SerializeError::UnknownPreset(preset_id))?;

    let found_kind = reader.read_u8()?;
    if !kind::ALL.contains(&found_kind) {
        return Err(SerializeError::UnknownKind(found_kind));
    }
    if found_kind != expected_kind {
        return Err(SerializeError::WrongKind {
            expected: expected_kind,
            found: found_kind,
        });
    }

    Ok(preset)
}

/// Fails if any bytes remain unconsumed.
#[inline]
pub fn expect_consumed(reader: &[u8]) -> Result<(), SerializeError> {
    if reader.is_empty() {
        Ok(())
    } else {
        Err(SerializeError::TrailingBytes(reader.len()))
    }
}

/// Writes one value with the given byte width, little-endian.
pub fn write_value<C: UnsignedInteger>(out: &mut Vec<u8>, value: C, width: usize) {
    let v: u64 = value.as_into();
    match width {
        1 => out.write_u8(v as u8).unwrap(),
        2 => out.write_u16::<LittleEndian>(v as u16).unwrap(),
        4 => out.write_u32::<LittleEndian>(v as u32).unwrap(),
        8 => out.write_u64::<LittleEndian>(v).unwrap(),
        _ => unreachable!("unsupported value width {width}"),
    }
}

/// Reads one value with the given byte width, little-endian.
pub fn read_value<C: UnsignedInteger>(
    reader: &mut &[u8],
    width: usize,
) -> Result<C, SerializeError> {
    let v: u64 = match width {
        1 => reader.read_u8()? as u64,
        2 => reader.read_u16::<LittleEndian>()? as u64,
        4 => reader.read_u32::<LittleEndian>()? as u64,
        8 => reader.read_u64::<LittleEndian>()?,
        _ => unreachable!("unsupported value width {width}"),
    };
    Ok(C::as_from(v))
}

/// Writes a slice of values with the given byte width.
pub fn write_values<C: UnsignedInteger>(out: &mut Vec<u8>, values: &[C], width: usize) {
    for &v in values {
        write_value(out, v, width);
    }
}

/// Reads `count` values with the given byte width.
pub fn read_values<C: UnsignedInteger>(
    reader: &mut &[u8],
    count: usize,
    width: usize,
) -> Result<Vec<C>, SerializeError> {
    (0..count).map(|_| read_value(reader, width)).collect()
}

/// Writes an LWE sample (mask then body).
pub fn write_lwe<C: UnsignedInteger>(out: &mut Vec<u8>, lwe: &Lwe<C>, width: usize) {
    write_values(out, lwe.a(), width);
    write_value(out, lwe.b(), width);
}

/// Reads an LWE sample of the given dimension.
pub fn read_lwe<C: UnsignedInteger>(
    reader: &mut &[u8],
    dimension: usize,
    width: usize,
) -> Result<Lwe<C>, SerializeError> {
    let a = read_values(reader, dimension, width)?;
    let b = read_value(reader, width)?;
    Ok(Lwe::new(a, b))
}

fn ring_value_width(preset: ParameterPreset) -> usize {
    value_byte_width(64 - (preset.ring_modulus() - 1).leading_zeros())
}

fn lwe_value_width(preset: ParameterPreset) -> usize {
    value_byte_width(preset.lwe_modulus_bits())
}

/// Validates that the stored preset is usable with the target types and
/// rebuilds its parameters.
fn checked_parameters<C: UnsignedInteger, Q: NttField>(
    preset: ParameterPreset,
) -> Result<crate::Parameters<C, Q>, SerializeError> {
    let ring_modulus: u64 = Q::MODULUS_VALUE.as_into();
    if ring_modulus != preset.ring_modulus() || C::BITS < preset.lwe_modulus_bits() {
        return Err(SerializeError::PresetMismatch);
    }
    build_parameters(preset).map_err(|_| SerializeError::PresetMismatch)
}

impl<C: UnsignedInteger, Q: NttField> ByteCodec for SecretKeyPack<C, Q> {
    fn to_bytes(&self) -> Vec<u8> {
        let preset = self.parameters().preset();
        let mut out = Vec::new();
        write_header(&mut out, preset, kind::SECRET_KEY);

        write_values(
            &mut out,
            self.lwe_secret_key().as_ref(),
            lwe_value_width(preset),
        );
        write_values(
            &mut out,
            self.rlwe_secret_key().as_slice(),
            ring_value_width(preset),
        );
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        let mut reader = bytes;
        let preset = read_header(&mut reader, kind::SECRET_KEY)?;
        let parameters = checked_parameters::<C, Q>(preset)?;

        let lwe_key: Vec<C> = read_values(
            &mut reader,
            preset.lwe_dimension(),
            lwe_value_width(preset),
        )?;
        let ring_key: Vec<<Q as Field>::ValueT> = read_values(
            &mut reader,
            preset.ring_dimension(),
            ring_value_width(preset),
        )?;
        expect_consumed(reader)?;

        Ok(SecretKeyPack::from_parts(
            parameters,
            LweSecretKey::new(lwe_key),
            RlweSecretKey::new(FieldPolynomial::new(ring_key)),
        ))
    }
}

impl<C: UnsignedInteger> ByteCodec for LwePublicKey<C> {
    fn to_bytes(&self) -> Vec<u8> {
        let preset = self.preset();
        let width = lwe_value_width(preset);
        let mut out = Vec::new();
        write_header(&mut out, preset, kind::PUBLIC_KEY);

        out.write_u32::<LittleEndian>(self.samples().len() as u32)
            .unwrap();
        for sample in self.samples() {
            write_lwe(&mut out, sample, width);
        }
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        let mut reader = bytes;
        let preset = read_header(&mut reader, kind::PUBLIC_KEY)?;
        if C::BITS < preset.lwe_modulus_bits() {
            return Err(SerializeError::PresetMismatch);
        }
        let width = lwe_value_width(preset);

        let count = reader.read_u32::<LittleEndian>()? as usize;
        let samples = (0..count)
            .map(|_| read_lwe(&mut reader, preset.lwe_dimension(), width))
            .collect::<Result<Vec<_>, _>>()?;
        expect_consumed(reader)?;

        Ok(LwePublicKey::from_samples(preset, samples))
    }
}

fn write_ntt_rlwe<Q: NttField>(out: &mut Vec<u8>, rlwe: &NttRlwe<Q>, width: usize) {
    write_values(out, rlwe.a().as_slice(), width);
    write_values(out, rlwe.b().as_slice(), width);
}

fn read_ntt_rlwe<Q: NttField>(
    reader: &mut &[u8],
    dimension: usize,
    width: usize,
) -> Result<NttRlwe<Q>, SerializeError> {
    let a = read_values(reader, dimension, width)?;
    let b = read_values(reader, dimension, width)?;
    Ok(NttRlwe::new(
        FieldNttPolynomial::new(a),
        FieldNttPolynomial::new(b),
    ))
}

fn write_gadget_rlwe<Q: NttField>(out: &mut Vec<u8>, gadget: &NttGadgetRlwe<Q>, width: usize) {
    for row in gadget.data() {
        write_ntt_rlwe(out, row, width);
    }
}

fn read_gadget_rlwe<Q: NttField>(
    reader: &mut &[u8],
    dimension: usize,
    basis: Basis<Q>,
    width: usize,
) -> Result<NttGadgetRlwe<Q>, SerializeError> {
    let data = (0..basis.decompose_len())
        .map(|_| read_ntt_rlwe(reader, dimension, width))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NttGadgetRlwe::new(data, basis))
}

impl<C: UnsignedInteger, Q: NttField> ByteCodec for BootstrapKey<C, Q> {
    fn to_bytes(&self) -> Vec<u8> {
        let parameters = self.parameters();
        let preset = parameters.preset();
        let width = ring_value_width(preset);

        let mut out = Vec::new();
        write_header(&mut out, preset, kind::BOOTSTRAP_KEY);

        for rgsw in self.blind_rotation_key().data() {
            write_gadget_rlwe(&mut out, rgsw.minus_s_m(), width);
            write_gadget_rlwe(&mut out, rgsw.m(), width);
        }

        for rows in self.key_switching_key().rows() {
            for row in rows {
                write_lwe(&mut out, row, width);
            }
        }
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializeError> {
        let mut reader = bytes;
        let preset = read_header(&mut reader, kind::BOOTSTRAP_KEY)?;
        let parameters = checked_parameters::<C, Q>(preset)?;
        let width = ring_value_width(preset);

        let ring_dimension = parameters.ring_dimension();
        let br_basis = parameters.blind_rotation_basis();
        let ks_basis = parameters.key_switching_basis();

        let key = (0..parameters.lwe_dimension())
            .map(|_| {
                let minus_s_m = read_gadget_rlwe(&mut reader, ring_dimension, br_basis, width)?;
                let m = read_gadget_rlwe(&mut reader, ring_dimension, br_basis, width)?;
                Ok(NttRgsw::new(minus_s_m, m))
            })
            .collect::<Result<Vec<_>, SerializeError>>()?;
        let blind_rotation_key = BlindRotationKey::new(key);

        let rows = (0..ring_dimension)
            .map(|_| {
                (0..ks_basis.decompose_len())
                    .map(|_| read_lwe(&mut reader, parameters.lwe_dimension(), width))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let key_switching_key =
            LweKeySwitchingKey::from_rows(parameters.lwe_dimension(), ks_basis, rows);

        expect_consumed(reader)?;

        Ok(BootstrapKey::from_parts(
            blind_rotation_key,
            key_switching_key,
            parameters,
        ))
    }
}
