use std::fmt::{self, Display};

use algebra::integer::{AsFrom, AsInto, UnsignedInteger};
use algebra::modulus::PowOf2Modulus;
use algebra::random::DiscreteGaussian;
use algebra::{Basis, Field, NttField, U32Field};
use once_cell::sync::Lazy;

use crate::FheError;

/// The field behind the [`PN10QP27`] preset: a 27-bit NTT prime.
pub type Fp27 = U32Field<132120577>;

/// Named parameter sets.
///
/// Every ciphertext and key records the preset it was built with, and
/// operations check it before touching any coefficients. Adding presets is
/// additive; ids are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterPreset {
    /// Ring dimension `2^10`, 27-bit NTT prime `Q`, LWE dimension 512 with
    /// modulus `2^15`.
    PN10QP27,
    /// A wider-margin variant: ring dimension `2^11` and LWE dimension 1024
    /// over the same moduli.
    PN11QP27,
}

impl ParameterPreset {
    /// The stable one-byte identifier of this preset.
    #[inline]
    pub const fn id(self) -> u8 {
        match self {
            ParameterPreset::PN10QP27 => 1,
            ParameterPreset::PN11QP27 => 2,
        }
    }

    /// Looks a preset up by its identifier.
    #[inline]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(ParameterPreset::PN10QP27),
            2 => Some(ParameterPreset::PN11QP27),
            _ => None,
        }
    }

    /// The LWE dimension `n`.
    #[inline]
    pub const fn lwe_dimension(self) -> usize {
        match self {
            ParameterPreset::PN10QP27 => 512,
            ParameterPreset::PN11QP27 => 1024,
        }
    }

    /// The number of significant bits of the LWE modulus `q`.
    #[inline]
    pub const fn lwe_modulus_bits(self) -> u32 {
        match self {
            ParameterPreset::PN10QP27 | ParameterPreset::PN11QP27 => 15,
        }
    }

    /// The ring dimension `N`.
    #[inline]
    pub const fn ring_dimension(self) -> usize {
        match self {
            ParameterPreset::PN10QP27 => 1024,
            ParameterPreset::PN11QP27 => 2048,
        }
    }

    /// The ring modulus `Q`.
    #[inline]
    pub const fn ring_modulus(self) -> u64 {
        match self {
            ParameterPreset::PN10QP27 | ParameterPreset::PN11QP27 => 132120577,
        }
    }
}

impl Display for ParameterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterPreset::PN10QP27 => write!(f, "PN10QP27"),
            ParameterPreset::PN11QP27 => write!(f, "PN11QP27"),
        }
    }
}

/// The raw constants a parameter set is built from.
#[derive(Debug, Clone, Copy)]
pub struct ConstParameters<C: UnsignedInteger, Q> {
    /// The preset name these constants belong to.
    pub preset: ParameterPreset,
    /// **LWE** vector dimension, refers to **n** in the paper.
    pub lwe_dimension: usize,
    /// **LWE** message modulus, refers to **t** in the paper.
    pub lwe_plain_modulus: C,
    /// **LWE** cipher modulus, refers to **q** in the paper. A power of two.
    pub lwe_cipher_modulus: C,
    /// The **LWE** noise error's standard deviation.
    pub lwe_noise_standard_deviation: f64,
    /// **Ring** polynomial dimension, refers to **N** in the paper.
    pub ring_dimension: usize,
    /// **Ring** polynomial modulus, refers to **Q** in the paper.
    pub ring_modulus: Q,
    /// The **Ring** noise error's standard deviation.
    pub ring_noise_standard_deviation: f64,
    /// Decompose basis' bits for `Q` used for the blind rotation
    /// accumulator.
    pub blind_rotation_basis_bits: u32,
    /// Decompose basis' bits for `Q` used for key switching.
    pub key_switching_basis_bits: u32,
    /// The noise error's standard deviation for key switching.
    pub key_switching_standard_deviation: f64,
}

/// The LWE half of a parameter set.
#[derive(Debug, Clone, Copy)]
pub struct LweParameters<C: UnsignedInteger> {
    /// The dimension `n`.
    pub dimension: usize,
    /// The message modulus `t`.
    pub plain_modulus_value: C,
    /// The cipher modulus `q`.
    pub cipher_modulus_value: C,
    /// The value `q - 1`.
    pub cipher_modulus_minus_one: C,
    /// The mask-based modulus object.
    pub cipher_modulus: PowOf2Modulus<C>,
    /// The noise standard deviation.
    pub noise_standard_deviation: f64,
}

impl<C: UnsignedInteger> LweParameters<C> {
    /// The scaling factor `Δ = q / t`.
    #[inline]
    pub fn scaling_factor(&self) -> C {
        self.cipher_modulus_value / self.plain_modulus_value
    }

    /// Gets the noise distribution over `Z_q`.
    #[inline]
    pub fn noise_distribution(&self) -> DiscreteGaussian<C> {
        DiscreteGaussian::new(
            0.0,
            self.noise_standard_deviation,
            self.cipher_modulus_minus_one,
        )
        .unwrap()
    }
}

/// A validated parameter set for the whole scheme.
#[derive(Debug, Clone, Copy)]
pub struct Parameters<C: UnsignedInteger, Q: NttField> {
    preset: ParameterPreset,
    lwe_params: LweParameters<C>,
    ring_dimension: usize,
    ring_noise_standard_deviation: f64,
    blind_rotation_basis: Basis<Q>,
    key_switching_basis: Basis<Q>,
    key_switching_standard_deviation: f64,
}

impl<C: UnsignedInteger, Q: NttField> Parameters<C, Q> {
    /// Validates the constants and creates a new [`Parameters<C, Q>`].
    pub fn new(params: ConstParameters<C, <Q as Field>::ValueT>) -> Result<Self, FheError> {
        let lwe_dimension = params.lwe_dimension;
        let ring_dimension = params.ring_dimension;

        assert_eq!(params.ring_modulus, Q::MODULUS_VALUE);

        if lwe_dimension == 0 || !lwe_dimension.is_power_of_two() {
            return Err(FheError::LweDimensionInvalid(lwe_dimension));
        }

        // N = 2^i
        if !ring_dimension.is_power_of_two() {
            return Err(FheError::RingDimensionInvalid(ring_dimension));
        }
        let twice_ring_dimension = ring_dimension << 1;

        // 2N | (Q - 1), so the negacyclic NTT of dimension N exists
        let ring_modulus: u64 = Q::MODULUS_VALUE.as_into();
        if (ring_modulus - 1) % twice_ring_dimension as u64 != 0 {
            return Err(FheError::RingModulusNotCompatible {
                ring_modulus,
                ring_dimension,
            });
        }

        let t = params.lwe_plain_modulus;
        let q = params.lwe_cipher_modulus;
        let q_u64: u64 = q.as_into();

        // q and t are powers of two, t | q, and q is at least 2N so the
        // modulus switch onto rotation indices never gains precision
        if t.count_ones() != 1
            || q.count_ones() != 1
            || t > q
            || q_u64 < twice_ring_dimension as u64
        {
            return Err(FheError::LweModulusNotCompatible {
                lwe_modulus: q_u64,
                ring_dimension,
            });
        }

        let lwe_params = LweParameters {
            dimension: lwe_dimension,
            plain_modulus_value: t,
            cipher_modulus_value: q,
            cipher_modulus_minus_one: q - C::ONE,
            cipher_modulus: PowOf2Modulus::new(q),
            noise_standard_deviation: params.lwe_noise_standard_deviation,
        };

        Ok(Self {
            preset: params.preset,
            lwe_params,
            ring_dimension,
            ring_noise_standard_deviation: params.ring_noise_standard_deviation,
            blind_rotation_basis: Basis::new(params.blind_rotation_basis_bits),
            key_switching_basis: Basis::new(params.key_switching_basis_bits),
            key_switching_standard_deviation: params.key_switching_standard_deviation,
        })
    }

    /// Returns the preset name.
    #[inline]
    pub fn preset(&self) -> ParameterPreset {
        self.preset
    }

    /// Returns the LWE parameters.
    #[inline]
    pub fn lwe_params(&self) -> &LweParameters<C> {
        &self.lwe_params
    }

    /// Returns the LWE dimension `n`.
    #[inline]
    pub fn lwe_dimension(&self) -> usize {
        self.lwe_params.dimension
    }

    /// Returns the LWE message modulus `t`.
    #[inline]
    pub fn lwe_plain_modulus(&self) -> C {
        self.lwe_params.plain_modulus_value
    }

    /// Returns the LWE cipher modulus value `q`.
    #[inline]
    pub fn lwe_cipher_modulus_value(&self) -> C {
        self.lwe_params.cipher_modulus_value
    }

    /// Returns the LWE cipher modulus object.
    #[inline]
    pub fn lwe_cipher_modulus(&self) -> PowOf2Modulus<C> {
        self.lwe_params.cipher_modulus
    }

    /// Returns the scaling factor `Δ = q / t`.
    #[inline]
    pub fn scaling_factor(&self) -> C {
        self.lwe_params.scaling_factor()
    }

    /// Returns the ring dimension `N`.
    #[inline]
    pub fn ring_dimension(&self) -> usize {
        self.ring_dimension
    }

    /// Returns the ring modulus `Q`.
    #[inline]
    pub fn ring_modulus(&self) -> <Q as Field>::ValueT {
        Q::MODULUS_VALUE
    }

    /// Returns the blind rotation decomposition basis.
    #[inline]
    pub fn blind_rotation_basis(&self) -> Basis<Q> {
        self.blind_rotation_basis
    }

    /// Returns the key switching decomposition basis.
    #[inline]
    pub fn key_switching_basis(&self) -> Basis<Q> {
        self.key_switching_basis
    }

    /// Gets the LWE noise distribution over `Z_q`.
    #[inline]
    pub fn lwe_noise_distribution(&self) -> DiscreteGaussian<C> {
        self.lwe_params.noise_distribution()
    }

    /// Gets the ring noise distribution over `Z_Q`.
    #[inline]
    pub fn ring_noise_distribution(&self) -> DiscreteGaussian<<Q as Field>::ValueT> {
        DiscreteGaussian::new(0.0, self.ring_noise_standard_deviation, Q::MINUS_ONE).unwrap()
    }

    /// Gets the key switching noise distribution over `Z_Q`.
    #[inline]
    pub fn key_switching_noise_distribution(&self) -> DiscreteGaussian<<Q as Field>::ValueT> {
        DiscreteGaussian::new(0.0, self.key_switching_standard_deviation, Q::MINUS_ONE).unwrap()
    }

    /// Generates the NTT table for the ring.
    #[inline]
    pub fn generate_ntt_table(&self) -> <Q as NttField>::Table {
        Q::generate_ntt_table(self.ring_dimension.trailing_zeros()).unwrap()
    }
}

/// Builds the validated parameters of a preset for the matching value and
/// field types.
///
/// Fails if `Q`'s modulus does not equal the preset's ring modulus.
pub fn build_parameters<C: UnsignedInteger, Q: NttField>(
    preset: ParameterPreset,
) -> Result<Parameters<C, Q>, FheError> {
    Parameters::new(ConstParameters {
        preset,
        lwe_dimension: preset.lwe_dimension(),
        lwe_plain_modulus: C::as_from(8u64),
        lwe_cipher_modulus: C::as_from(1u64 << preset.lwe_modulus_bits()),
        lwe_noise_standard_deviation: 3.20,
        ring_dimension: preset.ring_dimension(),
        ring_modulus: <Q as Field>::ValueT::as_from(preset.ring_modulus()),
        ring_noise_standard_deviation: 3.20,
        blind_rotation_basis_bits: 7,
        key_switching_basis_bits: 3,
        key_switching_standard_deviation: 3.20,
    })
}

/// The default parameter set `PN10QP27`.
pub static PN10QP27: Lazy<Parameters<u16, Fp27>> =
    Lazy::new(|| build_parameters(ParameterPreset::PN10QP27).unwrap());

/// The wider-margin parameter set `PN11QP27`.
pub static PN11QP27: Lazy<Parameters<u16, Fp27>> =
    Lazy::new(|| build_parameters(ParameterPreset::PN11QP27).unwrap());
