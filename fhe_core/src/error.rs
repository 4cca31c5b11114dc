use thiserror::Error;

use crate::ParameterPreset;

/// Errors surfaced by the public API.
#[derive(Error, Debug)]
pub enum FheError {
    /// The LWE dimension is not usable.
    #[error("LWE dimension {0} is not valid")]
    LweDimensionInvalid(usize),
    /// The ring dimension is not a power of two.
    #[error("ring dimension {0} is not valid")]
    RingDimensionInvalid(usize),
    /// The ring modulus does not support the negacyclic NTT of this
    /// dimension.
    #[error("ring modulus {ring_modulus} is not compatible with ring dimension {ring_dimension}")]
    RingModulusNotCompatible {
        /// The ring modulus `Q`.
        ring_modulus: u64,
        /// The ring dimension `N`.
        ring_dimension: usize,
    },
    /// The LWE modulus does not fit the scheme's constraints.
    #[error("LWE modulus {lwe_modulus} is not compatible with ring dimension {ring_dimension}")]
    LweModulusNotCompatible {
        /// The LWE modulus `q`.
        lwe_modulus: u64,
        /// The ring dimension `N`.
        ring_dimension: usize,
    },
    /// Two operands were built for different parameter sets.
    #[error("operands were built for different parameter sets ({expected} vs {found})")]
    ParameterMismatch {
        /// The preset of the first operand.
        expected: ParameterPreset,
        /// The preset of the offending operand.
        found: ParameterPreset,
    },
    /// A ciphertext has the wrong dimension for this key.
    #[error("ciphertext dimension {found} does not match the expected dimension {expected}")]
    DimensionMismatch {
        /// The dimension required by the key.
        expected: usize,
        /// The dimension of the ciphertext.
        found: usize,
    },
    /// Two integer operands have different bit widths.
    #[error("operands have different bit widths ({left} vs {right})")]
    WidthMismatch {
        /// Width of the left operand.
        left: usize,
        /// Width of the right operand.
        right: usize,
    },
    /// The requested integer bit width is not supported.
    #[error("bit width {0} is not supported")]
    UnsupportedWidth(usize),
    /// The operation is reserved but not implemented.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    /// A bootstrapping sub-step failed.
    #[error("bootstrap failed")]
    BootstrapFailed(#[source] Box<FheError>),
    /// A byte-format failure.
    #[error(transparent)]
    Serialization(#[from] SerializeError),
    /// The deterministic PRG ran out of state.
    #[error("deterministic prg exhausted")]
    RngExhausted,
}

/// Errors raised while parsing the stable byte format.
#[derive(Error, Debug)]
pub enum SerializeError {
    /// The first byte is not the format magic.
    #[error("bad magic byte {0:#04x}")]
    BadMagic(u8),
    /// The version byte is newer than this library.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    /// The preset id is unknown.
    #[error("unknown parameter preset id {0}")]
    UnknownPreset(u8),
    /// The object kind byte is unknown.
    #[error("unknown object kind {0}")]
    UnknownKind(u8),
    /// The object kind does not match the requested type.
    #[error("expected object kind {expected}, found {found}")]
    WrongKind {
        /// The kind implied by the target type.
        expected: u8,
        /// The kind found in the stream.
        found: u8,
    },
    /// The stored preset does not match the target type's parameters.
    #[error("stored preset does not match the target parameter types")]
    PresetMismatch,
    /// Extra bytes remained after the payload.
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
    /// The stream ended early.
    #[error("byte stream ended early: {0}")]
    Io(#[from] std::io::Error),
}
