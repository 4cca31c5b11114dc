use thiserror::Error;

/// Errors that may occur inside the algebraic substrate.
#[derive(Error, Debug)]
pub enum AlgebraError {
    /// The requested root order does not divide the multiplicative group order.
    #[error("no primitive {order}-th root of unity exists modulo {modulus}")]
    NoPrimitiveRoot {
        /// The requested root order.
        order: u64,
        /// The modulus of the group.
        modulus: u64,
    },
    /// The transform degree cannot be represented inside the field.
    #[error("transform degree {degree} is too large for modulus {modulus}")]
    DegreeTooLarge {
        /// The transform degree.
        degree: usize,
        /// The modulus of the field.
        modulus: u64,
    },
    /// The distribution parameters are invalid.
    #[error("invalid distribution parameters")]
    DistributionError,
    /// The deterministic PRG ran out of its configured byte budget.
    #[error("deterministic prg exhausted its byte budget")]
    RngExhausted,
}
