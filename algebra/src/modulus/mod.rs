//! Concrete modulus types: power-of-two (mask based) and Barrett.

mod barrett;
mod pow_of_2;

pub use barrett::BarrettModulus;
pub use pow_of_2::PowOf2Modulus;
