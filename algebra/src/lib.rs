//! Algebraic substrate for the lattice crates: modular arithmetic,
//! prime fields, number theoretic transforms, gadget decomposition
//! and randomness.

mod arith;
mod error;
mod field;
mod ntt;

pub mod integer;
pub mod modulus;
pub mod polynomial;
pub mod random;
pub mod reduce;

mod decompose;

pub use arith::minimal_primitive_root;
pub use decompose::Basis;
pub use error::AlgebraError;
pub use field::{Field, NttField, U32Field};
pub use ntt::{FieldNttTable, NumberTheoryTransform};
