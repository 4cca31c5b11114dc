//! Lattice sample types: LWE, RLWE (coefficient and NTT form), gadget RLWE
//! and RGSW, together with the external product that drives blind rotation.

mod gadget_rlwe;
mod lwe;
mod rgsw;
mod rlwe;
mod space;

pub use gadget_rlwe::NttGadgetRlwe;
pub use lwe::Lwe;
pub use rgsw::NttRgsw;
pub use rlwe::{NttRlwe, Rlwe};
pub use space::{NttRlweSpace, PolyDecomposeSpace, RlweSpace};
