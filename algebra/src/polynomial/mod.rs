//! Polynomials over a prime field, in coefficient and evaluation form.

mod coeff;
mod ntt_poly;

pub use coeff::FieldPolynomial;
pub use ntt_poly::FieldNttPolynomial;
